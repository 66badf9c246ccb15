//! Terminal rendering of orbit frames

use nalgebra::Point2;

use crate::constants::TAU;
use crate::orbit::Frame;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;
const RING_SAMPLES: usize = 720;

struct Canvas {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
    center: Point2<f64>,
    origin: (f64, f64),
    scale_x: f64,
    scale_y: f64,
}

impl Canvas {
    fn new(cols: usize, rows: usize, center: Point2<f64>, half_extent: f64) -> Self {
        let half_cols = (cols as f64 - 1.0) / 2.0;
        let half_rows = (rows as f64 - 1.0) / 2.0;
        let scale_y = (half_rows / half_extent).min(half_cols / half_extent / CELL_ASPECT);

        Self {
            cols,
            rows,
            cells: vec![' '; cols * rows],
            center,
            origin: (half_cols, half_rows),
            scale_x: scale_y * CELL_ASPECT,
            scale_y,
        }
    }

    fn plot(&mut self, point: &Point2<f64>, glyph: char) {
        let col = (self.origin.0 + (point.x - self.center.x) * self.scale_x).round();
        let row = (self.origin.1 + (point.y - self.center.y) * self.scale_y).round();
        if col < 0.0 || row < 0.0 {
            return;
        }
        let (col, row) = (col as usize, row as usize);
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = glyph;
        }
    }

    fn into_string(self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for line in self.cells.chunks(self.cols) {
            let line: String = line.iter().collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

/// Render a frame as a `cols` x `rows` character picture
///
/// The sun is drawn as `@`, rings as `.` (`:` when highlighted) and each
/// body as the first letter of its label. A hint line follows the picture
/// while a body is hovered.
pub fn render_ascii(frame: &Frame, cols: usize, rows: usize) -> String {
    if cols < 3 || rows < 3 {
        return String::new();
    }

    let max_body = frame
        .bodies
        .iter()
        .map(|b| b.display_radius())
        .fold(0.0, f64::max);
    let half_extent = frame
        .orbits
        .iter()
        .map(|o| o.radius)
        .fold(frame.sun.radius, f64::max)
        + max_body;

    let mut canvas = Canvas::new(cols, rows, frame.sun.center, half_extent);

    for orbit in &frame.orbits {
        let glyph = if orbit.highlighted { ':' } else { '.' };
        for i in 0..RING_SAMPLES {
            let angle = TAU * i as f64 / RING_SAMPLES as f64;
            let point = orbit.center + nalgebra::Vector2::new(angle.cos(), angle.sin()) * orbit.radius;
            canvas.plot(&point, glyph);
        }
    }

    canvas.plot(&frame.sun.center, '@');

    for body in &frame.bodies {
        let glyph = body.label.chars().next().unwrap_or('o');
        let glyph = if body.highlighted {
            glyph.to_ascii_uppercase()
        } else {
            glyph.to_ascii_lowercase()
        };
        canvas.plot(&body.position, glyph);
    }

    let mut out = canvas.into_string();
    if let Some(hint) = &frame.hint {
        out.push_str(hint);
        out.push('\n');
    }
    out
}
