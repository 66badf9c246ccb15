//! SVG output for orbit frames

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use log::debug;

use crate::backdrop::Backdrop;
use crate::constants::SCENE_SIZE;
use crate::orbit::Frame;
use crate::Result;

/// Escape text for use in SVG content and attribute values
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a frame as a standalone SVG document
pub fn render_svg(frame: &Frame, backdrop: Option<&Backdrop>) -> String {
    let mut svg = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#,
        size = SCENE_SIZE
    );
    svg.push_str(concat!(
        "  <defs>\n",
        "    <radialGradient id=\"sunGradient\">\n",
        "      <stop offset=\"0%\" stop-color=\"#fbbf24\"/>\n",
        "      <stop offset=\"80%\" stop-color=\"#f59e0b\"/>\n",
        "      <stop offset=\"100%\" stop-color=\"#b45309\"/>\n",
        "    </radialGradient>\n",
        "  </defs>\n",
    ));
    let _ = writeln!(
        svg,
        r##"  <rect width="100%" height="100%" fill="#0b1120"/>"##
    );

    if let Some(backdrop) = backdrop {
        svg.push_str("  <g class=\"backdrop\">\n");
        for star in &backdrop.stars {
            let _ = writeln!(
                svg,
                r#"    <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="white" opacity="{:.2}"/>"#,
                star.position.x, star.position.y, star.radius, star.opacity
            );
        }
        svg.push_str("  </g>\n");
    }

    let sun = &frame.sun;
    let _ = writeln!(
        svg,
        r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="url(#sunGradient)"/>"#,
        sun.center.x, sun.center.y, sun.radius
    );
    let _ = writeln!(
        svg,
        r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="orange" opacity="0.2"/>"#,
        sun.center.x, sun.center.y, sun.glow_radius
    );

    for (orbit, body) in frame.orbits.iter().zip(&frame.bodies) {
        let _ = writeln!(svg, r#"  <g class="body" data-name="{}">"#, escape(&body.label));
        let _ = writeln!(
            svg,
            r#"    <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none" stroke="{}" stroke-width="{}" stroke-dasharray="{}"/>"#,
            orbit.center.x, orbit.center.y, orbit.radius, orbit.stroke, orbit.stroke_width, orbit.dash
        );
        let _ = writeln!(
            svg,
            r#"    <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" stroke="rgba(255,255,255,0.3)" stroke-width="1"/>"#,
            body.position.x,
            body.position.y,
            body.display_radius(),
            escape(&body.color)
        );
        svg.push_str("  </g>\n");
    }

    if let Some(hint) = &frame.hint {
        let _ = writeln!(
            svg,
            r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" fill="white" font-family="sans-serif" font-size="16">{}</text>"#,
            SCENE_SIZE / 2.0,
            SCENE_SIZE - 24.0,
            escape(hint)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Render a frame and write it to `path`
pub fn write_svg<P: AsRef<Path>>(path: P, frame: &Frame, backdrop: Option<&Backdrop>) -> Result<()> {
    let document = render_svg(frame, backdrop);
    fs::write(&path, document)?;
    debug!("Wrote frame t={:.3}s to {}", frame.elapsed_s, path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backdrop::BackdropConfig;
    use crate::catalog::SOLAR_SYSTEM;
    use crate::orbit::OrbitRenderer;
    use std::time::Duration;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_svg_contains_scene() {
        let renderer = OrbitRenderer::new(&SOLAR_SYSTEM);
        let svg = render_svg(&renderer.frame(Duration::ZERO), None);

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("url(#sunGradient)"));
        assert_eq!(svg.matches("class=\"body\"").count(), 3);
        assert_eq!(svg.matches("stroke-dasharray=\"4 4\"").count(), 3);
        // Mercury starts on the +x axis
        assert!(svg.contains(r##"cx="360.00" cy="300.00" r="6.00" fill="#a8a29e""##));
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn test_svg_hover_and_backdrop() {
        let mut renderer = OrbitRenderer::new(&SOLAR_SYSTEM);
        renderer.set_hovered(Some("Venus"));
        let backdrop = BackdropConfig::new().with_count(10).generate();
        let svg = render_svg(&renderer.frame(Duration::ZERO), Some(&backdrop));

        assert!(svg.contains("Click to ask AI about Venus"));
        assert!(svg.contains(r##"stroke="#00aaff" stroke-width="2""##));
        // Hovered Venus is drawn at 1.5x its 9 unit radius
        assert!(svg.contains(r#"cx="400.00" cy="300.00" r="13.50""#));
        assert_eq!(svg.matches("fill=\"white\" opacity").count(), 10);
    }
}
