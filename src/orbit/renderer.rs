//! Orbit renderer
//!
//! Produces a render-ready description of the scene for each animation tick
//! and tracks which body the pointer is over. Hover and selection are
//! reported to listeners as [`OrbitEvent`]s; the host decides what a
//! selection means; nothing flows back into the renderer.

use std::sync::mpsc::Sender;
use std::time::Duration;

use log::{debug, warn};
use nalgebra::{distance, Point2};

use super::geometry::{compute_position, phase_at};
use crate::catalog::{Body, BodyCatalog};
use crate::constants::{
    HOVER_SCALE, RING_COLOR, RING_DASH, RING_HIGHLIGHT_COLOR, RING_HIGHLIGHT_WIDTH,
    RING_HIT_TOLERANCE, RING_WIDTH, SCENE_CENTER_X, SCENE_CENTER_Y, SUN_GLOW_RADIUS, SUN_RADIUS,
};

/// Pointer state of the renderer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HoverState {
    /// No body under the pointer
    #[default]
    Idle,
    /// The named body is highlighted
    Hovered(String),
}

impl HoverState {
    /// Name of the hovered body, if any
    pub fn body(&self) -> Option<&str> {
        match self {
            HoverState::Idle => None,
            HoverState::Hovered(name) => Some(name.as_str()),
        }
    }

    /// Whether `name` is the hovered body
    pub fn is_hovered(&self, name: &str) -> bool {
        self.body() == Some(name)
    }
}

/// Notifications emitted by the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrbitEvent {
    /// The highlighted body changed (`None` when the pointer left all bodies)
    HoverChanged(Option<String>),
    /// A body was chosen, e.g. by a pointer click
    Selected(String),
}

/// Receiver of renderer notifications
pub trait OrbitListener {
    /// Called once per emitted event
    fn notify(&mut self, event: &OrbitEvent);
}

impl<F> OrbitListener for F
where
    F: FnMut(&OrbitEvent),
{
    fn notify(&mut self, event: &OrbitEvent) {
        self(event)
    }
}

impl OrbitListener for Sender<OrbitEvent> {
    fn notify(&mut self, event: &OrbitEvent) {
        if self.send(event.clone()).is_err() {
            debug!("Dropping {:?}: receiver hung up", event);
        }
    }
}

/// The sun at the center of the scene
#[derive(Debug, Clone, PartialEq)]
pub struct SunDisc {
    pub center: Point2<f64>,
    pub radius: f64,
    pub glow_radius: f64,
}

/// Dashed orbit ring of one body
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPath {
    pub body: String,
    pub center: Point2<f64>,
    pub radius: f64,
    pub stroke: &'static str,
    pub stroke_width: f64,
    pub dash: &'static str,
    pub highlighted: bool,
}

/// One body as it should be drawn this tick
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBody {
    pub label: String,
    pub position: Point2<f64>,
    /// Phase in radians, `[0, 2π)`
    pub phase: f64,
    /// Disc radius before hover scaling
    pub radius: f64,
    pub scale: f64,
    pub color: String,
    pub highlighted: bool,
}

impl RenderedBody {
    /// Disc radius after hover scaling
    pub fn display_radius(&self) -> f64 {
        self.radius * self.scale
    }
}

/// Render-ready description of the scene at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub elapsed_s: f64,
    pub sun: SunDisc,
    pub orbits: Vec<OrbitPath>,
    pub bodies: Vec<RenderedBody>,
    /// Text shown while a body is hovered
    pub hint: Option<String>,
}

/// Hint text surfaced while `name` is hovered
pub fn hover_hint(name: &str) -> String {
    format!("Click to ask AI about {}", name)
}

/// Animation engine for a catalog of bodies around a common center
pub struct OrbitRenderer<'a> {
    catalog: &'a BodyCatalog,
    center: Point2<f64>,
    hover: HoverState,
    listeners: Vec<Box<dyn OrbitListener + 'a>>,
}

impl<'a> OrbitRenderer<'a> {
    /// Create a renderer centered in the default scene
    pub fn new(catalog: &'a BodyCatalog) -> Self {
        Self {
            catalog,
            center: Point2::new(SCENE_CENTER_X, SCENE_CENTER_Y),
            hover: HoverState::Idle,
            listeners: Vec::new(),
        }
    }

    /// Set a custom center point
    pub fn with_center(mut self, center: Point2<f64>) -> Self {
        self.center = center;
        self
    }

    /// Register a listener for hover and selection events
    pub fn subscribe(&mut self, listener: impl OrbitListener + 'a) {
        self.listeners.push(Box::new(listener));
    }

    pub fn catalog(&self) -> &'a BodyCatalog {
        self.catalog
    }

    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    pub fn hover_state(&self) -> &HoverState {
        &self.hover
    }

    /// Hint text for the current hover state
    pub fn hint(&self) -> Option<String> {
        self.hover.body().map(hover_hint)
    }

    /// Record which body is highlighted
    ///
    /// Returns true when the state changed; a change emits
    /// [`OrbitEvent::HoverChanged`]. Names not in the catalog leave the
    /// state untouched.
    pub fn set_hovered(&mut self, name: Option<&str>) -> bool {
        let next = match name {
            None => HoverState::Idle,
            Some(name) => match self.catalog.get(name) {
                Some(body) => HoverState::Hovered(body.name.clone()),
                None => {
                    warn!("Ignoring hover on unknown body {:?}", name);
                    return false;
                }
            },
        };

        if next == self.hover {
            return false;
        }

        debug!("Hover {:?} -> {:?}", self.hover, next);
        self.hover = next;
        let event = OrbitEvent::HoverChanged(self.hover.body().map(str::to_string));
        self.emit(&event);
        true
    }

    /// Report that a body was chosen
    ///
    /// The renderer itself does nothing else with the selection. Returns
    /// false (and emits nothing) for names not in the catalog.
    pub fn select(&mut self, name: &str) -> bool {
        let Some(body) = self.catalog.get(name) else {
            warn!("Ignoring selection of unknown body {:?}", name);
            return false;
        };

        debug!("Selected {}", body.name);
        let event = OrbitEvent::Selected(body.name.clone());
        self.emit(&event);
        true
    }

    /// Body under `point` at the given time, if any
    ///
    /// A body's disc wins over any ring; otherwise the pointer is over a body
    /// when it lies within [`RING_HIT_TOLERANCE`] of that body's orbit ring.
    /// Overlaps resolve to the innermost orbit.
    pub fn body_at(&self, point: &Point2<f64>, elapsed: Duration) -> Option<&'a Body> {
        let elapsed_s = elapsed.as_secs_f64();
        let mut bodies: Vec<&'a Body> = self.catalog.iter().collect();
        bodies.sort_by(|a, b| a.orbit_radius.total_cmp(&b.orbit_radius));

        let disc_hit = bodies.iter().copied().find(|body| {
            let position = compute_position(body, &self.center, phase_at(body, elapsed_s));
            distance(point, &position) <= self.disc_radius(body)
        });
        if disc_hit.is_some() {
            return disc_hit;
        }

        let from_center = distance(point, &self.center);
        bodies
            .into_iter()
            .find(|body| (from_center - body.orbit_radius).abs() <= RING_HIT_TOLERANCE)
    }

    /// Pointer moved to `point`; updates hover state from hit testing
    pub fn pointer_moved(&mut self, point: &Point2<f64>, elapsed: Duration) -> bool {
        let hit = self.body_at(point, elapsed).map(|body| body.name.as_str());
        self.set_hovered(hit)
    }

    /// Pointer left the scene
    pub fn pointer_left(&mut self) -> bool {
        self.set_hovered(None)
    }

    /// Pointer clicked at `point`; selects the body under it
    pub fn click(&mut self, point: &Point2<f64>, elapsed: Duration) -> Option<&'a Body> {
        let body = self.body_at(point, elapsed)?;
        self.select(&body.name);
        Some(body)
    }

    /// Describe the scene after `elapsed` animation time
    pub fn frame(&self, elapsed: Duration) -> Frame {
        let elapsed_s = elapsed.as_secs_f64();

        let orbits = self
            .catalog
            .iter()
            .map(|body| {
                let highlighted = self.hover.is_hovered(&body.name);
                OrbitPath {
                    body: body.name.clone(),
                    center: self.center,
                    radius: body.orbit_radius,
                    stroke: if highlighted {
                        RING_HIGHLIGHT_COLOR
                    } else {
                        RING_COLOR
                    },
                    stroke_width: if highlighted {
                        RING_HIGHLIGHT_WIDTH
                    } else {
                        RING_WIDTH
                    },
                    dash: RING_DASH,
                    highlighted,
                }
            })
            .collect();

        let bodies = self
            .catalog
            .iter()
            .map(|body| {
                let phase = phase_at(body, elapsed_s);
                let highlighted = self.hover.is_hovered(&body.name);
                RenderedBody {
                    label: body.name.clone(),
                    position: compute_position(body, &self.center, phase),
                    phase,
                    radius: body.size / 2.0,
                    scale: if highlighted { HOVER_SCALE } else { 1.0 },
                    color: body.color.clone(),
                    highlighted,
                }
            })
            .collect();

        Frame {
            elapsed_s,
            sun: SunDisc {
                center: self.center,
                radius: SUN_RADIUS,
                glow_radius: SUN_GLOW_RADIUS,
            },
            orbits,
            bodies,
            hint: self.hint(),
        }
    }

    fn disc_radius(&self, body: &Body) -> f64 {
        let scale = if self.hover.is_hovered(&body.name) {
            HOVER_SCALE
        } else {
            1.0
        };
        body.size / 2.0 * scale
    }

    fn emit(&mut self, event: &OrbitEvent) {
        for listener in self.listeners.iter_mut() {
            listener.notify(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SOLAR_SYSTEM;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::mpsc;

    #[test]
    fn test_starts_idle() {
        let renderer = OrbitRenderer::new(&SOLAR_SYSTEM);
        assert_eq!(renderer.hover_state(), &HoverState::Idle);
        assert!(renderer.hint().is_none());
        assert!(renderer.frame(Duration::ZERO).hint.is_none());
    }

    #[test]
    fn test_hover_transitions_emit_once() {
        let (tx, rx) = mpsc::channel();
        let mut renderer = OrbitRenderer::new(&SOLAR_SYSTEM);
        renderer.subscribe(tx);

        assert!(renderer.set_hovered(Some("venus")));
        assert!(!renderer.set_hovered(Some("Venus")));
        assert!(renderer.set_hovered(None));
        assert!(!renderer.set_hovered(None));
        drop(renderer);

        let events: Vec<OrbitEvent> = rx.iter().collect();
        assert_eq!(
            events,
            vec![
                OrbitEvent::HoverChanged(Some("Venus".to_string())),
                OrbitEvent::HoverChanged(None),
            ]
        );
    }

    #[test]
    fn test_unknown_body_is_ignored() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut renderer = OrbitRenderer::new(&SOLAR_SYSTEM);
        renderer.subscribe(move |event: &OrbitEvent| sink.borrow_mut().push(event.clone()));

        assert!(renderer.set_hovered(Some("Earth")));
        assert!(!renderer.set_hovered(Some("Vulcan")));
        assert!(!renderer.select("Vulcan"));
        assert_eq!(renderer.hover_state(), &HoverState::Hovered("Earth".into()));
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_select_does_not_change_hover() {
        let (tx, rx) = mpsc::channel();
        let mut renderer = OrbitRenderer::new(&SOLAR_SYSTEM);
        renderer.subscribe(tx);

        assert!(renderer.select("Mercury"));
        assert_eq!(renderer.hover_state(), &HoverState::Idle);
        assert_eq!(rx.try_recv(), Ok(OrbitEvent::Selected("Mercury".into())));
    }

    #[test]
    fn test_frame_highlights_hovered_body() {
        let mut renderer = OrbitRenderer::new(&SOLAR_SYSTEM);
        renderer.set_hovered(Some("Earth"));
        let frame = renderer.frame(Duration::from_secs(3));

        assert_eq!(frame.hint.as_deref(), Some("Click to ask AI about Earth"));
        for (orbit, body) in frame.orbits.iter().zip(&frame.bodies) {
            let hovered = body.label == "Earth";
            assert_eq!(orbit.highlighted, hovered);
            assert_eq!(body.highlighted, hovered);
            assert_eq!(orbit.stroke, if hovered { "#00aaff" } else { "#334155" });
            assert_eq!(orbit.stroke_width, if hovered { 2.0 } else { 1.0 });
            assert_eq!(body.scale, if hovered { 1.5 } else { 1.0 });
            assert_eq!(orbit.dash, "4 4");
        }
    }

    #[test]
    fn test_hover_does_not_move_bodies() {
        let mut renderer = OrbitRenderer::new(&SOLAR_SYSTEM);
        let t = Duration::from_millis(7_250);
        let before: Vec<_> = renderer.frame(t).bodies.iter().map(|b| b.position).collect();
        renderer.set_hovered(Some("Mercury"));
        let after: Vec<_> = renderer.frame(t).bodies.iter().map(|b| b.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_hit_testing_disc_and_ring() {
        let renderer = OrbitRenderer::new(&SOLAR_SYSTEM);

        // At t=0 every body sits on the +x axis
        let mercury = renderer.body_at(&Point2::new(362.0, 301.0), Duration::ZERO);
        assert_eq!(mercury.map(|b| b.name.as_str()), Some("Mercury"));

        // Top of Venus's ring, far from the planet itself
        let venus_ring = renderer.body_at(&Point2::new(300.0, 201.0), Duration::ZERO);
        assert_eq!(venus_ring.map(|b| b.name.as_str()), Some("Venus"));

        // Empty space between rings and the sun
        assert!(renderer
            .body_at(&Point2::new(300.0, 175.0), Duration::ZERO)
            .is_none());
    }

    #[test]
    fn test_pointer_and_click() {
        let (tx, rx) = mpsc::channel();
        let mut renderer = OrbitRenderer::new(&SOLAR_SYSTEM);
        renderer.subscribe(tx);

        let on_earth = Point2::new(450.0, 300.0);
        assert!(renderer.pointer_moved(&on_earth, Duration::ZERO));
        assert!(!renderer.pointer_moved(&on_earth, Duration::ZERO));
        let clicked = renderer.click(&on_earth, Duration::ZERO);
        assert_eq!(clicked.map(|b| b.name.as_str()), Some("Earth"));
        assert!(renderer.pointer_left());
        drop(renderer);

        let events: Vec<OrbitEvent> = rx.iter().collect();
        assert_eq!(
            events,
            vec![
                OrbitEvent::HoverChanged(Some("Earth".into())),
                OrbitEvent::Selected("Earth".into()),
                OrbitEvent::HoverChanged(None),
            ]
        );
    }

    #[test]
    fn test_dropped_receiver_does_not_panic() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut renderer = OrbitRenderer::new(&SOLAR_SYSTEM);
        renderer.subscribe(tx);
        assert!(renderer.select("Earth"));
    }
}
