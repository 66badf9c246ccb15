//! Orbit rendering module
//!
//! Geometry of circular orbits and the renderer that turns a body catalog
//! into per-tick scene descriptions.

pub mod geometry;
pub mod renderer;

pub use geometry::{
    angular_distance, compute_position, elapsed_from_secs, normalize_angle, phase_at, position_at,
};
pub use renderer::{
    hover_hint, Frame, HoverState, OrbitEvent, OrbitListener, OrbitPath, OrbitRenderer,
    RenderedBody, SunDisc,
};
