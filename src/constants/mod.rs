//! Constants module for orbit geometry and scene layout

use std::f64::consts::PI;

// Angles
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;

// Orbital rate model
/// Orbit radius (scene units) of the reference revolution
pub const REFERENCE_RADIUS: f64 = 150.0;
/// Seconds the reference orbit takes for one revolution
pub const REFERENCE_PERIOD_S: f64 = 16.0;
/// Exponent of the radius in the rate model (Kepler's third law shape)
pub const RATE_EXPONENT: f64 = 1.5;

// Scene layout
/// Width and height of the square scene in scene units
pub const SCENE_SIZE: f64 = 600.0;
/// Horizontal center of the scene
pub const SCENE_CENTER_X: f64 = 300.0;
/// Vertical center of the scene
pub const SCENE_CENTER_Y: f64 = 300.0;
/// Radius of the sun disc
pub const SUN_RADIUS: f64 = 35.0;
/// Radius of the translucent glow around the sun
pub const SUN_GLOW_RADIUS: f64 = 40.0;

// Hover styling
/// Scale applied to a hovered body's disc
pub const HOVER_SCALE: f64 = 1.5;
/// Orbit ring stroke color at rest
pub const RING_COLOR: &str = "#334155";
/// Orbit ring stroke color while its body is hovered
pub const RING_HIGHLIGHT_COLOR: &str = "#00aaff";
/// Orbit ring stroke width at rest
pub const RING_WIDTH: f64 = 1.0;
/// Orbit ring stroke width while its body is hovered
pub const RING_HIGHLIGHT_WIDTH: f64 = 2.0;
/// Dash pattern of the orbit rings
pub const RING_DASH: &str = "4 4";
/// Distance from a ring within which the pointer counts as over it
pub const RING_HIT_TOLERANCE: f64 = 4.0;
