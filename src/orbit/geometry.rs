//! Circular orbit geometry
//!
//! Bodies move on circles around a shared center at a constant angular
//! velocity. The phase of a body is a pure function of elapsed time, so a
//! redraw tick never needs any state beyond the clock reading.
//!
//! Positions are in screen coordinates (y grows downward), so an increasing
//! phase reads as clockwise motion on screen.

use std::time::Duration;

use nalgebra::{Point2, Vector2};

use crate::catalog::Body;
use crate::constants::TAU;
use crate::{CosmosError, Result};

/// Wrap an angle into `[0, 2π)`
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Smallest absolute difference between two angles, in `[0, π]`
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = normalize_angle(a - b);
    diff.min(TAU - diff)
}

/// Phase of `body` after `elapsed_s` seconds, in `[0, 2π)`
///
/// Every body starts at phase 0 (on the +x axis from the center).
pub fn phase_at(body: &Body, elapsed_s: f64) -> f64 {
    normalize_angle(body.angular_velocity * elapsed_s)
}

/// Point on the orbit of `body` around `center` at the given phase
///
/// The result is always `body.orbit_radius` away from `center`.
pub fn compute_position(body: &Body, center: &Point2<f64>, phase: f64) -> Point2<f64> {
    *center + Vector2::new(phase.cos(), phase.sin()) * body.orbit_radius
}

/// Position of `body` after `elapsed_s` seconds
pub fn position_at(body: &Body, center: &Point2<f64>, elapsed_s: f64) -> Point2<f64> {
    compute_position(body, center, phase_at(body, elapsed_s))
}

/// Convert an elapsed time in seconds to a [`Duration`]
///
/// Negative, non-finite and out-of-range values fail with
/// [`CosmosError::InvalidTime`].
pub fn elapsed_from_secs(elapsed_s: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(elapsed_s).map_err(|_| CosmosError::InvalidTime(elapsed_s))
}
