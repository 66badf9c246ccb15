//! Body catalog for the orbit renderer
//!
//! This module provides the fixed catalog of bodies circling the Sun in the
//! animation. Each entry carries its display parameters and an explicit
//! angular velocity in radians per second, so the model does not depend on
//! any particular animation technology.

use lazy_static::lazy_static;
use serde::Serialize;

use crate::constants::{RATE_EXPONENT, REFERENCE_PERIOD_S, REFERENCE_RADIUS, TAU};
use crate::{CosmosError, Result};

lazy_static! {
    /// The inner solar system catalog, built once and never mutated
    pub static ref SOLAR_SYSTEM: BodyCatalog = BodyCatalog::default();
}

/// Angular velocity (rad/s) assigned to an orbit of the given radius
///
/// Strictly decreasing in `radius`: closer orbits always revolve faster.
/// Shaped after Kepler's third law and scaled so that an orbit of
/// [`REFERENCE_RADIUS`] completes one revolution in [`REFERENCE_PERIOD_S`].
pub fn orbital_rate(radius: f64) -> f64 {
    (TAU / REFERENCE_PERIOD_S) * (REFERENCE_RADIUS / radius).powf(RATE_EXPONENT)
}

/// A body orbiting the common center
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Body {
    /// Display label, unique within a catalog
    pub name: String,
    /// Display color (CSS color string)
    pub color: String,
    /// Rendered diameter in scene units
    pub size: f64,
    /// Distance from the center in scene units
    pub orbit_radius: f64,
    /// Angular velocity in radians per second
    pub angular_velocity: f64,
    /// Short description of the body
    pub description: String,
}

impl Body {
    /// Create a new body whose rate follows [`orbital_rate`]
    pub fn new(name: &str, color: &str, size: f64, orbit_radius: f64, description: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            size,
            orbit_radius,
            angular_velocity: orbital_rate(orbit_radius),
            description: description.to_string(),
        }
    }

    /// Override the angular velocity (rad/s)
    pub fn with_angular_velocity(mut self, angular_velocity: f64) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Seconds per revolution
    pub fn period(&self) -> f64 {
        TAU / self.angular_velocity
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CosmosError::InvalidCatalog(
                "body name must not be empty".to_string(),
            ));
        }

        let checks = [
            ("size", self.size),
            ("orbit radius", self.orbit_radius),
            ("angular velocity", self.angular_velocity),
        ];
        for (field, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(CosmosError::InvalidCatalog(format!(
                    "{} of {} must be positive, got {}",
                    field, self.name, value
                )));
            }
        }

        Ok(())
    }
}

/// Ordered, validated collection of bodies
#[derive(Debug, Clone, PartialEq)]
pub struct BodyCatalog {
    bodies: Vec<Body>,
}

impl Default for BodyCatalog {
    /// Mercury, Venus and Earth as shown in the simulation view
    fn default() -> Self {
        Self {
            bodies: create_inner_planets(),
        }
    }
}

impl BodyCatalog {
    /// Build a catalog, rejecting entries that break the catalog invariants
    ///
    /// Names must be non-empty and unique (case-insensitive), all sizes, radii
    /// and rates strictly positive, no two bodies may share an orbit radius,
    /// and a body closer to the center must revolve strictly faster than any
    /// body farther out.
    pub fn new(bodies: Vec<Body>) -> Result<Self> {
        for (i, body) in bodies.iter().enumerate() {
            body.validate()?;

            if bodies[..i]
                .iter()
                .any(|other| other.name.eq_ignore_ascii_case(&body.name))
            {
                return Err(CosmosError::InvalidCatalog(format!(
                    "duplicate body name: {}",
                    body.name
                )));
            }
        }

        let mut by_radius: Vec<&Body> = bodies.iter().collect();
        by_radius.sort_by(|a, b| a.orbit_radius.total_cmp(&b.orbit_radius));

        for pair in by_radius.windows(2) {
            let (inner, outer) = (pair[0], pair[1]);
            if inner.orbit_radius == outer.orbit_radius {
                return Err(CosmosError::InvalidCatalog(format!(
                    "{} and {} share orbit radius {}",
                    inner.name, outer.name, inner.orbit_radius
                )));
            }
            if inner.angular_velocity <= outer.angular_velocity {
                return Err(CosmosError::InvalidCatalog(format!(
                    "{} orbits inside {} but is not faster ({} <= {} rad/s)",
                    inner.name, outer.name, inner.angular_velocity, outer.angular_velocity
                )));
            }
        }

        Ok(Self { bodies })
    }

    /// Get a body by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&Body> {
        self.bodies
            .iter()
            .find(|body| body.name.eq_ignore_ascii_case(name))
    }

    /// Get a body by name, failing with [`CosmosError::UnknownBody`]
    pub fn require(&self, name: &str) -> Result<&Body> {
        self.get(name)
            .ok_or_else(|| CosmosError::UnknownBody(name.to_string()))
    }

    /// Iterate in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    /// Get count of bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl<'a> IntoIterator for &'a BodyCatalog {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Create the inner planet entries
fn create_inner_planets() -> Vec<Body> {
    vec![
        Body::new(
            "Mercury",
            "#a8a29e",
            12.0,
            60.0,
            "The smallest planet in the Solar System and the closest to the Sun.",
        ),
        Body::new(
            "Venus",
            "#fdba74",
            18.0,
            100.0,
            "The second planet from the Sun. It is the hottest planet in our solar system.",
        ),
        Body::new(
            "Earth",
            "#3b82f6",
            20.0,
            150.0,
            "Our home planet. The only place we know of so far that's inhabited by living things.",
        ),
    ]
}
