//! Decorative star-field backdrop
//!
//! Generates a reproducible scattering of background stars behind the
//! orbit scene. Purely cosmetic; nothing here affects orbit positions.

use nalgebra::Point2;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::SCENE_SIZE;

/// One background star
#[derive(Debug, Clone, PartialEq)]
pub struct BackdropStar {
    pub position: Point2<f64>,
    pub radius: f64,
    /// Fill opacity in `[0.2, 1.0)`
    pub opacity: f64,
}

/// A generated set of background stars
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    pub width: f64,
    pub height: f64,
    pub stars: Vec<BackdropStar>,
}

/// Configuration for backdrop generation
#[derive(Debug, Clone)]
pub struct BackdropConfig {
    /// Number of stars to generate
    pub count: usize,
    /// Random seed for reproducibility
    pub seed: u64,
    pub width: f64,
    pub height: f64,
    /// Largest star radius
    pub max_radius: f64,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            count: 120,
            seed: 42,
            width: SCENE_SIZE,
            height: SCENE_SIZE,
            max_radius: 1.5,
        }
    }
}

impl BackdropConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of stars to generate
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set the random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the area the stars are scattered over
    pub fn with_extent(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Generate the backdrop
    ///
    /// The same configuration always yields the same stars.
    pub fn generate(&self) -> Backdrop {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let width = finite_at_least(self.width, 0.0);
        let height = finite_at_least(self.height, 0.0);
        let max_radius = finite_at_least(self.max_radius, MIN_STAR_RADIUS);

        // Unit samples scaled by the extent
        let unit = Uniform::new_inclusive(0.0, 1.0);
        let opacity_dist = Uniform::new(0.2, 1.0);

        let stars = (0..self.count)
            .map(|_| BackdropStar {
                position: Point2::new(
                    unit.sample(&mut rng) * width,
                    unit.sample(&mut rng) * height,
                ),
                radius: MIN_STAR_RADIUS + unit.sample(&mut rng) * (max_radius - MIN_STAR_RADIUS),
                opacity: opacity_dist.sample(&mut rng),
            })
            .collect();

        Backdrop {
            width,
            height,
            stars,
        }
    }
}

/// Smallest star radius
const MIN_STAR_RADIUS: f64 = 0.3;

/// `value` clamped up to `floor`; NaN and infinities become `floor`
fn finite_at_least(value: f64, floor: f64) -> f64 {
    if value.is_finite() {
        value.max(floor)
    } else {
        floor
    }
}
