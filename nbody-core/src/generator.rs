//! Random initial conditions

use crate::body::Body;
use crate::error::{Result, SimError};
use glam::DVec3;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of initial bodies for a run
pub trait BodyGenerator {
    fn generate(&mut self, count: usize) -> Result<Vec<Body>>;
}

/// Uniformly distributed positions, velocities and masses
///
/// Defaults: positions in [-200, 200) per axis, velocities in [-1, 1) per
/// axis, masses in (0, 10).
#[derive(Debug, Clone)]
pub struct UniformBodyGenerator {
    rng: StdRng,
    position_extent: f64,
    speed_limit: f64,
    max_mass: f64,
}

pub const DEFAULT_POSITION_EXTENT: f64 = 200.0;
pub const DEFAULT_SPEED_LIMIT: f64 = 1.0;
pub const DEFAULT_MAX_MASS: f64 = 10.0;

impl UniformBodyGenerator {
    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            position_extent: DEFAULT_POSITION_EXTENT,
            speed_limit: DEFAULT_SPEED_LIMIT,
            max_mass: DEFAULT_MAX_MASS,
        }
    }

    /// Reproducible stream for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Seeded when `seed` is given, OS-seeded otherwise
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn with_position_extent(mut self, extent: f64) -> Result<Self> {
        self.position_extent = positive("position extent", extent)?;
        Ok(self)
    }

    pub fn with_speed_limit(mut self, limit: f64) -> Result<Self> {
        self.speed_limit = positive("speed limit", limit)?;
        Ok(self)
    }

    pub fn with_max_mass(mut self, max_mass: f64) -> Result<Self> {
        self.max_mass = positive("max mass", max_mass)?;
        Ok(self)
    }

    fn sample_vec(&mut self, half_width: f64) -> DVec3 {
        DVec3::new(
            self.rng.random_range(-half_width..half_width),
            self.rng.random_range(-half_width..half_width),
            self.rng.random_range(-half_width..half_width),
        )
    }

    fn sample_mass(&mut self) -> f64 {
        loop {
            let m = self.rng.random_range(0.0..self.max_mass);
            if m > 0.0 {
                return m;
            }
        }
    }
}

impl BodyGenerator for UniformBodyGenerator {
    fn generate(&mut self, count: usize) -> Result<Vec<Body>> {
        (0..count)
            .map(|_| {
                let position = self.sample_vec(self.position_extent);
                let velocity = self.sample_vec(self.speed_limit);
                let mass = self.sample_mass();
                Body::new(position, velocity, mass)
            })
            .collect()
    }
}

/// A stationary heavy body at the origin, e.g. a galactic or stellar center
pub fn central_body(mass: f64) -> Result<Body> {
    Body::at_rest(DVec3::ZERO, mass)
}

fn positive(what: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::config(format!("{what} must be positive, got {value}")))
    }
}
