use crate::error::{Result, SimError};

/// Upper bound on recorded frames per run
pub const MAX_FRAME_COUNT: usize = 10_000_000;

/// Parameters of one recorded run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Number of randomly generated bodies
    pub body_count: usize,
    /// Length of the recorded animation in seconds
    pub duration_secs: f64,
    /// Frames per second of animation; one step per frame
    pub frame_rate: u32,
    /// Simulation time advanced per frame
    pub time_step: f64,
    /// Seed for the body generator; `None` draws from the OS
    pub seed: Option<u64>,
    /// Optional heavy body added at the origin
    pub central_mass: Option<f64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            body_count: 50,
            duration_secs: 5.0,
            frame_rate: 60,
            time_step: 1.0,
            seed: None,
            central_mass: None,
        }
    }
}

impl RunConfig {
    pub fn frame_count(&self) -> usize {
        (self.duration_secs * self.frame_rate as f64) as usize
    }

    pub fn validate(&self) -> Result<()> {
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(SimError::config(format!(
                "duration must be a non-negative number of seconds, got {}",
                self.duration_secs
            )));
        }
        if self.frame_rate == 0 {
            return Err(SimError::config("frame rate must be at least 1"));
        }
        let frames = self.duration_secs * self.frame_rate as f64;
        if frames > MAX_FRAME_COUNT as f64 {
            return Err(SimError::config(format!(
                "{} s at {} fps needs {} frames, at most {} are allowed",
                self.duration_secs, self.frame_rate, frames, MAX_FRAME_COUNT
            )));
        }
        if !self.time_step.is_finite() {
            return Err(SimError::InvalidTimeStep { dt: self.time_step });
        }
        if let Some(mass) = self.central_mass {
            if !mass.is_finite() || mass <= 0.0 {
                return Err(SimError::InvalidMass { mass });
            }
        }
        Ok(())
    }
}
