use crate::body::Body;
use crate::error::{Result, SimError};
use glam::DVec3;
use log::{trace, warn};

/// Positions of every body at one instant, in collection order
pub type Snapshot = Vec<DVec3>;

/// Separation at or below which a pair counts as coincident.
/// Zero means only exactly overlapping bodies are rejected.
pub const DEFAULT_MIN_SEPARATION: f64 = 0.0;

/// A system of gravitating bodies advanced in fixed steps
#[derive(Debug, Clone)]
pub struct Simulation {
    bodies: Vec<Body>,
    elapsed_time: f64,
    steps_taken: u64,
    min_separation: f64,
}

impl Simulation {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self {
            bodies,
            elapsed_time: 0.0,
            steps_taken: 0,
            min_separation: DEFAULT_MIN_SEPARATION,
        }
    }

    pub fn with_min_separation(mut self, min_separation: f64) -> Self {
        self.min_separation = min_separation.max(0.0);
        self
    }

    /// Append a body. Must not be called while a step is in progress,
    /// which `&mut self` already rules out.
    pub fn add(&mut self, body: Body) {
        self.bodies.push(body);
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn min_separation(&self) -> f64 {
        self.min_separation
    }

    /// Net acceleration on body `idx` from every other body, or `None`
    /// when there is no such body
    pub fn net_acceleration(&self, idx: usize) -> Option<Result<DVec3>> {
        let body = self.bodies.get(idx)?;
        Some(self.accumulate_acceleration(idx, body))
    }

    /// Contributions are summed in collection order, skipping `idx`
    fn accumulate_acceleration(&self, idx: usize, body: &Body) -> Result<DVec3> {
        let mut accel = DVec3::ZERO;

        for (other_idx, other) in self.bodies.iter().enumerate() {
            if other_idx == idx {
                continue;
            }
            match body.acceleration_due_to_within(other, self.min_separation) {
                Some(a) => accel += a,
                None => {
                    return Err(SimError::DegenerateConfiguration {
                        first: idx.min(other_idx),
                        second: idx.max(other_idx),
                        separation: body.position().distance(other.position()),
                    })
                }
            }
        }

        Ok(accel)
    }

    /// Advance every body by `dt`
    ///
    /// All accelerations come from the positions at the start of the call.
    /// On error nothing is staged or committed and the clock does not move.
    pub fn step(&mut self, dt: f64) -> Result<()> {
        if !dt.is_finite() {
            return Err(SimError::InvalidTimeStep { dt });
        }

        // Force pass: read-only over the pre-step positions
        let accelerations = match self
            .bodies
            .iter()
            .enumerate()
            .map(|(i, body)| self.accumulate_acceleration(i, body))
            .collect::<Result<Vec<_>>>()
        {
            Ok(accelerations) => accelerations,
            Err(e) => {
                warn!("step rejected at t = {}: {}", self.elapsed_time, e);
                return Err(e);
            }
        };

        for (body, accel) in self.bodies.iter_mut().zip(accelerations) {
            body.stage_update(accel, dt);
        }
        for body in self.bodies.iter_mut() {
            body.commit();
        }

        self.elapsed_time += dt;
        self.steps_taken += 1;
        trace!(
            "step {} done, t = {}, {} bodies",
            self.steps_taken,
            self.elapsed_time,
            self.bodies.len()
        );

        Ok(())
    }

    /// Copy out the current positions
    pub fn snapshot(&self) -> Snapshot {
        self.bodies.iter().map(Body::position).collect()
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<Body>> for Simulation {
    fn from(bodies: Vec<Body>) -> Self {
        Self::new(bodies)
    }
}
