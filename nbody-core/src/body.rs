use crate::error::{Result, SimError};
use glam::DVec3;

/// Kinematic deltas computed by [`Body::stage_update`] and not yet applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StagedUpdate {
    pub position_delta: DVec3,
    pub velocity_delta: DVec3,
}

/// A point mass
///
/// Position and velocity only change through the stage/commit pair, so a
/// body never observes another body's half-finished step.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    position: DVec3,
    velocity: DVec3,
    mass: f64,
    staged: Option<StagedUpdate>,
}

impl Body {
    pub fn new(position: DVec3, velocity: DVec3, mass: f64) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(SimError::InvalidMass { mass });
        }
        if !position.is_finite() {
            return Err(SimError::NonFiniteState { what: "position" });
        }
        if !velocity.is_finite() {
            return Err(SimError::NonFiniteState { what: "velocity" });
        }

        Ok(Self {
            position,
            velocity,
            mass,
            staged: None,
        })
    }

    /// A body with zero velocity
    pub fn at_rest(position: DVec3, mass: f64) -> Result<Self> {
        Self::new(position, DVec3::ZERO, mass)
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn velocity(&self) -> DVec3 {
        self.velocity
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn staged(&self) -> Option<&StagedUpdate> {
        self.staged.as_ref()
    }

    pub fn momentum(&self) -> DVec3 {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Gravitational acceleration this body feels from `other` (G = 1)
    ///
    /// Returns `None` when the two positions coincide, since the inverse
    /// square law is singular there.
    pub fn acceleration_due_to(&self, other: &Body) -> Option<DVec3> {
        self.acceleration_due_to_within(other, 0.0)
    }

    /// Like [`Body::acceleration_due_to`], but also treats any separation at
    /// or below `min_separation` as degenerate.
    pub fn acceleration_due_to_within(&self, other: &Body, min_separation: f64) -> Option<DVec3> {
        let r = self.position - other.position;
        let dist = r.length();
        if dist <= min_separation || dist == 0.0 {
            return None;
        }

        let accel = -other.mass * r / dist.powi(3);
        // Separations near the bottom of the f64 range can still overflow
        accel.is_finite().then_some(accel)
    }

    /// Compute the pending update for `net_acceleration` over `dt`
    ///
    /// Position uses the pre-update velocity:
    /// dx = a dt^2 / 2 + v dt, dv = a dt
    pub fn stage_update(&mut self, net_acceleration: DVec3, dt: f64) {
        self.staged = Some(StagedUpdate {
            velocity_delta: net_acceleration * dt,
            position_delta: 0.5 * net_acceleration * (dt * dt) + self.velocity * dt,
        });
    }

    /// Apply the staged update, if any
    pub fn commit(&mut self) {
        if let Some(update) = self.staged.take() {
            self.velocity += update.velocity_delta;
            self.position += update.position_delta;
        }
    }

    /// Drop a staged update without applying it
    pub fn discard_staged(&mut self) {
        self.staged = None;
    }
}
