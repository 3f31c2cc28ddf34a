//! Errors surfaced by body construction and time stepping

use thiserror::Error;

/// Every failure the physics core can report
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid mass {mass}: mass must be finite and greater than zero")]
    InvalidMass { mass: f64 },

    #[error("non-finite {what} supplied for body")]
    NonFiniteState { what: &'static str },

    #[error(
        "degenerate configuration: bodies {first} and {second} are {separation} apart"
    )]
    DegenerateConfiguration {
        first: usize,
        second: usize,
        separation: f64,
    },

    #[error("invalid time step {dt}: dt must be finite")]
    InvalidTimeStep { dt: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SimError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
