pub mod body;
pub mod config;
pub mod error;
pub mod generator;
pub mod observables;
pub mod simulation;
pub mod trajectory;

pub use body::{Body, StagedUpdate};
pub use config::{RunConfig, MAX_FRAME_COUNT};
pub use error::{Result, SimError};
pub use generator::{central_body, BodyGenerator, UniformBodyGenerator};
pub use observables::Observable;
pub use simulation::{Simulation, Snapshot, DEFAULT_MIN_SEPARATION};
pub use trajectory::{record_frames, simulate, simulate_into, FrameSink, Trajectory};

// Re-exported so callers build vectors with the same type the core uses
pub use glam::DVec3;
