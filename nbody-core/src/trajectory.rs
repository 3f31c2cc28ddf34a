//! Recording runs frame by frame

use crate::config::RunConfig;
use crate::error::Result;
use crate::generator::{central_body, BodyGenerator};
use crate::simulation::{Simulation, Snapshot};
use glam::DVec3;
use log::{debug, info};

/// Consumer of recorded frames
pub trait FrameSink {
    /// Positions of every body at the start of frame `frame`
    fn record(&mut self, frame: usize, positions: &[DVec3]);

    /// Called once the step following frame `completed - 1` has finished
    fn frame_finished(&mut self, _completed: usize, _total: usize) {}
}

/// In-memory trajectory indexed `[frame][body][axis]`
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    frames: Vec<Snapshot>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(frames: usize) -> Self {
        Self {
            frames: Vec::with_capacity(frames),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Snapshot] {
        &self.frames
    }

    pub fn frame(&self, frame: usize) -> Option<&[DVec3]> {
        self.frames.get(frame).map(Vec::as_slice)
    }

    /// Number of bodies in the first frame
    pub fn body_count(&self) -> usize {
        self.frames.first().map_or(0, Vec::len)
    }

    pub fn position(&self, frame: usize, body: usize) -> Option<DVec3> {
        self.frames.get(frame)?.get(body).copied()
    }

    /// Single coordinate; `axis` is 0, 1 or 2
    pub fn coordinate(&self, frame: usize, body: usize, axis: usize) -> Option<f64> {
        let p = self.position(frame, body)?;
        p.to_array().get(axis).copied()
    }

    /// Component-wise min and max over every recorded position
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        let mut iter = self.frames.iter().flatten();
        let first = *iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))))
    }
}

impl FrameSink for Trajectory {
    fn record(&mut self, _frame: usize, positions: &[DVec3]) {
        self.frames.push(positions.to_vec());
    }
}

/// Record `frames` frames: snapshot, then step by `dt`
///
/// A failed step stops the run; frames recorded before it stay in `sink`.
pub fn record_frames<S: FrameSink + ?Sized>(
    sim: &mut Simulation,
    frames: usize,
    dt: f64,
    sink: &mut S,
) -> Result<()> {
    for frame in 0..frames {
        let snapshot = sim.snapshot();
        sink.record(frame, &snapshot);
        sim.step(dt)?;
        sink.frame_finished(frame + 1, frames);
        debug!("frame {}/{} computed, t = {}", frame + 1, frames, sim.elapsed_time());
    }
    Ok(())
}

/// Build a system from `generator` and record a full run into `sink`
pub fn simulate_into<G, S>(config: &RunConfig, generator: &mut G, sink: &mut S) -> Result<Simulation>
where
    G: BodyGenerator + ?Sized,
    S: FrameSink + ?Sized,
{
    config.validate()?;

    let mut sim = Simulation::new(generator.generate(config.body_count)?);
    if let Some(mass) = config.central_mass {
        sim.add(central_body(mass)?);
    }

    let frames = config.frame_count();
    info!(
        "simulating {} bodies for {} frames (dt = {})",
        sim.len(),
        frames,
        config.time_step
    );
    record_frames(&mut sim, frames, config.time_step, sink)?;
    Ok(sim)
}

/// Like [`simulate_into`], collecting into a fresh [`Trajectory`]
pub fn simulate<G>(config: &RunConfig, generator: &mut G) -> Result<(Simulation, Trajectory)>
where
    G: BodyGenerator + ?Sized,
{
    config.validate()?;
    let mut trajectory = Trajectory::with_capacity(config.frame_count());
    let sim = simulate_into(config, generator, &mut trajectory)?;
    Ok((sim, trajectory))
}
