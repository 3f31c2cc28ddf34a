//! Tests for the frame loop, trajectory buffer and run configuration

use glam::DVec3;
use nbody_core::tests::test_helpers::{body, mirrored_pair};
use nbody_core::{
    record_frames, simulate, BodyGenerator, FrameSink, RunConfig, SimError, Simulation,
    Trajectory, UniformBodyGenerator, MAX_FRAME_COUNT,
};

/// Sink that only remembers progress callbacks
#[derive(Default)]
struct ProgressLog {
    recorded: Vec<usize>,
    finished: Vec<(usize, usize)>,
}

impl FrameSink for ProgressLog {
    fn record(&mut self, frame: usize, _positions: &[DVec3]) {
        self.recorded.push(frame);
    }

    fn frame_finished(&mut self, completed: usize, total: usize) {
        self.finished.push((completed, total));
    }
}

fn small_config(seed: u64) -> RunConfig {
    RunConfig {
        body_count: 8,
        duration_secs: 1.0,
        frame_rate: 30,
        time_step: 0.5,
        seed: Some(seed),
        central_mass: None,
    }
}

#[test]
fn test_record_frames_snapshots_before_stepping() {
    let mut sim = mirrored_pair(10.0, 10.0);
    let initial = sim.snapshot();
    let mut trajectory = Trajectory::new();

    record_frames(&mut sim, 5, 0.1, &mut trajectory).unwrap();

    assert_eq!(trajectory.len(), 5);
    assert_eq!(trajectory.body_count(), 2);
    assert_eq!(trajectory.frame(0).unwrap(), initial.as_slice());
    // Five steps were applied but only the state before each was recorded
    assert!((sim.elapsed_time() - 0.5).abs() < 1e-12);
    assert_ne!(trajectory.frame(4).unwrap(), sim.snapshot().as_slice());
}

#[test]
fn test_trajectory_indexing() {
    let mut sim = Simulation::new(vec![
        body([1.0, 2.0, 3.0], [1.0, 0.0, 0.0], 1.0),
    ]);
    let mut trajectory = Trajectory::new();
    record_frames(&mut sim, 3, 1.0, &mut trajectory).unwrap();

    assert_eq!(trajectory.coordinate(0, 0, 0), Some(1.0));
    assert_eq!(trajectory.coordinate(0, 0, 2), Some(3.0));
    assert_eq!(trajectory.coordinate(2, 0, 0), Some(3.0));
    assert_eq!(trajectory.coordinate(0, 0, 3), None);
    assert_eq!(trajectory.coordinate(0, 1, 0), None);
    assert_eq!(trajectory.position(3, 0), None);
}

#[test]
fn test_trajectory_bounds() {
    let mut sim = mirrored_pair(10.0, 1.0);
    let mut trajectory = Trajectory::new();
    assert!(trajectory.bounds().is_none());

    record_frames(&mut sim, 2, 0.1, &mut trajectory).unwrap();
    let (lo, hi) = trajectory.bounds().unwrap();
    assert_eq!(lo, DVec3::new(-10.0, 0.0, 0.0));
    assert_eq!(hi, DVec3::new(10.0, 0.0, 0.0));
}

#[test]
fn test_progress_callbacks() {
    let mut sim = mirrored_pair(10.0, 10.0);
    let mut log = ProgressLog::default();

    record_frames(&mut sim, 3, 0.1, &mut log).unwrap();

    assert_eq!(log.recorded, vec![0, 1, 2]);
    assert_eq!(log.finished, vec![(1, 3), (2, 3), (3, 3)]);
}

#[test]
fn test_failed_step_keeps_earlier_frames() {
    let mut sim = Simulation::new(vec![
        body([0.0, 0.0, 0.0], [0.0, 0.0, 0.0], 1.0),
        body([0.0, 0.0, 0.0], [0.0, 0.0, 0.0], 1.0),
    ]);
    let mut trajectory = Trajectory::new();

    let result = record_frames(&mut sim, 10, 1.0, &mut trajectory);

    assert!(matches!(result, Err(SimError::DegenerateConfiguration { .. })));
    assert_eq!(trajectory.len(), 1);
}

#[test]
fn test_frame_count_from_duration() {
    let config = RunConfig::default();
    assert_eq!(config.frame_count(), 300);

    let config = RunConfig {
        duration_secs: 2.5,
        frame_rate: 24,
        ..RunConfig::default()
    };
    assert_eq!(config.frame_count(), 60);
}

#[test]
fn test_config_validation() {
    assert!(RunConfig::default().validate().is_ok());

    let bad_rate = RunConfig {
        frame_rate: 0,
        ..RunConfig::default()
    };
    assert!(matches!(bad_rate.validate(), Err(SimError::InvalidConfig(_))));

    let bad_duration = RunConfig {
        duration_secs: -1.0,
        ..RunConfig::default()
    };
    assert!(matches!(bad_duration.validate(), Err(SimError::InvalidConfig(_))));

    let bad_dt = RunConfig {
        time_step: f64::NAN,
        ..RunConfig::default()
    };
    assert!(matches!(bad_dt.validate(), Err(SimError::InvalidTimeStep { .. })));

    let bad_center = RunConfig {
        central_mass: Some(0.0),
        ..RunConfig::default()
    };
    assert!(matches!(bad_center.validate(), Err(SimError::InvalidMass { .. })));
}

#[test]
fn test_generator_respects_ranges() {
    let mut generator = UniformBodyGenerator::seeded(7);
    let bodies = generator.generate(500).unwrap();

    assert_eq!(bodies.len(), 500);
    for b in &bodies {
        assert!(b.position().abs().max_element() <= 200.0);
        assert!(b.velocity().abs().max_element() <= 1.0);
        assert!(b.mass() > 0.0 && b.mass() < 10.0);
    }
}

#[test]
fn test_generator_custom_ranges() {
    let mut generator = UniformBodyGenerator::seeded(3)
        .with_position_extent(5.0)
        .and_then(|g| g.with_speed_limit(0.1))
        .and_then(|g| g.with_max_mass(2.0))
        .unwrap();

    for b in generator.generate(100).unwrap() {
        assert!(b.position().abs().max_element() <= 5.0);
        assert!(b.velocity().abs().max_element() <= 0.1);
        assert!(b.mass() < 2.0);
    }

    assert!(UniformBodyGenerator::seeded(3).with_max_mass(0.0).is_err());
    assert!(UniformBodyGenerator::seeded(3).with_position_extent(-1.0).is_err());
}

#[test]
fn test_seeded_runs_are_identical() {
    let config = small_config(42);

    let (sim_a, traj_a) = simulate(&config, &mut UniformBodyGenerator::seeded(42)).unwrap();
    let (sim_b, traj_b) = simulate(&config, &mut UniformBodyGenerator::seeded(42)).unwrap();

    assert_eq!(traj_a.len(), config.frame_count());
    assert_eq!(traj_a.frames(), traj_b.frames());
    assert_eq!(sim_a.snapshot(), sim_b.snapshot());
}

#[test]
fn test_different_seeds_differ() {
    let config = small_config(1);
    let (_, traj_a) = simulate(&config, &mut UniformBodyGenerator::seeded(1)).unwrap();
    let (_, traj_b) = simulate(&config, &mut UniformBodyGenerator::seeded(2)).unwrap();

    assert_ne!(traj_a.frame(0), traj_b.frame(0));
}

#[test]
fn test_central_body_is_appended() {
    let config = RunConfig {
        central_mass: Some(50.0),
        ..small_config(9)
    };
    let (sim, trajectory) = simulate(&config, &mut UniformBodyGenerator::seeded(9)).unwrap();

    assert_eq!(sim.len(), 9);
    assert_eq!(trajectory.body_count(), 9);
    assert_eq!(sim.bodies()[8].mass(), 50.0);
    assert_eq!(trajectory.position(0, 8), Some(DVec3::ZERO));
}

#[test]
fn test_zero_duration_records_nothing() {
    let config = RunConfig {
        duration_secs: 0.0,
        ..small_config(5)
    };
    let (sim, trajectory) = simulate(&config, &mut UniformBodyGenerator::seeded(5)).unwrap();

    assert!(trajectory.is_empty());
    assert_eq!(sim.elapsed_time(), 0.0);
    assert_eq!(sim.len(), 8);
}

#[test]
fn test_oversized_run_is_rejected_before_allocating() {
    for duration_secs in [1e18, 1e9] {
        let config = RunConfig {
            body_count: 2,
            duration_secs,
            ..RunConfig::default()
        };
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));

        let result = simulate(&config, &mut UniformBodyGenerator::seeded(1));
        assert!(
            matches!(result, Err(SimError::InvalidConfig(_))),
            "duration {} should be rejected",
            duration_secs
        );
    }
}

#[test]
fn test_frame_limit_is_inclusive() {
    let at_limit = RunConfig {
        duration_secs: MAX_FRAME_COUNT as f64,
        frame_rate: 1,
        ..RunConfig::default()
    };
    assert!(at_limit.validate().is_ok());

    let over_limit = RunConfig {
        duration_secs: MAX_FRAME_COUNT as f64 + 1.0,
        ..at_limit
    };
    assert!(matches!(over_limit.validate(), Err(SimError::InvalidConfig(_))));
}
