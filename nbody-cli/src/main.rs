use clap::{Args, Parser, Subcommand};
use log::info;
use nbody_core::observables::evaluate;
use nbody_core::{
    simulate_into, DVec3, FrameSink, RunConfig, Simulation, Trajectory, UniformBodyGenerator,
};
use std::io::Write;

mod viewer;

#[derive(Parser)]
#[command(name = "nbody")]
#[command(about = "N-body gravity simulator with 3D playback", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate and print whole-system readings at the end
    Run(RunArgs),
    /// Simulate, then play the recorded trajectory in a window
    View(RunArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Number of randomly generated bodies
    #[arg(short = 'n', long = "bodies", default_value_t = 50)]
    bodies: usize,

    /// Length of the animation in seconds
    #[arg(short = 't', long = "duration", default_value_t = 5.0)]
    duration: f64,

    /// Animation frame rate; one simulation step per frame
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Simulation time advanced per frame
    #[arg(long, default_value_t = 1.0)]
    dt: f64,

    /// Seed for reproducible initial conditions
    #[arg(long)]
    seed: Option<u64>,

    /// Add a stationary body of this mass at the origin
    #[arg(long)]
    central_mass: Option<f64>,

    /// Suppress the per-frame progress line
    #[arg(short, long)]
    quiet: bool,
}

impl RunArgs {
    fn config(&self) -> RunConfig {
        RunConfig {
            body_count: self.bodies,
            duration_secs: self.duration,
            frame_rate: self.fps,
            time_step: self.dt,
            seed: self.seed,
            central_mass: self.central_mass,
        }
    }
}

/// Collects frames and rewrites a progress line on stderr
struct ProgressSink {
    trajectory: Trajectory,
    quiet: bool,
}

impl FrameSink for ProgressSink {
    fn record(&mut self, frame: usize, positions: &[DVec3]) {
        self.trajectory.record(frame, positions);
    }

    fn frame_finished(&mut self, completed: usize, total: usize) {
        if self.quiet {
            return;
        }
        let percent = completed as f64 * 100.0 / total as f64;
        let mut stderr = std::io::stderr();
        // Progress output is best effort
        let _ = write!(stderr, "\rComputing frame {}/{}     {:.1}%", completed, total, percent);
        let _ = stderr.flush();
        if completed == total {
            let _ = writeln!(stderr);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => run(&args),
        Commands::View(args) => view(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Everything a finished run produced
struct Recording {
    config: RunConfig,
    sim: Simulation,
    trajectory: Trajectory,
}

fn record(args: &RunArgs) -> Result<Recording, Box<dyn std::error::Error>> {
    let config = args.config();
    config.validate()?;
    let mut generator = UniformBodyGenerator::from_seed(config.seed);
    let mut sink = ProgressSink {
        trajectory: Trajectory::with_capacity(config.frame_count()),
        quiet: args.quiet,
    };

    let sim = simulate_into(&config, &mut generator, &mut sink)?;
    info!(
        "recorded {} frames, t = {}",
        sink.trajectory.len(),
        sim.elapsed_time()
    );
    Ok(Recording {
        config,
        sim,
        trajectory: sink.trajectory,
    })
}

fn run(args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let recording = record(args)?;

    for reading in evaluate(&recording.sim) {
        println!("{} = {}", reading.name, reading.value);
    }

    Ok(())
}

fn view(args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let Recording {
        config,
        sim,
        trajectory,
    } = record(args)?;
    let masses: Vec<f64> = sim.bodies().iter().map(|b| b.mass()).collect();

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "nbody",
        options,
        Box::new(move |cc| {
            Ok(Box::new(viewer::PlaybackApp::new(
                trajectory,
                masses,
                config.frame_rate,
                cc,
            )))
        }),
    )?;

    Ok(())
}
