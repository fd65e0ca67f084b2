//! coursebot-sim - run a course on the simulated robot
//!
//! ```text
//! coursebot-sim course.toml               # drive the route
//! coursebot-sim course.toml --calibrate   # record the waypoints first
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use coursebot_sim::runner::{record_course, run_route};
use coursebot_sim::{SimConfig, Simulation};
use tracing::{error, info};

#[derive(Parser)]
#[clap(version, about = "Drive a coursebot route in simulation")]
struct Opts {
    /// Course configuration file
    #[clap(default_value = "course.toml")]
    config: PathBuf,
    /// Record the waypoint placements to the point table instead of driving
    #[clap(long)]
    calibrate: bool,
    /// Override the point table file
    #[clap(long)]
    points: Option<PathBuf>,
    /// Split every leg at its midpoint
    #[clap(long)]
    mid_course: bool,
}

fn run(opts: Opts) -> coursebot_sim::Result<()> {
    info!("Loading configuration from {:?}", opts.config);
    let mut config = SimConfig::load(&opts.config)?;
    if let Some(points) = opts.points {
        config.course.points = points;
    }
    if opts.mid_course {
        config.course.mid_course = true;
    }

    let sim = Simulation::new(&config.world, config.motion.geometry);

    if opts.calibrate {
        let records = record_course(&config, &sim)?;
        info!(
            "Recorded {} waypoints to {}",
            records.len(),
            config.course.points.display()
        );
        return Ok(());
    }

    let arrivals = run_route(&config, &sim)?;
    let worst = arrivals
        .iter()
        .map(|a| a.position_error())
        .fold(0.0f32, f32::max);
    let elapsed = sim.world().borrow().now_ms();
    info!(
        "Route of {} stops done in {:.1} s simulated, worst miss {:.3} in",
        arrivals.len(),
        elapsed as f64 / 1000.0,
        worst
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run(Opts::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
