//! `skyshot` binary: runs the simulation headless from the command line and
//! logs a summary of the run.

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec3;

use skyshot_app::cli::Cli;
use skyshot_app::game_loop::{self, LoopSettings};
use skyshot_app::gunner::Gunner;
use skyshot_app::logging;
use skyshot_core::config::SimConfig;
use skyshot_sim::SimulationEngine;

/// Where the autopilot gunner stands.
const GUNNER_ORIGIN: Vec3 = Vec3::new(0.0, 4.0, 0.0);

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimConfig::default(),
    };
    if cli.random {
        config.seed = None;
    } else if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    match config.seed {
        Some(seed) => log::info!("seed {seed}"),
        None => log::info!("seeding from system entropy"),
    }

    let gunner = (cli.fire_interval > 0.0)
        .then(|| Gunner::new(GUNNER_ORIGIN, cli.fire_interval, config.ballistics));
    let mut engine = SimulationEngine::try_new(config).context("invalid simulation config")?;

    let settings = LoopSettings {
        frame_rate: cli.fps,
        duration_secs: cli.seconds,
        realtime: cli.realtime,
    };
    let summary = game_loop::run(&mut engine, settings, gunner);

    let score = summary.score;
    log::info!(
        "{} frames, {:.1}s simulated: {} airplanes spawned, {} shots ({} blocked), {} hits ({:.0}% accuracy), {} bullets expired",
        summary.frames,
        summary.sim_secs,
        score.airplanes_spawned,
        score.shots_fired,
        score.shots_blocked,
        score.hits,
        summary.accuracy() * 100.0,
        score.bullets_expired,
    );
    log::info!(
        "peak {} airplanes, {} bullets alive",
        summary.peak_live_airplanes,
        summary.peak_live_bullets
    );

    if cli.snapshot_json {
        let json = serde_json::to_string_pretty(&summary.final_snapshot)
            .context("serializing final snapshot")?;
        println!("{json}");
    }

    Ok(())
}
