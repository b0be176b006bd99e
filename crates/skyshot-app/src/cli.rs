//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

use skyshot_core::constants::DEFAULT_FRAME_RATE;

/// Run the SKYSHOT simulation headless and report the outcome.
#[derive(Debug, Clone, Parser)]
#[command(name = "skyshot", version)]
pub struct Cli {
    /// Simulated seconds to run.
    #[arg(long, default_value_t = 30.0)]
    pub seconds: f32,

    /// Frames per simulated second; dt is 1/fps.
    #[arg(long, default_value_t = DEFAULT_FRAME_RATE)]
    pub fps: u32,

    /// RNG seed. Overrides the config file.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Seed from system entropy instead of a fixed seed.
    #[arg(long, conflicts_with = "seed")]
    pub random: bool,

    /// JSON config file. Missing fields use defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seconds between autopilot trigger pulls. 0 disables the gunner.
    #[arg(long, default_value_t = 0.35)]
    pub fire_interval: f32,

    /// Pace frames against the wall clock.
    #[arg(long)]
    pub realtime: bool,

    /// Print the final world snapshot as JSON on stdout.
    #[arg(long)]
    pub snapshot_json: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}
