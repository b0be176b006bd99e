//! Logger setup for the headless driver.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Default filter for the skyshot crates at `level`; other crates stay at warn.
fn default_filter(level: LevelFilter) -> String {
    format!("warn,skyshot_core={level},skyshot_sim={level},skyshot_app={level}")
}

/// Initializes the global logger.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` turns on per-wave and
/// per-shot debug output from the simulation.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter(level)));
    builder.format_timestamp_millis();

    // Fails only if a logger is already installed, which tests may do.
    let _ = builder.try_init();
}
