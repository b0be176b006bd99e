//! SKYSHOT headless frame driver.
//!
//! This crate wires the simulation to a command line: it loads config,
//! initializes logging, drives the engine frame by frame with an autopilot
//! gunner standing in for mouse input, and reports what happened.

pub mod cli;
pub mod game_loop;
pub mod gunner;
pub mod logging;
pub mod state;

pub use skyshot_core as core;
