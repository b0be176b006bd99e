//! Player commands sent from the frame driver to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Pull the trigger. Ignored while the gun is cooling down.
    Fire { origin: Vec3, aim: Vec3 },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Clear all actors, timers and score.
    Reset,
}
