//! Simulation engine for SKYSHOT.
//!
//! Owns the hecs ECS world holding airplanes and bullets, advances them
//! with a caller-supplied delta time, resolves hits, and produces
//! `WorldSnapshot`s for a renderer.

pub mod airplane;
pub mod bullet;
pub mod dice;
pub mod engine;
pub mod systems;
pub mod world_setup;

pub use skyshot_core as core;
pub use airplane::Airplane;
pub use bullet::Bullet;
pub use dice::{ChaChaDice, ScriptedDice, TernaryDice};
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
