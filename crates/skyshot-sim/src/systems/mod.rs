//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! Per-actor state lives in the `Airplane` and `Bullet` components; the few
//! engine-level timers they need are passed in by the engine.

pub mod cleanup;
pub mod collision;
pub mod fire_control;
pub mod movement;
pub mod snapshot;
pub mod spawner;
