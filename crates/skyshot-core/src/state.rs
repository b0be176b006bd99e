//! World state snapshot: the complete visible state handed to a renderer each tick.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::EnginePhase;
use crate::events::SimEvent;
use crate::types::{ActorId, SimTime};

/// Complete world state produced after each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub phase: EnginePhase,
    pub airplanes: Vec<AirplaneView>,
    pub bullets: Vec<BulletView>,
    /// Shared propeller angle for all airplane meshes (degrees, 0..360).
    pub propeller_deg: f32,
    pub events: Vec<SimEvent>,
    pub score: ScoreView,
}

/// A live airplane, ready to be drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirplaneView {
    pub id: ActorId,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Cosmetic roll (degrees).
    pub bank_deg: f32,
    /// Current yaw rate (deg/s).
    pub yaw_rate: f32,
    /// Rotation about world up aligning the mesh with its velocity.
    pub yaw_matrix: Mat4,
}

/// A live bullet, ready to be drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub id: ActorId,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Seconds since firing.
    pub age: f32,
}

/// Running totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    pub airplanes_spawned: u32,
    pub shots_fired: u32,
    pub shots_blocked: u32,
    pub hits: u32,
    pub bullets_expired: u32,
}

impl WorldSnapshot {
    /// Number of live actors of both kinds.
    pub fn live_actor_count(&self) -> usize {
        self.airplanes.len() + self.bullets.len()
    }
}
