//! Events emitted by the simulation for presentation and audio feedback.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::ActorId;

/// Gameplay events produced during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A new airplane entered the world.
    AirplaneSpawned { id: ActorId, position: Vec3 },
    /// The gun fired.
    BulletFired { id: ActorId, origin: Vec3, velocity: Vec3 },
    /// The gun was still cooling down; the shot was dropped.
    FireBlocked { cooldown_remaining: f32 },
    /// A bullet hit an airplane. Both are now dead.
    Hit {
        bullet: ActorId,
        airplane: ActorId,
        position: Vec3,
    },
    /// A bullet outlived its lifespan.
    BulletExpired { id: ActorId, position: Vec3 },
}
