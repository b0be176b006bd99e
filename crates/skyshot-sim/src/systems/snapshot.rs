//! Snapshot system: queries the ECS world and builds a `WorldSnapshot`.
//!
//! This system is read-only; it never modifies the world. Dead actors that
//! are still awaiting compaction are left out.

use hecs::World;

use skyshot_core::enums::EnginePhase;
use skyshot_core::events::SimEvent;
use skyshot_core::state::{AirplaneView, BulletView, ScoreView, WorldSnapshot};
use skyshot_core::types::SimTime;

use crate::airplane::Airplane;
use crate::bullet::Bullet;
use crate::world_setup::actor_id;

/// Build a complete snapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: SimTime,
    phase: EnginePhase,
    propeller_deg: f32,
    events: Vec<SimEvent>,
    score: ScoreView,
) -> WorldSnapshot {
    WorldSnapshot {
        time,
        phase,
        airplanes: build_airplanes(world),
        bullets: build_bullets(world),
        propeller_deg,
        events,
        score,
    }
}

fn build_airplanes(world: &World) -> Vec<AirplaneView> {
    let mut views: Vec<AirplaneView> = world
        .query::<&Airplane>()
        .iter()
        .filter(|(_, plane)| plane.is_alive())
        .map(|(entity, plane)| AirplaneView {
            id: actor_id(entity),
            position: plane.position(),
            velocity: plane.velocity(),
            bank_deg: plane.bank_angle(),
            yaw_rate: plane.yaw_rate(),
            yaw_matrix: plane.velocity_yaw_matrix(),
        })
        .collect();
    views.sort_by_key(|v| v.id.0);
    views
}

fn build_bullets(world: &World) -> Vec<BulletView> {
    let mut views: Vec<BulletView> = world
        .query::<&Bullet>()
        .iter()
        .filter(|(_, bullet)| bullet.is_alive())
        .map(|(entity, bullet)| BulletView {
            id: actor_id(entity),
            position: bullet.position(),
            velocity: bullet.velocity(),
            age: bullet.age(),
        })
        .collect();
    views.sort_by_key(|v| v.id.0);
    views
}
