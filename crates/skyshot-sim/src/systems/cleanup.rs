//! Cleanup system: despawns dead airplanes and bullets.

use hecs::{Entity, World};

use crate::airplane::Airplane;
use crate::bullet::Bullet;

/// Remove every dead actor from the world.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
/// Returns the number of entities despawned.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();

    for (entity, plane) in world.query_mut::<&Airplane>() {
        if !plane.is_alive() {
            despawn_buffer.push(entity);
        }
    }

    for (entity, bullet) in world.query_mut::<&Bullet>() {
        if !bullet.is_alive() {
            despawn_buffer.push(entity);
        }
    }

    let removed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    removed
}
