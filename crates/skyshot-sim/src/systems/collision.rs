//! Bullet/airplane hit detection.
//!
//! Every live bullet is tested against every live airplane by Euclidean
//! distance. A hit kills both. A bullet's liveness is re-checked before each
//! comparison, so one bullet kills at most one airplane per pass, and an
//! airplane killed earlier in the pass is not hit again.

use glam::Vec3;
use hecs::{Entity, World};

use skyshot_core::events::SimEvent;
use skyshot_core::state::ScoreView;

use crate::airplane::Airplane;
use crate::bullet::Bullet;
use crate::world_setup::actor_id;

/// A resolved hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub bullet: Entity,
    pub airplane: Entity,
    pub position: Vec3,
}

struct Target {
    entity: Entity,
    position: Vec3,
    alive: bool,
}

/// Run one collision pass. Returns the hits in detection order.
pub fn run(
    world: &mut World,
    radius: f32,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreView,
) -> Vec<Hit> {
    let mut targets: Vec<Target> = world
        .query_mut::<&Airplane>()
        .into_iter()
        .filter(|(_, plane)| plane.is_alive())
        .map(|(entity, plane)| Target {
            entity,
            position: plane.position(),
            alive: true,
        })
        .collect();

    let mut hits = Vec::new();
    if targets.is_empty() {
        return hits;
    }

    for (bullet_entity, bullet) in world.query_mut::<&mut Bullet>() {
        for target in targets.iter_mut() {
            if !bullet.is_alive() {
                break;
            }
            if !target.alive {
                continue;
            }
            if bullet.position().distance(target.position) < radius {
                bullet.kill();
                target.alive = false;
                hits.push(Hit {
                    bullet: bullet_entity,
                    airplane: target.entity,
                    position: target.position,
                });
            }
        }
    }

    for hit in &hits {
        if let Ok(mut plane) = world.get::<&mut Airplane>(hit.airplane) {
            plane.kill();
        }
        score.hits += 1;
        events.push(SimEvent::Hit {
            bullet: actor_id(hit.bullet),
            airplane: actor_id(hit.airplane),
            position: hit.position,
        });
        log::info!(
            "airplane {:?} shot down at ({:.1}, {:.1}, {:.1})",
            hit.airplane,
            hit.position.x,
            hit.position.y,
            hit.position.z
        );
    }

    hits
}
