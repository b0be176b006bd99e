//! Kinematic integration for airplanes and bullets.
//!
//! Airplanes update before bullets, matching the frame order renderers
//! expect. Both skip dead actors internally.

use hecs::World;

use skyshot_core::events::SimEvent;
use skyshot_core::state::ScoreView;

use crate::airplane::Airplane;
use crate::bullet::Bullet;
use crate::dice::TernaryDice;
use crate::world_setup::actor_id;

/// Advance every airplane.
pub fn update_airplanes(world: &mut World, dt: f32, dice: &mut dyn TernaryDice) {
    for (_entity, plane) in world.query_mut::<&mut Airplane>() {
        plane.update(dt, dice);
    }
}

/// Advance every bullet and report the ones that expired this tick.
pub fn update_bullets(
    world: &mut World,
    dt: f32,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreView,
) {
    for (entity, bullet) in world.query_mut::<&mut Bullet>() {
        let was_alive = bullet.is_alive();
        bullet.update(dt);
        if was_alive && !bullet.is_alive() {
            score.bullets_expired += 1;
            events.push(SimEvent::BulletExpired {
                id: actor_id(entity),
                position: bullet.position(),
            });
        }
    }
}
