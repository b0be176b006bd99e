//! Fire control: gates trigger pulls on the gun cooldown and spawns bullets.

use glam::Vec3;
use hecs::{Entity, World};

use skyshot_core::config::BallisticTuning;
use skyshot_core::events::SimEvent;
use skyshot_core::state::ScoreView;

use crate::bullet::Bullet;
use crate::dice::TernaryDice;
use crate::world_setup::{actor_id, spawn_bullet};

/// Gun cooldown state. The gun starts cold: no shot is accepted until the
/// cooldown has strictly elapsed once.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GunState {
    pub since_last_shot_secs: f32,
}

impl GunState {
    pub fn is_ready(&self, cooldown_secs: f32) -> bool {
        self.since_last_shot_secs > cooldown_secs
    }

    /// Accumulate time; called once per running tick.
    pub fn advance(&mut self, dt: f32) {
        self.since_last_shot_secs += dt;
    }
}

/// Why a trigger pull produced no bullet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireRejection {
    CoolingDown { remaining_secs: f32 },
    NoAim,
}

/// Try to fire from `origin` along `aim`. The aim is normalized here.
/// A zero-length aim is rejected before the cooldown is consulted, so it is
/// never counted as blocked.
#[allow(clippy::too_many_arguments)]
pub fn try_fire(
    world: &mut World,
    gun: &mut GunState,
    cooldown_secs: f32,
    origin: Vec3,
    aim: Vec3,
    tuning: BallisticTuning,
    dice: &mut dyn TernaryDice,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreView,
) -> Result<Entity, FireRejection> {
    let Some(direction) = aim.try_normalize() else {
        log::warn!("fire ignored: zero-length aim at {origin}");
        return Err(FireRejection::NoAim);
    };

    if !gun.is_ready(cooldown_secs) {
        let remaining_secs = cooldown_secs - gun.since_last_shot_secs;
        score.shots_blocked += 1;
        events.push(SimEvent::FireBlocked {
            cooldown_remaining: remaining_secs,
        });
        log::debug!("fire blocked, {remaining_secs:.3}s of cooldown left");
        return Err(FireRejection::CoolingDown { remaining_secs });
    }

    let entity = spawn_bullet(world, origin, direction, tuning, dice);
    gun.since_last_shot_secs = 0.0;
    score.shots_fired += 1;

    let velocity = world
        .get::<&Bullet>(entity)
        .map(|b| b.velocity())
        .unwrap_or(direction * tuning.speed);
    events.push(SimEvent::BulletFired {
        id: actor_id(entity),
        origin,
        velocity,
    });

    Ok(entity)
}
