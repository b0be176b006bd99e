//! Bullet ballistics: muzzle velocity, constant gravity and a lifespan.

use glam::Vec3;

use skyshot_core::config::BallisticTuning;
use skyshot_core::enums::GravityModel;

use crate::dice::TernaryDice;

/// A ballistic projectile with a finite lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    alive: bool,
    position: Vec3,
    velocity: Vec3,
    /// seconds since firing
    age: f32,
    tuning: BallisticTuning,
}

impl Bullet {
    /// Fire with default tuning.
    pub fn new(spawn: Vec3, aim: Vec3, dice: &mut dyn TernaryDice) -> Self {
        Self::with_tuning(spawn, aim, BallisticTuning::default(), dice)
    }

    /// Fire along `aim` (not normalized here) with per-axis jitter.
    /// Draws exactly three rolls: x, y, z.
    pub fn with_tuning(
        spawn: Vec3,
        aim: Vec3,
        tuning: BallisticTuning,
        dice: &mut dyn TernaryDice,
    ) -> Self {
        let jitter = Vec3::new(dice.roll_f32(), dice.roll_f32(), dice.roll_f32()) * tuning.jitter;
        Self {
            alive: true,
            position: spawn,
            velocity: tuning.speed * aim + jitter,
            age: 0.0,
            tuning,
        }
    }

    /// Advance by `dt` seconds. Dead bullets are left untouched.
    pub fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }

        match self.tuning.gravity_model {
            GravityModel::PositionDrift => {
                self.position += self.velocity * dt;
                self.position += self.tuning.gravity * dt;
            }
            GravityModel::Accumulate => {
                self.velocity += self.tuning.gravity * dt;
                self.position += self.velocity * dt;
            }
        }

        self.age += dt;
        if self.age > self.tuning.lifespan {
            self.alive = false;
        }
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Whether the bullet outlived its lifespan (as opposed to being killed).
    pub fn is_expired(&self) -> bool {
        self.age > self.tuning.lifespan
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn age(&self) -> f32 {
        self.age
    }

    pub fn tuning(&self) -> &BallisticTuning {
        &self.tuning
    }
}
