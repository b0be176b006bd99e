//! Airplane flight model.
//!
//! Airplanes fly at constant speed and wander: every reroll interval they
//! pick a new turn bias, which accelerates the yaw rate left, right or not
//! at all. The yaw rate rotates the velocity about world up. Bank angle is
//! a cosmetic value derived from the yaw rate of the previous tick.

use glam::{Mat3, Mat4, Vec3};

use skyshot_core::config::FlightTuning;
use skyshot_core::constants::HEADING_EPSILON;
use skyshot_core::enums::TurnBias;

use crate::dice::TernaryDice;

/// A steered actor with a randomized turn-rate controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Airplane {
    alive: bool,
    position: Vec3,
    velocity: Vec3,
    /// degrees
    bank_deg: f32,
    /// deg/s, within ±max_turn_rate
    yaw_rate: f32,
    turn_bias: TurnBias,
    /// seconds since the last reroll
    turn_timer: f32,
    tuning: FlightTuning,
}

impl Airplane {
    /// Spawn with default tuning.
    pub fn new(spawn: Vec3, dice: &mut dyn TernaryDice) -> Self {
        Self::with_tuning(spawn, FlightTuning::default(), dice)
    }

    /// Spawn heading along +Z with a one-off lateral and vertical jitter.
    /// Draws exactly two rolls: lateral first, then vertical.
    pub fn with_tuning(spawn: Vec3, tuning: FlightTuning, dice: &mut dyn TernaryDice) -> Self {
        let lateral = dice.roll_f32();
        let vertical = dice.roll_f32();
        let velocity = Vec3::new(0.0, 0.0, tuning.cruise_speed)
            + Vec3::new(tuning.lateral_jitter, 0.0, 0.0) * lateral
            + Vec3::new(0.0, tuning.vertical_jitter, 0.0) * vertical;

        Self {
            alive: true,
            position: spawn,
            velocity,
            bank_deg: 0.0,
            yaw_rate: 0.0,
            turn_bias: TurnBias::Straight,
            turn_timer: 0.0,
            tuning,
        }
    }

    /// Override the current turn bias. The reroll timer is left alone.
    pub fn with_turn_bias(mut self, bias: TurnBias) -> Self {
        self.turn_bias = bias;
        self
    }

    /// Advance by `dt` seconds. Dead airplanes are left untouched.
    ///
    /// Order matters: the bank angle is taken from the yaw rate before this
    /// tick's acceleration, so it lags the yaw rate by one tick.
    pub fn update(&mut self, dt: f32, dice: &mut dyn TernaryDice) {
        if !self.alive {
            return;
        }
        let t = &self.tuning;

        self.position += self.velocity * dt;

        let delta_angle = (self.yaw_rate * dt).to_radians();
        if delta_angle != 0.0 {
            self.velocity = Mat3::from_rotation_y(delta_angle) * self.velocity;
        }

        self.bank_deg = (self.yaw_rate / t.max_turn_rate) * t.max_bank_deg;

        self.yaw_rate = (self.yaw_rate + t.angular_accel * dt * self.turn_bias.as_f32())
            .clamp(-t.max_turn_rate, t.max_turn_rate);

        // At most one reroll per update, however large dt is.
        self.turn_timer += dt;
        if self.turn_timer >= t.reroll_interval {
            self.turn_bias = dice.roll();
            self.turn_timer = 0.0;
        }
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Cosmetic roll in degrees.
    pub fn bank_angle(&self) -> f32 {
        self.bank_deg
    }

    pub fn yaw_rate(&self) -> f32 {
        self.yaw_rate
    }

    pub fn turn_bias(&self) -> TurnBias {
        self.turn_bias
    }

    pub fn turn_timer(&self) -> f32 {
        self.turn_timer
    }

    pub fn tuning(&self) -> &FlightTuning {
        &self.tuning
    }

    /// Heading in radians about +Y, measured from +Z toward +X.
    /// `None` when the airplane is (nearly) stationary.
    pub fn heading(&self) -> Option<f32> {
        if self.velocity.length() < HEADING_EPSILON {
            return None;
        }
        let v = self.velocity.normalize();
        Some(v.x.atan2(v.z))
    }

    /// Rotation about world up that turns a +Z-facing mesh toward the
    /// direction of travel. Identity when stationary.
    pub fn velocity_yaw_matrix(&self) -> Mat4 {
        match self.heading() {
            Some(yaw) => Mat4::from_rotation_y(yaw),
            None => Mat4::IDENTITY,
        }
    }
}
