//! Autopilot gunner standing in for mouse input.
//!
//! Fires at the nearest live airplane on a fixed interval, leading the
//! target and compensating for bullet drop. The engine still enforces the
//! gun cooldown.

use glam::Vec3;

use skyshot_core::commands::PlayerCommand;
use skyshot_core::config::BallisticTuning;
use skyshot_core::enums::GravityModel;
use skyshot_core::state::{AirplaneView, WorldSnapshot};

/// Lead refinement passes. Each pass re-estimates the flight time.
const LEAD_ITERATIONS: usize = 3;

#[derive(Debug, Clone)]
pub struct Gunner {
    pub origin: Vec3,
    interval_secs: f32,
    since_last_secs: f32,
    tuning: BallisticTuning,
}

impl Gunner {
    pub fn new(origin: Vec3, interval_secs: f32, tuning: BallisticTuning) -> Self {
        Self {
            origin,
            interval_secs,
            // Ready to pull the trigger on the first frame.
            since_last_secs: interval_secs,
            tuning,
        }
    }

    /// Decide whether to shoot this frame, given the last snapshot.
    pub fn command(&mut self, snapshot: &WorldSnapshot, dt: f32) -> Option<PlayerCommand> {
        self.since_last_secs += dt;
        if self.interval_secs <= 0.0 || self.since_last_secs < self.interval_secs {
            return None;
        }

        let target = nearest(self.origin, &snapshot.airplanes)?;
        let aim = lead_aim(self.origin, target.position, target.velocity, &self.tuning)?;
        self.since_last_secs = 0.0;
        Some(PlayerCommand::Fire {
            origin: self.origin,
            aim,
        })
    }
}

fn nearest(origin: Vec3, airplanes: &[AirplaneView]) -> Option<&AirplaneView> {
    airplanes.iter().min_by(|a, b| {
        origin
            .distance_squared(a.position)
            .total_cmp(&origin.distance_squared(b.position))
    })
}

/// Unit aim direction that puts a bullet on a constant-velocity target.
/// `None` when the target sits on the muzzle.
pub fn lead_aim(
    origin: Vec3,
    target_position: Vec3,
    target_velocity: Vec3,
    tuning: &BallisticTuning,
) -> Option<Vec3> {
    let mut flight_time = origin.distance(target_position) / tuning.speed;
    let mut predicted = target_position;
    for _ in 0..LEAD_ITERATIONS {
        predicted = target_position + target_velocity * flight_time;
        flight_time = origin.distance(predicted) / tuning.speed;
    }

    let drop = match tuning.gravity_model {
        GravityModel::PositionDrift => tuning.gravity * flight_time,
        GravityModel::Accumulate => 0.5 * tuning.gravity * flight_time * flight_time,
    };
    (predicted - drop - origin).try_normalize()
}
