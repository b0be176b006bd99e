//! Simulation configuration.
//!
//! Every field has a default matching `constants`, so a config file only
//! needs to name what it overrides. Configs are JSON.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{CompactionPolicy, GravityModel};
use crate::error::ConfigError;

/// Airplane flight model tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    pub cruise_speed: f32,
    pub lateral_jitter: f32,
    pub vertical_jitter: f32,
    /// deg/s²
    pub angular_accel: f32,
    /// deg/s
    pub max_turn_rate: f32,
    /// degrees
    pub max_bank_deg: f32,
    /// seconds
    pub reroll_interval: f32,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            cruise_speed: AIRPLANE_CRUISE_SPEED,
            lateral_jitter: AIRPLANE_LATERAL_JITTER,
            vertical_jitter: AIRPLANE_VERTICAL_JITTER,
            angular_accel: TURN_ANGULAR_ACCEL,
            max_turn_rate: MAX_TURN_RATE,
            max_bank_deg: MAX_BANK_DEG,
            reroll_interval: TURN_REROLL_INTERVAL,
        }
    }
}

/// Bullet ballistics tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallisticTuning {
    pub speed: f32,
    pub lifespan: f32,
    pub gravity: Vec3,
    pub jitter: f32,
    pub gravity_model: GravityModel,
}

impl Default for BallisticTuning {
    fn default() -> Self {
        Self {
            speed: BULLET_SPEED,
            lifespan: BULLET_LIFESPAN,
            gravity: Vec3::from_array(BULLET_GRAVITY),
            jitter: BULLET_JITTER,
            gravity_model: GravityModel::default(),
        }
    }
}

/// Airplane wave spawner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Seconds between waves. The first wave spawns on the first tick
    /// after any time has passed.
    pub interval_secs: f32,
    /// One airplane spawns at each point per wave.
    pub points: Vec<Vec3>,
    /// Live airplane limit. A wave fills spawn points in order until the
    /// limit is reached; a wave at the limit is skipped.
    pub max_live_airplanes: Option<usize>,
    /// Disable automatic waves entirely.
    pub enabled: bool,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            interval_secs: AIRPLANE_SPAWN_INTERVAL,
            points: AIRPLANE_SPAWN_POINTS
                .iter()
                .map(|p| Vec3::from_array(*p))
                .collect(),
            max_live_airplanes: None,
            enabled: true,
        }
    }
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. `None` seeds from system entropy.
    pub seed: Option<u64>,
    pub flight: FlightTuning,
    pub ballistics: BallisticTuning,
    pub collision_radius: f32,
    pub spawner: SpawnerConfig,
    pub gun_cooldown_secs: f32,
    pub compaction: CompactionPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: Some(42),
            flight: FlightTuning::default(),
            ballistics: BallisticTuning::default(),
            collision_radius: COLLISION_RADIUS,
            spawner: SpawnerConfig::default(),
            gun_cooldown_secs: GUN_COOLDOWN_SECS,
            compaction: CompactionPolicy::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check every tuning value for sanity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = &self.flight;
        positive("flight.cruise_speed", f.cruise_speed)?;
        non_negative("flight.lateral_jitter", f.lateral_jitter)?;
        non_negative("flight.vertical_jitter", f.vertical_jitter)?;
        non_negative("flight.angular_accel", f.angular_accel)?;
        positive("flight.max_turn_rate", f.max_turn_rate)?;
        non_negative("flight.max_bank_deg", f.max_bank_deg)?;
        positive("flight.reroll_interval", f.reroll_interval)?;

        let b = &self.ballistics;
        positive("ballistics.speed", b.speed)?;
        positive("ballistics.lifespan", b.lifespan)?;
        non_negative("ballistics.jitter", b.jitter)?;
        if !b.gravity.is_finite() {
            return Err(ConfigError::invalid("ballistics.gravity", "must be finite"));
        }

        positive("collision_radius", self.collision_radius)?;
        non_negative("gun_cooldown_secs", self.gun_cooldown_secs)?;

        let s = &self.spawner;
        positive("spawner.interval_secs", s.interval_secs)?;
        if s.enabled && s.points.is_empty() {
            return Err(ConfigError::invalid(
                "spawner.points",
                "at least one spawn point is required while the spawner is enabled",
            ));
        }
        if s.points.iter().any(|p| !p.is_finite()) {
            return Err(ConfigError::invalid("spawner.points", "must be finite"));
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be > 0, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be >= 0, got {value}")))
    }
}
