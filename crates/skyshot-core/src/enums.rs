//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Direction an airplane is currently pushing its yaw rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnBias {
    /// Yaw rate decreases.
    Left,
    /// Yaw rate holds.
    #[default]
    Straight,
    /// Yaw rate increases.
    Right,
}

impl TurnBias {
    /// All biases in ascending signed order.
    pub const ALL: [TurnBias; 3] = [TurnBias::Left, TurnBias::Straight, TurnBias::Right];

    /// Signed value in {-1, 0, 1}.
    pub fn sign(self) -> i8 {
        match self {
            TurnBias::Left => -1,
            TurnBias::Straight => 0,
            TurnBias::Right => 1,
        }
    }

    /// Signed value as a float multiplier.
    pub fn as_f32(self) -> f32 {
        f32::from(self.sign())
    }

    /// Map a signed value onto a bias. Values outside {-1, 0, 1} saturate.
    pub fn from_sign(value: i8) -> Self {
        match value {
            i8::MIN..=-1 => TurnBias::Left,
            0 => TurnBias::Straight,
            1..=i8::MAX => TurnBias::Right,
        }
    }
}

/// How bullet gravity is integrated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GravityModel {
    /// Gravity offsets the position each tick; stored velocity never changes.
    /// Trajectories are a straight line plus a linear downward drift.
    #[default]
    PositionDrift,
    /// Gravity accumulates into velocity before the position step
    /// (semi-implicit Euler), giving parabolic trajectories.
    Accumulate,
}

/// When dead actors are removed from the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompactionPolicy {
    /// Despawn dead actors at the end of every running tick.
    #[default]
    EveryTick,
    /// Despawn dead actors on every n-th running tick.
    EveryNTicks(u32),
    /// Never despawn; dead actors stay in the world flagged as dead.
    Never,
}

impl CompactionPolicy {
    /// Whether cleanup should run on the given (1-based) tick number.
    pub fn is_due(self, tick: u64) -> bool {
        match self {
            CompactionPolicy::EveryTick => true,
            CompactionPolicy::EveryNTicks(0) => true,
            CompactionPolicy::EveryNTicks(n) => tick % u64::from(n) == 0,
            CompactionPolicy::Never => false,
        }
    }
}

/// Engine run state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    #[default]
    Running,
    Paused,
}
