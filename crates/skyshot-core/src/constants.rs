//! Simulation constants and tuning defaults.
//!
//! These are the defaults baked into `config::SimConfig::default()`.
//! Units are world units (meters), seconds and degrees unless noted.

// --- Airplane flight model ---

/// Forward cruise speed along +Z at spawn (units/s).
pub const AIRPLANE_CRUISE_SPEED: f32 = 15.0;

/// Lateral (X) velocity jitter scale applied to one ternary draw at spawn.
pub const AIRPLANE_LATERAL_JITTER: f32 = 2.0;

/// Vertical (Y) velocity jitter scale applied to one ternary draw at spawn.
pub const AIRPLANE_VERTICAL_JITTER: f32 = 2.0;

/// Yaw acceleration while a turn bias is held (deg/s²).
pub const TURN_ANGULAR_ACCEL: f32 = 20.0;

/// Yaw rate limit (deg/s). The yaw rate is clamped to ±this value.
pub const MAX_TURN_RATE: f32 = 90.0;

/// Bank angle displayed at the yaw rate limit (degrees).
pub const MAX_BANK_DEG: f32 = 60.0;

/// Interval between turn bias re-rolls (seconds).
pub const TURN_REROLL_INTERVAL: f32 = 0.5;

/// Velocities shorter than this have no defined heading.
pub const HEADING_EPSILON: f32 = 1e-5;

// --- Bullet ballistics ---

/// Muzzle speed along the aim direction (units/s).
pub const BULLET_SPEED: f32 = 80.0;

/// Bullet lifespan (seconds). A bullet older than this expires.
pub const BULLET_LIFESPAN: f32 = 5.0;

/// Constant gravity acting on bullets (units/s², Y is up).
pub const BULLET_GRAVITY: [f32; 3] = [0.0, -6.0, 0.0];

/// Per-axis muzzle jitter scale applied to ternary draws.
pub const BULLET_JITTER: f32 = 1.0;

// --- Collision ---

/// Bullet/airplane hit distance (units). Hits require distance strictly below.
pub const COLLISION_RADIUS: f32 = 3.0;

// --- Spawning ---

/// Seconds between airplane waves.
pub const AIRPLANE_SPAWN_INTERVAL: f32 = 4.0;

/// Spawn points for each airplane wave.
pub const AIRPLANE_SPAWN_POINTS: [[f32; 3]; 2] = [[10.0, 20.0, -30.0], [-8.0, 23.0, -25.0]];

// --- Gun ---

/// Minimum time between accepted shots (seconds).
pub const GUN_COOLDOWN_SECS: f32 = 0.3;

// --- Presentation ---

/// Propeller spin rate for airplane meshes (deg/s).
pub const PROPELLER_SPIN_DEG_PER_SEC: f32 = 45.0;

/// Nominal frame rate for the headless driver (Hz).
pub const DEFAULT_FRAME_RATE: u32 = 60;
