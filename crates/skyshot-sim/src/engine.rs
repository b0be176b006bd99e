//! Simulation engine. Owns the world and drives every system in order.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `WorldSnapshot`s. Completely headless and
//! single-threaded; the caller supplies `dt` each tick.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::{Entity, World};

use skyshot_core::commands::PlayerCommand;
use skyshot_core::config::SimConfig;
use skyshot_core::constants::PROPELLER_SPIN_DEG_PER_SEC;
use skyshot_core::enums::EnginePhase;
use skyshot_core::error::ConfigError;
use skyshot_core::events::SimEvent;
use skyshot_core::state::{ScoreView, WorldSnapshot};
use skyshot_core::types::{ActorId, SimTime};

use crate::airplane::Airplane;
use crate::bullet::Bullet;
use crate::dice::{ChaChaDice, TernaryDice};
use crate::systems;
use crate::systems::fire_control::GunState;
use crate::systems::spawner::SpawnTimer;
use crate::world_setup::{self, actor_id, entity_of};

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: SimConfig,
    time: SimTime,
    phase: EnginePhase,
    dice: Box<dyn TernaryDice>,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    spawn_timer: SpawnTimer,
    gun: GunState,
    score: ScoreView,
    propeller_deg: f32,
}

impl SimulationEngine {
    /// Create an engine with dice seeded from `config.seed`.
    /// The config is trusted as-is; use `try_new` for untrusted input.
    pub fn new(config: SimConfig) -> Self {
        let dice = ChaChaDice::from_seed_option(config.seed);
        Self::with_dice(config, Box::new(dice))
    }

    /// Validate the config, then create the engine.
    pub fn try_new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Create an engine drawing from the given dice.
    pub fn with_dice(config: SimConfig, dice: Box<dyn TernaryDice>) -> Self {
        Self {
            world: World::new(),
            spawn_timer: SpawnTimer::primed(&config.spawner),
            config,
            time: SimTime::default(),
            phase: EnginePhase::default(),
            dice,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            gun: GunState::default(),
            score: ScoreView::default(),
            propeller_deg: 0.0,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    ///
    /// Negative or non-finite `dt` is treated as zero.
    pub fn tick(&mut self, dt: f32) -> WorldSnapshot {
        let dt = sanitize_dt(dt);

        self.process_commands();

        if self.phase == EnginePhase::Running {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        self.snapshot_with(events)
    }

    /// Snapshot of the current state without advancing. Carries no events.
    pub fn snapshot(&self) -> WorldSnapshot {
        self.snapshot_with(Vec::new())
    }

    /// Spawn an airplane directly, bypassing the wave spawner.
    pub fn spawn_airplane(&mut self, position: Vec3) -> ActorId {
        let entity = world_setup::spawn_airplane(
            &mut self.world,
            position,
            self.config.flight,
            self.dice.as_mut(),
        );
        self.score.airplanes_spawned += 1;
        actor_id(entity)
    }

    /// Spawn a bullet directly, bypassing the gun cooldown.
    /// `aim` is used as given, not normalized.
    pub fn spawn_bullet(&mut self, origin: Vec3, aim: Vec3) -> ActorId {
        let entity = world_setup::spawn_bullet(
            &mut self.world,
            origin,
            aim,
            self.config.ballistics,
            self.dice.as_mut(),
        );
        actor_id(entity)
    }

    /// Mark an actor dead. Returns false when no such actor exists.
    pub fn kill(&mut self, id: ActorId) -> bool {
        let Some(entity) = entity_of(id) else {
            return false;
        };
        if let Ok(mut plane) = self.world.get::<&mut Airplane>(entity) {
            plane.kill();
            return true;
        }
        if let Ok(mut bullet) = self.world.get::<&mut Bullet>(entity) {
            bullet.kill();
            return true;
        }
        false
    }

    /// Copy of an airplane's state, dead or alive, while it is still in the world.
    pub fn airplane(&self, id: ActorId) -> Option<Airplane> {
        let entity = entity_of(id)?;
        self.world.get::<&Airplane>(entity).ok().map(|p| (*p).clone())
    }

    /// Copy of a bullet's state, dead or alive, while it is still in the world.
    pub fn bullet(&self, id: ActorId) -> Option<Bullet> {
        let entity = entity_of(id)?;
        self.world.get::<&Bullet>(entity).ok().map(|b| (*b).clone())
    }

    pub fn live_airplanes(&self) -> usize {
        self.world
            .query::<&Airplane>()
            .iter()
            .filter(|(_, p)| p.is_alive())
            .count()
    }

    pub fn live_bullets(&self) -> usize {
        self.world
            .query::<&Bullet>()
            .iter()
            .filter(|(_, b)| b.is_alive())
            .count()
    }

    /// Entities in the world, including dead ones awaiting compaction.
    pub fn entity_count(&self) -> u32 {
        self.world.len()
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> ScoreView {
        self.score
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn gun(&self) -> GunState {
        self.gun
    }

    fn snapshot_with(&self, events: Vec<SimEvent>) -> WorldSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            self.time,
            self.phase,
            self.propeller_deg,
            events,
            self.score,
        )
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Fire { origin, aim } => {
                if self.phase != EnginePhase::Running {
                    log::debug!("fire ignored while paused");
                    return;
                }
                // Rejections are logged and scored by fire control.
                let _ = systems::fire_control::try_fire(
                    &mut self.world,
                    &mut self.gun,
                    self.config.gun_cooldown_secs,
                    origin,
                    aim,
                    self.config.ballistics,
                    self.dice.as_mut(),
                    &mut self.events,
                    &mut self.score,
                );
            }
            PlayerCommand::Pause => {
                if self.phase == EnginePhase::Running {
                    self.phase = EnginePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == EnginePhase::Paused {
                    self.phase = EnginePhase::Running;
                }
            }
            PlayerCommand::Reset => self.reset(),
        }
    }

    fn reset(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.phase = EnginePhase::Running;
        self.events.clear();
        self.spawn_timer = SpawnTimer::primed(&self.config.spawner);
        self.gun = GunState::default();
        self.score = ScoreView::default();
        self.propeller_deg = 0.0;
        log::debug!("simulation reset");
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        // 1. Airplane waves
        systems::spawner::run(
            &mut self.world,
            &mut self.spawn_timer,
            &self.config.spawner,
            self.config.flight,
            self.dice.as_mut(),
            &mut self.events,
            &mut self.score,
            dt,
        );
        // 2. Integrate airplanes, then bullets
        systems::movement::update_airplanes(&mut self.world, dt, self.dice.as_mut());
        systems::movement::update_bullets(&mut self.world, dt, &mut self.events, &mut self.score);
        // 3. Hits
        systems::collision::run(
            &mut self.world,
            self.config.collision_radius,
            &mut self.events,
            &mut self.score,
        );
        // 4. Gun cooldown and cosmetic propeller spin
        self.gun.advance(dt);
        self.propeller_deg = (self.propeller_deg + PROPELLER_SPIN_DEG_PER_SEC * dt).rem_euclid(360.0);
        // 5. Compaction
        if self.config.compaction.is_due(self.time.tick + 1) {
            systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        }
    }
}

fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        log::warn!("ignoring invalid dt {dt}, using 0");
        0.0
    }
}
