//! Airplane wave spawner. Spawns one airplane per spawn point on a fixed interval.

use hecs::World;

use skyshot_core::config::{FlightTuning, SpawnerConfig};
use skyshot_core::events::SimEvent;
use skyshot_core::state::ScoreView;

use crate::airplane::Airplane;
use crate::dice::TernaryDice;
use crate::world_setup::{actor_id, spawn_airplane};

/// Time since the last wave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTimer {
    pub elapsed_secs: f32,
}

impl SpawnTimer {
    /// A timer that fires as soon as any time has passed.
    pub fn primed(config: &SpawnerConfig) -> Self {
        Self {
            elapsed_secs: config.interval_secs,
        }
    }
}

/// Spawn a wave if the interval has strictly elapsed, then accumulate `dt`.
/// Under a live cap, only the first spawn points that fit below the cap are used.
/// Returns the number of airplanes spawned.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    timer: &mut SpawnTimer,
    config: &SpawnerConfig,
    tuning: FlightTuning,
    dice: &mut dyn TernaryDice,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreView,
    dt: f32,
) -> usize {
    let mut spawned = 0;

    if config.enabled && timer.elapsed_secs > config.interval_secs {
        timer.elapsed_secs = 0.0;

        let live = count_live(world);
        let room = config
            .max_live_airplanes
            .map_or(config.points.len(), |max| max.saturating_sub(live));

        if room == 0 {
            log::debug!("skipping airplane wave: {live} airplanes alive");
        } else {
            for &point in config.points.iter().take(room) {
                let entity = spawn_airplane(world, point, tuning, dice);
                events.push(SimEvent::AirplaneSpawned {
                    id: actor_id(entity),
                    position: point,
                });
                spawned += 1;
            }
            score.airplanes_spawned += spawned as u32;
            log::debug!("spawned airplane wave of {spawned}");
        }
    }

    timer.elapsed_secs += dt;
    spawned
}

fn count_live(world: &World) -> usize {
    world
        .query::<&Airplane>()
        .iter()
        .filter(|(_, plane)| plane.is_alive())
        .count()
}
