//! Tests for the flight and ballistic models, collision, and the engine pipeline.

use glam::{Vec3, Vec3Swizzles};
use hecs::World;
use rstest::rstest;

use skyshot_core::commands::PlayerCommand;
use skyshot_core::config::{BallisticTuning, FlightTuning, SimConfig};
use skyshot_core::enums::*;
use skyshot_core::events::SimEvent;
use skyshot_core::state::ScoreView;

use crate::airplane::Airplane;
use crate::bullet::Bullet;
use crate::dice::{ChaChaDice, ScriptedDice, TernaryDice};
use crate::engine::SimulationEngine;
use crate::systems::fire_control::{self, FireRejection, GunState};
use crate::systems::{cleanup, collision};
use crate::world_setup::{self, actor_id};

fn assert_vec_near(actual: Vec3, expected: Vec3) {
    assert!(
        actual.abs_diff_eq(expected, 1e-4),
        "expected {expected}, got {actual}"
    );
}

fn straight_dice() -> ScriptedDice {
    ScriptedDice::constant(TurnBias::Straight)
}

/// Config with automatic waves off, so tests control every spawn.
fn quiet_config() -> SimConfig {
    let mut config = SimConfig::default();
    config.spawner.enabled = false;
    config
}

fn scripted_engine(config: SimConfig) -> SimulationEngine {
    SimulationEngine::with_dice(config, Box::new(straight_dice()))
}

// ---- Dice ----

#[test]
fn test_chacha_dice_only_rolls_ternary_values() {
    let mut dice = ChaChaDice::seeded(9);
    let mut seen = [false; 3];
    for _ in 0..300 {
        let v = dice.roll().sign();
        assert!((-1..=1).contains(&v));
        seen[(v + 1) as usize] = true;
    }
    assert!(seen.iter().all(|s| *s), "all three values should appear");
}

#[test]
fn test_chacha_dice_same_seed_same_sequence() {
    let mut a = ChaChaDice::seeded(1234);
    let mut b = ChaChaDice::seeded(1234);
    for _ in 0..100 {
        assert_eq!(a.roll(), b.roll());
    }
}

#[test]
fn test_scripted_dice_replays_then_falls_back() {
    let mut dice = ScriptedDice::new([TurnBias::Left, TurnBias::Right], TurnBias::Straight);
    assert_eq!(dice.roll(), TurnBias::Left);
    assert_eq!(dice.roll(), TurnBias::Right);
    assert_eq!(dice.roll(), TurnBias::Straight);
    assert_eq!(dice.roll_f32(), 0.0);
    assert_eq!(dice.rolls(), 4);
}

// ---- Airplane ----

#[test]
fn test_airplane_spawn_velocity_jitter() {
    let mut dice = ScriptedDice::new([TurnBias::Right, TurnBias::Left], TurnBias::Straight);
    let plane = Airplane::new(Vec3::new(10.0, 20.0, -30.0), &mut dice);

    assert_eq!(dice.rolls(), 2, "spawn draws lateral then vertical");
    assert!(plane.is_alive());
    assert_vec_near(plane.position(), Vec3::new(10.0, 20.0, -30.0));
    assert_vec_near(plane.velocity(), Vec3::new(2.0, -2.0, 15.0));
    assert_eq!(plane.turn_bias(), TurnBias::Straight);
    assert_eq!(plane.yaw_rate(), 0.0);
    assert_eq!(plane.bank_angle(), 0.0);
}

#[test]
fn test_airplane_straight_flight() {
    let mut dice = straight_dice();
    let mut plane = Airplane::new(Vec3::ZERO, &mut dice);
    plane.update(1.0, &mut dice);
    assert_vec_near(plane.position(), Vec3::new(0.0, 0.0, 15.0));
    assert_vec_near(plane.velocity(), Vec3::new(0.0, 0.0, 15.0));
}

#[rstest]
#[case(0.0)]
#[case(0.016)]
#[case(0.5)]
#[case(3.0)]
fn test_dead_airplane_never_changes(#[case] dt: f32) {
    let mut dice = ScriptedDice::constant(TurnBias::Right);
    let mut plane = Airplane::new(Vec3::new(1.0, 2.0, 3.0), &mut dice).with_turn_bias(TurnBias::Right);
    for _ in 0..5 {
        plane.update(0.1, &mut dice);
    }
    plane.kill();
    let frozen = plane.clone();
    let rolls = dice.rolls();

    for _ in 0..50 {
        plane.update(dt, &mut dice);
    }
    assert_eq!(plane, frozen);
    assert_eq!(dice.rolls(), rolls, "dead airplanes never draw");

    plane.kill();
    assert!(!plane.is_alive());
}

#[rstest]
#[case(TurnBias::Right, 90.0)]
#[case(TurnBias::Left, -90.0)]
fn test_yaw_rate_saturates(#[case] bias: TurnBias, #[case] limit: f32) {
    let mut dice = ScriptedDice::constant(bias);
    let mut plane = Airplane::new(Vec3::ZERO, &mut dice).with_turn_bias(bias);
    for _ in 0..400 {
        plane.update(0.05, &mut dice);
        assert!(plane.yaw_rate().abs() <= 90.0);
        assert!(plane.bank_angle().abs() <= 60.0);
    }
    assert_eq!(plane.yaw_rate(), limit);
    assert!((plane.bank_angle() - limit / 90.0 * 60.0).abs() < 1e-4);
}

#[test]
fn test_yaw_rate_bounded_under_random_walk() {
    let mut dice = ChaChaDice::seeded(77);
    let mut plane = Airplane::new(Vec3::ZERO, &mut dice);
    for i in 0..10_000 {
        let dt = if i % 7 == 0 { 0.3 } else { 1.0 / 60.0 };
        plane.update(dt, &mut dice);
        assert!(plane.yaw_rate().abs() <= 90.0, "yaw rate {}", plane.yaw_rate());
        assert!(TurnBias::ALL.contains(&plane.turn_bias()));
    }
}

#[test]
fn test_bank_angle_lags_yaw_rate_by_one_tick() {
    let mut dice = ScriptedDice::constant(TurnBias::Right);
    let mut plane = Airplane::new(Vec3::ZERO, &mut dice).with_turn_bias(TurnBias::Right);
    let dt = 0.125;

    for _ in 0..50 {
        let yaw_before = plane.yaw_rate();
        plane.update(dt, &mut dice);
        let expected_bank = yaw_before / 90.0 * 60.0;
        assert!(
            (plane.bank_angle() - expected_bank).abs() < 1e-4,
            "bank {} should follow previous yaw rate {}",
            plane.bank_angle(),
            yaw_before
        );
        let expected_yaw = (yaw_before + 20.0 * dt).min(90.0);
        assert!((plane.yaw_rate() - expected_yaw).abs() < 1e-4);
    }
}

#[test]
fn test_turn_bias_rerolls_once_per_interval() {
    let mut dice = ScriptedDice::new(
        [TurnBias::Straight, TurnBias::Straight, TurnBias::Left],
        TurnBias::Right,
    );
    let mut plane = Airplane::new(Vec3::ZERO, &mut dice);
    assert_eq!(dice.rolls(), 2);

    // 0.125 is exact in binary, so four ticks land exactly on 0.5s.
    for _ in 0..3 {
        plane.update(0.125, &mut dice);
    }
    assert_eq!(dice.rolls(), 2);
    assert!((plane.turn_timer() - 0.375).abs() < 1e-6);

    plane.update(0.125, &mut dice);
    assert_eq!(dice.rolls(), 3, "exactly one draw at the 0.5s boundary");
    assert_eq!(plane.turn_timer(), 0.0);
    assert_eq!(plane.turn_bias(), TurnBias::Left);

    for _ in 0..12 {
        plane.update(0.125, &mut dice);
    }
    assert_eq!(dice.rolls(), 6, "one draw per boundary over 2s");
    assert_eq!(plane.turn_bias(), TurnBias::Right);
}

#[test]
fn test_large_dt_rerolls_at_most_once() {
    let mut dice = straight_dice();
    let mut plane = Airplane::new(Vec3::ZERO, &mut dice);
    plane.update(2.0, &mut dice);
    assert_eq!(dice.rolls(), 3);
    assert_eq!(plane.turn_timer(), 0.0);
}

#[test]
fn test_positive_yaw_rate_turns_toward_plus_x() {
    let mut dice = ScriptedDice::new([TurnBias::Straight, TurnBias::Straight], TurnBias::Right);
    let mut plane = Airplane::new(Vec3::ZERO, &mut dice).with_turn_bias(TurnBias::Right);
    for _ in 0..10 {
        plane.update(0.1, &mut dice);
    }
    assert!(plane.velocity().x > 0.0, "velocity {}", plane.velocity());
}

#[test]
fn test_yaw_rotation_keeps_vertical_and_horizontal_speed() {
    // Spawn climbing: vertical jitter +2.
    let mut dice = ScriptedDice::new([TurnBias::Straight, TurnBias::Right], TurnBias::Right);
    let mut plane = Airplane::new(Vec3::ZERO, &mut dice).with_turn_bias(TurnBias::Right);
    assert_vec_near(plane.velocity(), Vec3::new(0.0, 2.0, 15.0));

    for _ in 0..200 {
        plane.update(0.05, &mut dice);
    }
    let v = plane.velocity();
    assert!((v.y - 2.0).abs() < 1e-4, "vertical speed drifted: {}", v.y);
    assert!((v.xz().length() - 15.0).abs() < 1e-3);
}

#[test]
fn test_velocity_yaw_matrix_faces_velocity() {
    let mut dice = ScriptedDice::new([TurnBias::Right, TurnBias::Straight], TurnBias::Straight);
    let plane = Airplane::new(Vec3::ZERO, &mut dice);
    let forward = plane.velocity_yaw_matrix().transform_vector3(Vec3::Z);
    let expected = Vec3::new(2.0, 0.0, 15.0).normalize();
    assert_vec_near(forward, expected);
}

#[test]
fn test_velocity_yaw_matrix_identity_when_stationary() {
    let tuning = FlightTuning {
        cruise_speed: 0.0,
        lateral_jitter: 0.0,
        vertical_jitter: 0.0,
        ..Default::default()
    };
    let mut dice = straight_dice();
    let plane = Airplane::with_tuning(Vec3::ZERO, tuning, &mut dice);
    assert_eq!(plane.heading(), None);
    assert_eq!(plane.velocity_yaw_matrix(), glam::Mat4::IDENTITY);
}

// ---- Bullet ----

#[test]
fn test_bullet_one_second_drift() {
    let mut dice = straight_dice();
    let mut bullet = Bullet::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), &mut dice);
    assert_eq!(dice.rolls(), 3);
    bullet.update(1.0);

    assert_vec_near(bullet.position(), Vec3::new(0.0, -6.0, -80.0));
    assert_vec_near(bullet.velocity(), Vec3::new(0.0, 0.0, -80.0));
    assert!(bullet.is_alive());
}

#[test]
fn test_bullet_muzzle_jitter_per_axis() {
    let mut dice = ScriptedDice::new(
        [TurnBias::Right, TurnBias::Left, TurnBias::Right],
        TurnBias::Straight,
    );
    let bullet = Bullet::new(Vec3::ONE, Vec3::NEG_Z, &mut dice);
    assert_vec_near(bullet.velocity(), Vec3::new(1.0, -1.0, -79.0));
    assert_vec_near(bullet.position(), Vec3::ONE);
}

#[test]
fn test_bullet_expires_after_lifespan() {
    let mut dice = straight_dice();
    let mut bullet = Bullet::new(Vec3::ZERO, Vec3::X, &mut dice);

    for _ in 0..10 {
        bullet.update(0.5);
    }
    assert!(bullet.is_alive(), "age == lifespan is still alive");

    bullet.update(0.5);
    assert!(!bullet.is_alive());
    assert!(bullet.is_expired());

    let frozen = bullet.clone();
    for _ in 0..20 {
        bullet.update(0.5);
    }
    assert_eq!(bullet, frozen, "expired bullets stop moving");
}

#[test]
fn test_killed_bullet_is_not_expired() {
    let mut dice = straight_dice();
    let mut bullet = Bullet::new(Vec3::ZERO, Vec3::X, &mut dice);
    bullet.kill();
    bullet.kill();
    assert!(!bullet.is_alive());
    assert!(!bullet.is_expired());
    bullet.update(1.0);
    assert_vec_near(bullet.position(), Vec3::ZERO);
}

#[test]
fn test_bullet_accumulating_gravity() {
    let tuning = BallisticTuning {
        gravity_model: GravityModel::Accumulate,
        ..Default::default()
    };
    let mut dice = straight_dice();
    let mut bullet = Bullet::with_tuning(Vec3::ZERO, Vec3::NEG_Z, tuning, &mut dice);
    bullet.update(0.5);
    bullet.update(0.5);

    assert_vec_near(bullet.velocity(), Vec3::new(0.0, -6.0, -80.0));
    assert_vec_near(bullet.position(), Vec3::new(0.0, -4.5, -80.0));

    let mut drift = Bullet::new(Vec3::ZERO, Vec3::NEG_Z, &mut dice);
    drift.update(0.5);
    drift.update(0.5);
    assert_vec_near(drift.position(), Vec3::new(0.0, -6.0, -80.0));
    assert_eq!(drift.velocity().y, 0.0, "drift model never bends velocity");
}

// ---- Collision ----

fn world_with(airplanes: &[Vec3], bullets: &[Vec3]) -> World {
    let mut world = World::new();
    let mut dice = straight_dice();
    for &p in airplanes {
        world_setup::spawn_airplane(&mut world, p, FlightTuning::default(), &mut dice);
    }
    for &b in bullets {
        world_setup::spawn_bullet(&mut world, b, Vec3::NEG_Z, BallisticTuning::default(), &mut dice);
    }
    world
}

fn live_counts(world: &World) -> (usize, usize) {
    let planes = world
        .query::<&Airplane>()
        .iter()
        .filter(|(_, p)| p.is_alive())
        .count();
    let bullets = world
        .query::<&Bullet>()
        .iter()
        .filter(|(_, b)| b.is_alive())
        .count();
    (planes, bullets)
}

#[test]
fn test_collision_within_radius_kills_both() {
    let mut world = world_with(&[Vec3::ZERO], &[Vec3::new(2.0, 0.0, 0.0)]);
    let mut events = Vec::new();
    let mut score = ScoreView::default();

    let hits = collision::run(&mut world, 3.0, &mut events, &mut score);

    assert_eq!(hits.len(), 1);
    assert_eq!(live_counts(&world), (0, 0));
    assert_eq!(score.hits, 1);
    assert!(matches!(events.as_slice(), [SimEvent::Hit { .. }]));
}

#[test]
fn test_collision_out_of_radius_survives() {
    let mut world = world_with(&[Vec3::ZERO], &[Vec3::new(5.0, 0.0, 0.0)]);
    let mut events = Vec::new();
    let mut score = ScoreView::default();

    let hits = collision::run(&mut world, 3.0, &mut events, &mut score);

    assert!(hits.is_empty());
    assert_eq!(live_counts(&world), (1, 1));
    assert!(events.is_empty());
}

#[rstest]
#[case(2.99, true)]
#[case(3.0, false)]
#[case(3.01, false)]
fn test_collision_radius_is_strict(#[case] distance: f32, #[case] hit: bool) {
    let mut world = world_with(&[Vec3::ZERO], &[Vec3::new(0.0, distance, 0.0)]);
    let hits = collision::run(&mut world, 3.0, &mut Vec::new(), &mut ScoreView::default());
    assert_eq!(!hits.is_empty(), hit);
}

#[test]
fn test_bullet_kills_at_most_one_airplane_per_pass() {
    let mut world = world_with(
        &[Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)],
        &[Vec3::ZERO],
    );
    let hits = collision::run(&mut world, 3.0, &mut Vec::new(), &mut ScoreView::default());
    assert_eq!(hits.len(), 1);
    assert_eq!(live_counts(&world), (1, 0));
}

#[test]
fn test_airplane_absorbs_only_one_bullet_per_pass() {
    let mut world = world_with(
        &[Vec3::ZERO],
        &[Vec3::new(1.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)],
    );
    let hits = collision::run(&mut world, 3.0, &mut Vec::new(), &mut ScoreView::default());
    assert_eq!(hits.len(), 1);
    assert_eq!(live_counts(&world), (0, 1));
}

#[test]
fn test_dead_actors_never_collide() {
    let mut world = world_with(&[Vec3::ZERO], &[Vec3::new(1.0, 0.0, 0.0)]);
    for (_e, bullet) in world.query_mut::<&mut Bullet>() {
        bullet.kill();
    }
    let hits = collision::run(&mut world, 3.0, &mut Vec::new(), &mut ScoreView::default());
    assert!(hits.is_empty());
    assert_eq!(live_counts(&world), (1, 0));
}

#[test]
fn test_cleanup_despawns_only_dead() {
    let mut world = world_with(&[Vec3::ZERO, Vec3::X * 50.0], &[Vec3::new(1.0, 0.0, 0.0)]);
    collision::run(&mut world, 3.0, &mut Vec::new(), &mut ScoreView::default());
    let mut buffer = Vec::new();

    let removed = cleanup::run(&mut world, &mut buffer);

    assert_eq!(removed, 2);
    assert_eq!(world.len(), 1);
    assert_eq!(live_counts(&world), (1, 0));
    assert!(buffer.is_empty());
}

// ---- Engine: determinism ----

fn gunner_commands(tick: u32) -> Option<PlayerCommand> {
    (tick % 20 == 0).then(|| PlayerCommand::Fire {
        origin: Vec3::new(0.0, 4.0, 0.0),
        aim: Vec3::new(0.1, 0.3, -1.0),
    })
}

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: Some(12345),
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::new(config.clone());
    let mut engine_b = SimulationEngine::new(config);

    for tick in 0..600 {
        if let Some(cmd) = gunner_commands(tick) {
            engine_a.queue_command(cmd.clone());
            engine_b.queue_command(cmd);
        }
        let snap_a = engine_a.tick(1.0 / 60.0);
        let snap_b = engine_b.tick(1.0 / 60.0);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: Some(111),
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: Some(222),
        ..Default::default()
    });

    let mut diverged = false;
    for _ in 0..600 {
        let snap_a = engine_a.tick(1.0 / 60.0);
        let snap_b = engine_b.tick(1.0 / 60.0);
        if serde_json::to_string(&snap_a).unwrap() != serde_json::to_string(&snap_b).unwrap() {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Engine: spawner ----

#[test]
fn test_spawner_waves_on_interval() {
    let mut engine = scripted_engine(SimConfig::default());

    let snap = engine.tick(0.5);
    assert!(snap.airplanes.is_empty(), "interval must be strictly exceeded");

    let snap = engine.tick(0.5);
    assert_eq!(snap.airplanes.len(), 2);
    let spawned = snap
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::AirplaneSpawned { .. }))
        .count();
    assert_eq!(spawned, 2);
    // Spawned before integration, so they already flew 0.5s at 15 u/s.
    assert_vec_near(snap.airplanes[0].position, Vec3::new(10.0, 20.0, -22.5));
    assert_vec_near(snap.airplanes[1].position, Vec3::new(-8.0, 23.0, -17.5));

    // Timer restarts at zero: the next wave lands 4.5s of timer later.
    for _ in 0..8 {
        engine.tick(0.5);
    }
    assert_eq!(engine.score().airplanes_spawned, 2);
    engine.tick(0.5);
    assert_eq!(engine.score().airplanes_spawned, 4);
    assert_eq!(engine.live_airplanes(), 4);
}

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(2, 2)]
#[case(3, 3)]
fn test_spawner_fills_up_to_live_cap(#[case] cap: usize, #[case] expected: usize) {
    let mut config = SimConfig::default();
    config.spawner.max_live_airplanes = Some(cap);
    config.validate().unwrap();
    let mut engine = scripted_engine(config);

    for _ in 0..40 {
        engine.tick(0.5);
    }
    assert_eq!(engine.live_airplanes(), expected);
    assert_eq!(engine.score().airplanes_spawned as usize, expected);
}

#[test]
fn test_cap_below_wave_size_spawns_partial_wave() {
    let mut config = SimConfig::default();
    config.spawner.max_live_airplanes = Some(1);
    let mut engine = scripted_engine(config);

    engine.tick(0.5);
    let snap = engine.tick(0.5);
    assert_eq!(snap.airplanes.len(), 1, "a cap of 1 still lets one airplane in");
    // Spawn points are used in order: the first one wins.
    assert_vec_near(snap.airplanes[0].position, Vec3::new(10.0, 20.0, -22.5));
}

// ---- Engine: fire control ----

#[test]
fn test_gun_cooldown_gates_shots() {
    let mut engine = scripted_engine(quiet_config());
    let fire = PlayerCommand::Fire {
        origin: Vec3::ZERO,
        aim: Vec3::new(0.0, 0.0, -2.0),
    };

    engine.queue_command(fire.clone());
    let snap = engine.tick(0.2);
    assert!(snap.bullets.is_empty(), "gun starts cold");
    assert!(matches!(snap.events.as_slice(), [SimEvent::FireBlocked { .. }]));

    engine.queue_command(fire.clone());
    engine.tick(0.2);
    assert_eq!(engine.live_bullets(), 0);

    engine.queue_command(fire.clone());
    let snap = engine.tick(0.2);
    assert_eq!(snap.bullets.len(), 1);
    assert_vec_near(snap.bullets[0].velocity, Vec3::new(0.0, 0.0, -80.0));

    engine.queue_command(fire);
    engine.tick(0.2);
    assert_eq!(engine.live_bullets(), 1, "fired shot resets the cooldown");

    let score = engine.score();
    assert_eq!(score.shots_fired, 1);
    assert_eq!(score.shots_blocked, 3);
}

#[test]
fn test_fire_with_zero_aim_is_ignored() {
    let mut engine = scripted_engine(quiet_config());
    engine.tick(1.0);
    engine.queue_command(PlayerCommand::Fire {
        origin: Vec3::ZERO,
        aim: Vec3::ZERO,
    });
    let snap = engine.tick(0.1);
    assert!(snap.bullets.is_empty());
    assert_eq!(engine.score().shots_fired, 0);
    assert!(engine.gun().is_ready(0.3), "a dud shot keeps the gun ready");
}

#[test]
fn test_zero_aim_while_cooling_down_is_not_blocked() {
    let mut world = World::new();
    let mut gun = GunState::default();
    let mut dice = straight_dice();
    let mut events = Vec::new();
    let mut score = ScoreView::default();

    let result = fire_control::try_fire(
        &mut world,
        &mut gun,
        0.3,
        Vec3::ZERO,
        Vec3::ZERO,
        BallisticTuning::default(),
        &mut dice,
        &mut events,
        &mut score,
    );

    assert_eq!(result, Err(FireRejection::NoAim));
    assert_eq!(score.shots_blocked, 0);
    assert!(events.is_empty());
    assert_eq!(world.len(), 0);
    assert_eq!(dice.rolls(), 0);
}

#[test]
fn test_zero_aim_through_engine_while_cooling_down() {
    let mut engine = scripted_engine(quiet_config());
    engine.queue_command(PlayerCommand::Fire {
        origin: Vec3::ZERO,
        aim: Vec3::ZERO,
    });
    let snap = engine.tick(0.1);
    assert!(snap.events.is_empty());
    assert_eq!(engine.score(), ScoreView::default());
}

// ---- Engine: hits and compaction ----

#[test]
fn test_engine_hit_removes_both() {
    let mut engine = scripted_engine(quiet_config());
    let plane = engine.spawn_airplane(Vec3::new(0.0, -3.0, 40.0));
    let bullet = engine.spawn_bullet(Vec3::ZERO, Vec3::Z);

    let mut hit = None;
    for _ in 0..120 {
        let snap = engine.tick(1.0 / 60.0);
        hit = snap.events.iter().find_map(|e| match e {
            SimEvent::Hit {
                bullet, airplane, ..
            } => Some((*bullet, *airplane)),
            _ => None,
        });
        if hit.is_some() {
            assert!(snap.airplanes.is_empty());
            assert!(snap.bullets.is_empty());
            break;
        }
    }

    assert_eq!(hit, Some((bullet, plane)));
    assert_eq!(engine.score().hits, 1);
    assert_eq!(engine.entity_count(), 0);
    assert!(engine.airplane(plane).is_none());
}

#[test]
fn test_compaction_never_keeps_dead_frozen() {
    let config = SimConfig {
        compaction: CompactionPolicy::Never,
        ..quiet_config()
    };
    let mut engine = scripted_engine(config);
    let id = engine.spawn_airplane(Vec3::ZERO);
    engine.tick(0.1);
    assert!(engine.kill(id));
    let frozen = engine.airplane(id).unwrap();

    for _ in 0..30 {
        let snap = engine.tick(0.1);
        assert!(snap.airplanes.is_empty(), "dead actors are not drawn");
    }

    assert_eq!(engine.entity_count(), 1);
    assert_eq!(engine.airplane(id).unwrap(), frozen);
}

#[test]
fn test_compaction_every_n_ticks() {
    let config = SimConfig {
        compaction: CompactionPolicy::EveryNTicks(3),
        ..quiet_config()
    };
    let mut engine = scripted_engine(config);
    let id = engine.spawn_bullet(Vec3::ZERO, Vec3::X);
    engine.kill(id);

    engine.tick(0.1);
    engine.tick(0.1);
    assert_eq!(engine.entity_count(), 1);
    engine.tick(0.1);
    assert_eq!(engine.entity_count(), 0);
}

#[test]
fn test_bullets_expire_through_engine() {
    let mut engine = scripted_engine(quiet_config());
    let id = engine.spawn_bullet(Vec3::ZERO, Vec3::X);

    let mut expired = Vec::new();
    for _ in 0..12 {
        let snap = engine.tick(0.5);
        expired.extend(snap.events.into_iter().filter_map(|e| match e {
            SimEvent::BulletExpired { id, .. } => Some(id),
            _ => None,
        }));
    }
    assert_eq!(expired, vec![id]);
    assert_eq!(engine.score().bullets_expired, 1);
    assert_eq!(engine.live_bullets(), 0);
}

#[test]
fn test_kill_unknown_actor() {
    let mut engine = scripted_engine(quiet_config());
    let id = engine.spawn_bullet(Vec3::ZERO, Vec3::X);
    engine.kill(id);
    engine.tick(0.1);
    assert!(!engine.kill(id), "despawned actor is gone");
}

// ---- Engine: control ----

#[test]
fn test_pause_stops_simulation() {
    let mut engine = scripted_engine(quiet_config());
    let id = engine.spawn_bullet(Vec3::ZERO, Vec3::X);

    for _ in 0..10 {
        engine.tick(0.1);
    }
    assert_eq!(engine.time().tick, 10);

    engine.queue_command(PlayerCommand::Pause);
    let before = engine.bullet(id).unwrap();
    for _ in 0..10 {
        engine.queue_command(PlayerCommand::Fire {
            origin: Vec3::ZERO,
            aim: Vec3::X,
        });
        engine.tick(0.1);
    }
    assert_eq!(engine.time().tick, 10, "time should not advance while paused");
    assert_eq!(engine.phase(), EnginePhase::Paused);
    assert_eq!(engine.bullet(id).unwrap(), before);
    assert_eq!(engine.score().shots_fired, 0);

    engine.queue_command(PlayerCommand::Resume);
    for _ in 0..10 {
        engine.tick(0.1);
    }
    assert_eq!(engine.time().tick, 20);
    assert_eq!(engine.phase(), EnginePhase::Running);
}

#[test]
fn test_reset_clears_everything() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    for _ in 0..300 {
        engine.tick(1.0 / 30.0);
    }
    assert!(engine.live_airplanes() > 0);

    engine.queue_command(PlayerCommand::Reset);
    let snap = engine.tick(0.0);
    assert!(snap.airplanes.is_empty());
    assert_eq!(snap.score, ScoreView::default());
    assert_eq!(engine.entity_count(), 0);
}

#[rstest]
#[case(-1.0)]
#[case(f32::NAN)]
#[case(f32::INFINITY)]
fn test_invalid_dt_is_zero(#[case] dt: f32) {
    let mut engine = scripted_engine(quiet_config());
    let id = engine.spawn_bullet(Vec3::ZERO, Vec3::X);
    engine.tick(dt);
    assert_eq!(engine.time().elapsed_secs, 0.0);
    assert_vec_near(engine.bullet(id).unwrap().position(), Vec3::ZERO);
}

#[test]
fn test_propeller_spin_wraps() {
    let mut engine = scripted_engine(quiet_config());
    let mut snap = engine.tick(1.0);
    for _ in 0..9 {
        snap = engine.tick(1.0);
    }
    assert!((snap.propeller_deg - 90.0).abs() < 1e-3);
}

#[test]
fn test_try_new_rejects_invalid_config() {
    let mut config = SimConfig::default();
    config.collision_radius = -1.0;
    assert!(SimulationEngine::try_new(config).is_err());
    assert!(SimulationEngine::try_new(SimConfig::default()).is_ok());
}

#[test]
fn test_snapshot_views_match_actors() {
    let mut engine = scripted_engine(quiet_config());
    let plane = engine.spawn_airplane(Vec3::new(0.0, 10.0, 0.0));
    let snap = engine.tick(0.25);

    let view = &snap.airplanes[0];
    let actor = engine.airplane(plane).unwrap();
    assert_eq!(view.id, plane);
    assert_eq!(view.position, actor.position());
    assert_eq!(view.bank_deg, actor.bank_angle());
    assert_eq!(view.yaw_matrix, actor.velocity_yaw_matrix());
    assert_eq!(actor_id(world_setup::entity_of(plane).unwrap()), plane);
}
