//! Determinism tests
//!
//! Same seed + same spawn order ⇒ identical actor snapshots, tick for tick.

use bevy::prelude::*;
use eclipse_simulation::world::{spawn_enemy, spawn_ghoul, spawn_player};
use eclipse_simulation::*;

fn populated_app(seed: u64) -> App {
    let config = SimulationConfig {
        seed,
        ..default()
    };
    let mut app = create_simulation_app(config);
    let world = app.world_mut();

    spawn_player(world, Vec2::new(1000.0, 700.0));
    spawn_enemy(world, EnemyKind::Skeleton, Vec2::new(700.0, 650.0));
    spawn_enemy(world, EnemyKind::Skeleton, Vec2::new(1300.0, 750.0));
    spawn_enemy(world, EnemyKind::Goblin, Vec2::new(1100.0, 500.0));
    spawn_ghoul(world, "wander", Vec2::new(950.0, 700.0));
    spawn_ghoul(world, "aggressive", Vec2::new(1050.0, 720.0));
    spawn_ghoul(world, "commandable", Vec2::new(980.0, 680.0));

    app
}

fn run_simulation(seed: u64, ticks: u64) -> Vec<String> {
    let mut app = populated_app(seed);
    let mut frames = Vec::new();

    for _ in 0..ticks {
        step(&mut app);
        let snapshot = snapshot_actors(app.world_mut());
        frames.push(serde_json::to_string(&snapshot).expect("snapshot serializes"));
    }

    frames
}

#[test]
fn test_determinism_same_seed() {
    let first = run_simulation(42, 600);
    let second = run_simulation(42, 600);

    assert_eq!(first.len(), second.len());
    for (tick, (a, b)) in first.iter().zip(&second).enumerate() {
        assert_eq!(a, b, "diverged at tick {}", tick + 1);
    }
}

#[test]
fn test_determinism_multiple_runs() {
    let runs: Vec<Vec<String>> = (0..3).map(|_| run_simulation(7, 300)).collect();

    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
}

#[test]
fn test_invariants_hold_every_tick() {
    let mut app = populated_app(99);

    for tick in 1..=900 {
        step(&mut app);

        for actor in snapshot_actors(app.world_mut()) {
            assert!(actor.hp <= actor.max_hp, "tick {tick}: {actor:?}");
            assert!(actor.height >= 0.0, "tick {tick}: {actor:?}");
            if actor.hp == 0 && actor.role == ActorRole::Enemy {
                assert_eq!(actor.state, Some(EnemyState::Dead), "tick {tick}: {actor:?}");
            }
        }
    }
}

#[test]
fn test_event_buffers_stay_bounded_in_long_fight() {
    let mut app = create_simulation_app(SimulationConfig::default());
    let world = app.world_mut();
    let player = spawn_player(world, Vec2::new(1000.0, 700.0));
    world.entity_mut(player).insert(Health::new(1_000_000));
    spawn_enemy(world, EnemyKind::Skeleton, Vec2::new(1030.0, 700.0));

    for tick in 1..=3000 {
        step(&mut app);

        let attacks = app.world().resource::<Events<AttackPerformed>>().len();
        let requests = app.world().resource::<Events<DamageRequest>>().len();
        assert!(attacks <= 2, "tick {tick}: {attacks} attack events buffered");
        assert!(requests <= 2, "tick {tick}: {requests} damage requests buffered");
    }

    let hp = app.world().get::<Health>(player).map(|h| h.current);
    assert!(hp < Some(1_000_000), "the skeleton never landed a hit");
}
