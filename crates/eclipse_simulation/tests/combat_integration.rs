//! Combat integration tests
//!
//! Damage, death, loot, respawn, summoning and projectiles on the full headless App.

use std::marker::PhantomData;

use bevy::prelude::*;
use eclipse_simulation::world::{spawn_enemy, spawn_player};
use eclipse_simulation::*;

/// Running total of one event type (buffers only hold the last two ticks)
#[derive(Resource)]
struct Tally<T: Event> {
    count: usize,
    marker: PhantomData<fn() -> T>,
}

impl<T: Event> Default for Tally<T> {
    fn default() -> Self {
        Self {
            count: 0,
            marker: PhantomData,
        }
    }
}

fn tally<T: Event>(mut events: EventReader<T>, mut tally: ResMut<Tally<T>>) {
    tally.count += events.read().count();
}

fn create_combat_app() -> App {
    let mut app = create_simulation_app(SimulationConfig::default());
    app.init_resource::<Tally<EntityDied>>()
        .init_resource::<Tally<DamageDealt>>()
        .add_systems(
            FixedUpdate,
            (tally::<EntityDied>, tally::<DamageDealt>).in_set(SimulationSet::Cleanup),
        );
    app
}

fn count<T: Event>(app: &App) -> usize {
    app.world().resource::<Tally<T>>().count
}

fn count_with<C: Component>(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query_filtered::<(), With<C>>().iter(world).count()
}

fn kill(app: &mut App, target: Entity, amount: u32) {
    app.world_mut().send_event(DamageRequest {
        source: None,
        target,
        amount,
        origin: Vec2::ZERO,
    });
}

/// take_damage(enemy, 51) at hp 50: dead exactly once, removed exactly once after the delay
#[test]
fn test_overkill_dies_once_and_despawns_after_delay() {
    let mut app = create_combat_app();
    let enemy = spawn_enemy(app.world_mut(), EnemyKind::Skeleton, Vec2::new(400.0, 300.0));
    spawn_player(app.world_mut(), Vec2::new(1800.0, 1200.0));

    kill(&mut app, enemy, 51);
    step(&mut app);

    let world = app.world();
    assert_eq!(world.get::<Health>(enemy).map(|h| h.current), Some(0));
    assert_eq!(
        world.get::<EnemyAi>(enemy).map(|ai| ai.state),
        Some(EnemyState::Dead)
    );
    assert_eq!(count::<EntityDied>(&app), 1);

    // Died on tick 1, removal due on tick 61
    kill(&mut app, enemy, 51);
    run_ticks(&mut app, 59);
    assert_eq!(count::<EntityDied>(&app), 1);
    assert!(app.world().get_entity(enemy).is_ok());
    assert_eq!(
        app.world().get::<EnemyAi>(enemy).map(|ai| ai.state),
        Some(EnemyState::Dead)
    );

    step(&mut app);
    assert!(app.world().get_entity(enemy).is_err());
}

#[test]
fn test_dead_enemy_respawns_at_origin() {
    let mut app = create_combat_app();
    let origin = Vec2::new(400.0, 300.0);
    let enemy = spawn_enemy(app.world_mut(), EnemyKind::Goblin, origin);
    spawn_player(app.world_mut(), Vec2::new(1800.0, 1200.0));

    run_ticks(&mut app, 30);
    kill(&mut app, enemy, 100);
    step(&mut app);

    let death_tick = app.world().resource::<SimulationClock>().tick;
    let queue = app.world().resource::<RespawnQueue>();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.next_due(), Some(death_tick + 300));

    run_ticks(&mut app, 299);
    assert_eq!(count_with::<EnemyAi>(&mut app), 0);

    step(&mut app);
    assert!(app.world().resource::<RespawnQueue>().is_empty());

    let world = app.world_mut();
    let respawned: Vec<(EnemyAi, Health, Body)> = world
        .query::<(&EnemyAi, &Health, &Body)>()
        .iter(world)
        .map(|(ai, health, body)| (ai.clone(), *health, *body))
        .collect();
    assert_eq!(respawned.len(), 1);
    let (ai, health, body) = &respawned[0];
    assert_eq!(ai.kind, EnemyKind::Goblin);
    assert_eq!(ai.state, EnemyState::Patrol);
    assert_eq!(health.current, 30);
    assert_eq!(body.position, origin);
}

#[test]
fn test_loot_drops_and_player_collects() {
    let mut app = create_combat_app();
    let player = spawn_player(app.world_mut(), Vec2::new(1000.0, 700.0));
    app.world_mut()
        .get_mut::<Summoner>(player)
        .expect("summoner")
        .soul = 50;
    let enemy = spawn_enemy(app.world_mut(), EnemyKind::Skeleton, Vec2::new(1020.0, 700.0));

    kill(&mut app, enemy, 100);
    step(&mut app);
    step(&mut app);

    assert_eq!(
        app.world().get::<Summoner>(player).map(|s| s.soul),
        Some(55)
    );
    assert_eq!(count_with::<Loot>(&mut app), 0);
}

#[test]
fn test_loot_out_of_reach_stays() {
    let mut app = create_combat_app();
    let player = spawn_player(app.world_mut(), Vec2::new(1800.0, 1200.0));
    let enemy = spawn_enemy(app.world_mut(), EnemyKind::Skeleton, Vec2::new(400.0, 300.0));

    kill(&mut app, enemy, 100);
    run_ticks(&mut app, 3);

    assert_eq!(count_with::<Loot>(&mut app), 1);
    assert_eq!(
        app.world().get::<Summoner>(player).map(|s| s.soul),
        Some(100)
    );
}

#[test]
fn test_summon_spends_soul() {
    let mut app = create_combat_app();
    let player = spawn_player(app.world_mut(), Vec2::new(1000.0, 700.0));

    app.world_mut().send_event(SummonRequest {
        behavior: "follow".to_string(),
    });
    step(&mut app);

    assert_eq!(
        app.world().get::<Summoner>(player).map(|s| s.soul),
        Some(90)
    );

    let world = app.world_mut();
    let units: Vec<(Body, Health, Threat)> = world
        .query_filtered::<(&Body, &Health, &Threat), With<SummonedUnit>>()
        .iter(world)
        .map(|(body, health, threat)| (*body, *health, *threat))
        .collect();
    assert_eq!(units.len(), 1);
    let (body, health, threat) = &units[0];
    assert!(body.position.distance(Vec2::new(1050.0, 700.0)) < 1.0);
    assert_eq!(health.max, 15);
    assert_eq!(threat.0, 2.0);
}

#[test]
fn test_summon_without_soul_is_ignored() {
    let mut app = create_combat_app();
    let player = spawn_player(app.world_mut(), Vec2::new(1000.0, 700.0));
    app.world_mut()
        .get_mut::<Summoner>(player)
        .expect("summoner")
        .soul = 5;

    app.world_mut().send_event(SummonRequest {
        behavior: "aggressive".to_string(),
    });
    step(&mut app);

    assert_eq!(count_with::<SummonedUnit>(&mut app), 0);
    assert_eq!(app.world().get::<Summoner>(player).map(|s| s.soul), Some(5));
}

#[test]
fn test_projectile_hits_enemy_on_the_ground() {
    let mut app = create_combat_app();
    let player = spawn_player(app.world_mut(), Vec2::new(1000.0, 700.0));
    let enemy = spawn_enemy(app.world_mut(), EnemyKind::Skeleton, Vec2::new(1200.0, 700.0));

    app.world_mut().send_event(FireProjectile {
        shooter: player,
        target_point: Vec2::new(1200.0, 700.0),
        damage: 10,
    });
    run_ticks(&mut app, 40);

    assert_eq!(app.world().get::<Health>(enemy).map(|h| h.current), Some(40));
    assert_eq!(count_with::<Projectile>(&mut app), 0);
    assert_eq!(count::<DamageDealt>(&app), 1);
}

#[test]
fn test_projectile_expires_after_max_travel() {
    let mut app = create_combat_app();
    let player = spawn_player(app.world_mut(), Vec2::new(1000.0, 700.0));

    app.world_mut().send_event(FireProjectile {
        shooter: player,
        target_point: Vec2::new(1000.0, 1400.0),
        damage: 10,
    });
    step(&mut app);
    assert_eq!(count_with::<Projectile>(&mut app), 1);

    run_ticks(&mut app, 70);
    assert_eq!(count_with::<Projectile>(&mut app), 0);
    assert_eq!(count::<DamageDealt>(&app), 0);
}

#[test]
fn test_invincibility_window_blocks_follow_up_hits() {
    let mut app = create_combat_app();
    let player = spawn_player(app.world_mut(), Vec2::new(1000.0, 700.0));

    kill(&mut app, player, 10);
    step(&mut app);
    kill(&mut app, player, 10);
    step(&mut app);
    assert_eq!(app.world().get::<Health>(player).map(|h| h.current), Some(90));

    run_ticks(&mut app, 30);
    kill(&mut app, player, 10);
    step(&mut app);
    assert_eq!(app.world().get::<Health>(player).map(|h| h.current), Some(80));
}
