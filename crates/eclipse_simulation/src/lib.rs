//! Eclipse Contract simulation core
//!
//! Headless ECS simulation on Bevy 0.16 of a 2.5D side-scrolling arena:
//! a summoner, the ghouls it raises, and the enemies they fight.
//!
//! One tick = one `FixedUpdate` run (60 Hz):
//! 1. Input: player intent, summon and fire requests
//! 2. Timers: clock, cooldowns, invincibility
//! 3. Decide: unit behaviors, unit attacks, enemy FSMs
//! 4. Integrate: gravity, friction, bounds, projectile flight
//! 5. Resolve: damage, deaths, loot, respawn scheduling
//! 6. Cleanup: deferred removal, due respawns
//!
//! Rendering, input polling and UI are external: they write `PlayerIntent` / request
//! events and read components and `snapshot_actors`.

use bevy::ecs::event::event_update_system;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod physics;
pub mod world;

pub use ai::{AIPlugin, Behavior, BehaviorKind, CommandMode, EnemyAi, EnemyKind, EnemyState, UnitCommand};
pub use combat::{
    AttackPerformed, Attacker, CombatPlugin, DamageDealt, DamageRequest, Dead, DespawnAfter,
    EntityDied, FireProjectile, Projectile,
};
pub use components::*;
pub use config::{CombatConfig, ConfigError, PhysicsConfig, SimulationConfig};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};
pub use physics::PhysicsPlugin;
pub use world::{Loot, RespawnQueue, SpawnOrigin, SummonRequest, WorldPlugin};

/// Tick phases, chained in this order inside `FixedUpdate`
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Input,
    Timers,
    Decide,
    Integrate,
    Resolve,
    Cleanup,
}

/// Monotonic tick counter (deadlines are measured against it, never wall-clock)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationClock {
    pub tick: u64,
}

pub fn advance_clock(mut clock: ResMut<SimulationClock>) {
    clock.tick += 1;
}

/// Deterministic RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Main simulation plugin (combines all subsystems)
///
/// Resources already present (config, RNG) are kept, so callers can insert them first.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationConfig>()
            .init_resource::<SimulationClock>();

        if !app.world().contains_resource::<DeterministicRng>() {
            let seed = app.world().resource::<SimulationConfig>().seed;
            app.insert_resource(DeterministicRng::new(seed));
        }

        app.insert_resource(Time::<Fixed>::from_hz(60.0))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Input,
                    SimulationSet::Timers,
                    SimulationSet::Decide,
                    SimulationSet::Integrate,
                    SimulationSet::Resolve,
                    SimulationSet::Cleanup,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, advance_clock.in_set(SimulationSet::Timers))
            .add_plugins((PhysicsPlugin, AIPlugin, CombatPlugin, WorldPlugin));
    }
}

/// Bare headless App (MinimalPlugins, seeded RNG, 60 Hz fixed step)
///
/// `create_simulation_app` adds the simulation plugins on top of it.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Headless App with every subsystem, driven by `config` (seed included)
pub fn create_simulation_app(config: SimulationConfig) -> App {
    let mut app = create_headless_app(config.seed);
    app.insert_resource(config).add_plugins(SimulationPlugin);
    app
}

/// Advance exactly one simulation tick
///
/// Only `FixedUpdate` runs, so the event buffers are swapped here instead of in `First`.
/// An event stays readable for the tick it was written in and the one after.
pub fn step(app: &mut App) {
    let world = app.world_mut();
    world.run_schedule(FixedUpdate);
    if let Err(err) = world.run_system_cached(event_update_system) {
        log_error(&format!("Event buffer update failed: {err}"));
    }
}

pub fn run_ticks(app: &mut App, ticks: u64) {
    for _ in 0..ticks {
        step(app);
    }
}

/// Which archetype an actor belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Player,
    Enemy,
    Unit,
}

/// Observable per-actor state, for comparison and display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub entity: u32,
    pub role: ActorRole,
    pub x: f32,
    pub y: f32,
    pub height: f32,
    pub hp: u32,
    pub max_hp: u32,
    pub state: Option<EnemyState>,
}

/// Snapshot of every actor, sorted by entity index
pub fn snapshot_actors(world: &mut World) -> Vec<ActorSnapshot> {
    let mut query = world.query::<(
        Entity,
        &Body,
        &Health,
        Option<&EnemyAi>,
        Has<Player>,
        Has<SummonedUnit>,
    )>();

    let mut snapshots: Vec<ActorSnapshot> = query
        .iter(world)
        .filter_map(|(entity, body, health, ai, is_player, is_unit)| {
            let role = if is_player {
                ActorRole::Player
            } else if ai.is_some() {
                ActorRole::Enemy
            } else if is_unit {
                ActorRole::Unit
            } else {
                return None;
            };

            Some(ActorSnapshot {
                entity: entity.index(),
                role,
                x: body.position.x,
                y: body.position.y,
                height: body.height,
                hp: health.current,
                max_hp: health.max,
                state: ai.map(|ai| ai.state),
            })
        })
        .collect();

    snapshots.sort_by_key(|snapshot| snapshot.entity);
    snapshots
}
