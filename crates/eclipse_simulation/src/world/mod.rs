//! World bookkeeping around combat
//!
//! Spawning archetypes, summoning, soul loot and enemy respawns. Everything here reacts
//! to `EntityDied` or request events; nothing mutates actors mid-decision.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod loot;
pub mod respawn;
pub mod spawn;
pub mod summon;

pub use loot::{collect_loot, drop_loot, Loot};
pub use respawn::{process_respawn_queue, queue_respawns, RespawnQueue};
pub use spawn::{
    enemy_bundle, ghoul_bundle, player_bundle, spawn_enemy, spawn_ghoul, spawn_player,
    GhoulStats, SpawnOrigin,
};
pub use summon::{handle_summon_requests, SummonRequest};

/// World Plugin
///
/// - Input: summon requests
/// - Resolve (after deaths are marked): loot drop → loot pickup, respawn scheduling
/// - Cleanup: due respawns, after corpses are removed
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SummonRequest>()
            .init_resource::<RespawnQueue>()
            .register_type::<SpawnOrigin>()
            .register_type::<Loot>();

        app.add_systems(
            FixedUpdate,
            handle_summon_requests
                .in_set(SimulationSet::Input)
                .after(crate::physics::apply_player_intent),
        )
        .add_systems(
            FixedUpdate,
            ((drop_loot, collect_loot).chain(), queue_respawns)
                .in_set(SimulationSet::Resolve)
                .after(crate::combat::mark_dead),
        )
        .add_systems(
            FixedUpdate,
            process_respawn_queue
                .in_set(SimulationSet::Cleanup)
                .after(crate::combat::despawn_after_timeout),
        );
    }
}
