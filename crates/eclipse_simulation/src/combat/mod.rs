//! Combat module
//!
//! ECS responsibility:
//! - Attack timing: `Attacker` cooldowns, player invincibility window
//! - Damage: `DamageRequest` → `apply_damage` → `DamageDealt` / `EntityDied`
//! - Ranged: `FireProjectile` → `Projectile` → `DamageRequest`
//! - Removal: `Dead` + `DespawnAfter` (deferred, never mid-iteration)

use bevy::prelude::*;

use crate::SimulationSet;

pub mod attacker;
pub mod damage;
pub mod projectile;

#[cfg(test)]
mod damage_tests;

pub use attacker::{tick_attack_cooldowns, tick_invincibility, Attacker};
pub use damage::{
    apply_damage, despawn_after_timeout, knockback, mark_dead, take_damage, AttackPerformed,
    DamageDealt, DamageOutcome, DamageRequest, Dead, DespawnAfter, EntityDied,
};
pub use projectile::{advance_projectiles, spawn_projectiles, FireProjectile, Projectile};

/// Combat Plugin
///
/// Order inside FixedUpdate:
/// 1. Timers: cooldowns + invincibility
/// 2. Input: projectile spawn requests
/// 3. Integrate: projectile flight (after bodies moved)
/// 4. Resolve: apply_damage → mark_dead
/// 5. Cleanup: despawn expired corpses
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageRequest>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<AttackPerformed>()
            .add_event::<FireProjectile>();

        app.register_type::<Attacker>()
            .register_type::<DespawnAfter>()
            .register_type::<Projectile>();

        app.add_systems(
            FixedUpdate,
            (tick_attack_cooldowns, tick_invincibility).in_set(SimulationSet::Timers),
        )
        .add_systems(
            FixedUpdate,
            spawn_projectiles
                .in_set(SimulationSet::Input)
                .after(crate::world::handle_summon_requests),
        )
        .add_systems(
            FixedUpdate,
            advance_projectiles
                .in_set(SimulationSet::Integrate)
                .after(crate::physics::integrate_bodies),
        )
        .add_systems(
            FixedUpdate,
            (apply_damage, mark_dead)
                .chain()
                .in_set(SimulationSet::Resolve),
        )
        .add_systems(
            FixedUpdate,
            despawn_after_timeout.in_set(SimulationSet::Cleanup),
        );
    }
}
