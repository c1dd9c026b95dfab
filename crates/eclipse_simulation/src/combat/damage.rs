//! Damage pipeline
//!
//! Every hit (enemy strike, unit strike, projectile, external collision) becomes a
//! `DamageRequest`. `apply_damage` is the only system that touches `Health`:
//! - invincible targets ignore the hit
//! - a live target loses hp (floored at 0)
//! - non-lethal hits knock the target back and put enemies into `Hurt`
//! - lethal hits put enemies into `Dead` and emit `EntityDied` exactly once
//!
//! Removal is deferred: `mark_dead` tags the corpse, `despawn_after_timeout` removes it later.

use bevy::prelude::*;

use crate::ai::EnemyAi;
use crate::components::{Body, Health, Invincibility, Player};
use crate::config::SimulationConfig;
use crate::logger;
use crate::SimulationClock;

/// Request: deal `amount` to `target`
///
/// `origin` is where the hit came from (knockback points away from it).
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageRequest {
    pub source: Option<Entity>,
    pub target: Entity,
    pub amount: u32,
    pub origin: Vec2,
}

/// Event: damage was applied
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageDealt {
    pub source: Option<Entity>,
    pub target: Entity,
    pub amount: u32,
    pub target_died: bool,
}

/// Event: the "defeated" signal (hp reached 0), emitted once per actor
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
    pub position: Vec2,
}

/// Event: a melee attack resolved (`hit == false` is a whiff)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AttackPerformed {
    pub attacker: Entity,
    pub target: Entity,
    pub hit: bool,
}

/// Marker: hp reached 0
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;

/// Removal deadline (simulation tick)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct DespawnAfter {
    pub at_tick: u64,
}

/// Result of one `take_damage` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was already dead; nothing changed
    Ignored,
    Hurt,
    Defeated,
}

/// Subtract hp; a dead target is a no-op
pub fn take_damage(health: &mut Health, amount: u32) -> DamageOutcome {
    if !health.is_alive() {
        return DamageOutcome::Ignored;
    }

    health.take_damage(amount);

    if health.is_alive() {
        DamageOutcome::Hurt
    } else {
        DamageOutcome::Defeated
    }
}

/// Knockback velocity pointing away from `origin` (zero when on top of it)
pub fn knockback(position: Vec2, origin: Vec2, speed: f32) -> Vec2 {
    (position - origin).normalize_or_zero() * speed
}

/// System: apply queued damage
pub fn apply_damage(
    mut requests: EventReader<DamageRequest>,
    mut dealt: EventWriter<DamageDealt>,
    mut died: EventWriter<EntityDied>,
    mut targets: Query<
        (
            &mut Health,
            &mut Body,
            Option<&mut EnemyAi>,
            Option<&mut Invincibility>,
        ),
        Without<Dead>,
    >,
    config: Res<SimulationConfig>,
) {
    let combat = &config.combat;

    for request in requests.read() {
        let Ok((mut health, mut body, mut ai, mut invincibility)) = targets.get_mut(request.target)
        else {
            // Despawned or already dead before this tick
            continue;
        };

        if invincibility.as_ref().is_some_and(|window| window.is_active()) {
            continue;
        }

        let outcome = take_damage(&mut health, request.amount);
        if outcome == DamageOutcome::Ignored {
            continue;
        }

        let target_died = outcome == DamageOutcome::Defeated;
        dealt.write(DamageDealt {
            source: request.source,
            target: request.target,
            amount: request.amount,
            target_died,
        });

        if target_died {
            body.velocity = Vec2::ZERO;
            if let Some(ai) = ai.as_mut() {
                ai.enter_dead();
            }
            died.write(EntityDied {
                entity: request.target,
                killer: request.source,
                position: body.position,
            });
            logger::log_info(&format!(
                "{:?} defeated by {:?}",
                request.target, request.source
            ));
            continue;
        }

        body.velocity = knockback(body.position, request.origin, combat.knockback_speed);
        if let Some(ai) = ai.as_mut() {
            ai.enter_hurt(combat.hurt_duration_ticks);
        }
        if let Some(window) = invincibility.as_mut() {
            window.start(combat.player_invincibility_ticks);
        }
    }
}

/// System: tag the dead; everything but the player is scheduled for removal
pub fn mark_dead(
    mut commands: Commands,
    mut died: EventReader<EntityDied>,
    players: Query<Has<Player>>,
    clock: Res<SimulationClock>,
    config: Res<SimulationConfig>,
) {
    for event in died.read() {
        let Ok(is_player) = players.get(event.entity) else {
            continue;
        };

        let mut entity = commands.entity(event.entity);
        entity.insert(Dead);

        if is_player {
            logger::log_warning("Player died");
        } else {
            entity.insert(DespawnAfter {
                at_tick: clock.tick + config.combat.death_despawn_delay_ticks,
            });
        }
    }
}

/// System: remove actors whose deadline has passed
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    clock: Res<SimulationClock>,
) {
    for (entity, deadline) in query.iter() {
        if clock.tick >= deadline.at_tick {
            commands.entity(entity).despawn();
            logger::log(&format!("Despawned {:?} at tick {}", entity, clock.tick));
        }
    }
}
