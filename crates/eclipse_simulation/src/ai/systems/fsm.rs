//! Enemy FSM systems (per-tick state step, target scan, strike emission).

use bevy::prelude::*;

use crate::ai::targeting::{resolve, select_target, Candidate};
use crate::ai::{EnemyAi, EnemyState};
use crate::combat::{AttackPerformed, Attacker, DamageRequest};
use crate::components::{Body, Health, MovementSpeed, Player, SummonedUnit, Threat};

/// Patrol walks at half speed
pub const PATROL_SPEED_FACTOR: f32 = 0.5;
/// Close enough to a patrol point to turn around
pub const PATROL_ARRIVAL: f32 = 10.0;
/// Velocity multiplier per Hurt tick
pub const HURT_DECAY: f32 = 0.9;

/// A resolved melee attack (the enemy landed from its wind-up hop)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub target: Entity,
    /// False when the target left attack range during the hop
    pub hit: bool,
}

/// One FSM tick for one enemy
///
/// `candidates` is the live friendly snapshot for this tick. Attack cooldowns are
/// ticked by `tick_attack_cooldowns`, the hurt timer here.
pub fn step_enemy(
    ai: &mut EnemyAi,
    body: &mut Body,
    attacker: &mut Attacker,
    speed: f32,
    candidates: &[Candidate],
) -> Option<Strike> {
    if ai.is_dead() {
        return None;
    }

    ai.hurt_timer = ai.hurt_timer.saturating_sub(1);

    let strike = match ai.state {
        EnemyState::Patrol => {
            patrol(ai, body, speed, candidates);
            None
        }
        EnemyState::Chase => {
            chase(ai, body, attacker, speed, candidates);
            None
        }
        EnemyState::PrepareAttack => prepare_attack(ai, body, attacker, candidates),
        EnemyState::AttackCooldown => {
            attack_cooldown(ai, body, attacker, candidates);
            None
        }
        EnemyState::Hurt => {
            hurt(ai, body);
            None
        }
        EnemyState::Dead => None,
    };

    if body.velocity.x > 0.0 {
        body.facing_right = true;
    } else if body.velocity.x < 0.0 {
        body.facing_right = false;
    }

    strike
}

fn patrol(ai: &mut EnemyAi, body: &mut Body, speed: f32, candidates: &[Candidate]) {
    if body.distance_to(ai.current_patrol_target()) < PATROL_ARRIVAL {
        ai.flip_patrol_target();
    }

    let direction = (ai.current_patrol_target() - body.position).normalize_or_zero();
    body.velocity = direction * speed * PATROL_SPEED_FACTOR;

    if let Some((target, distance)) = select_target(body.position, candidates) {
        if distance < ai.detection_range {
            ai.state = EnemyState::Chase;
            ai.target = Some(target);
        }
    }
}

fn chase(
    ai: &mut EnemyAi,
    body: &mut Body,
    attacker: &Attacker,
    speed: f32,
    candidates: &[Candidate],
) {
    let Some(target) = ai.target.and_then(|t| resolve(t, candidates)) else {
        ai.lose_target();
        return;
    };

    let distance = body.distance_to(target.position);
    if distance > ai.lose_target_range {
        ai.lose_target();
        return;
    }

    if attacker.in_range(distance) {
        if attacker.can_attack() {
            ai.state = EnemyState::PrepareAttack;
            body.hop(ai.hop_velocity);
        } else {
            ai.state = EnemyState::AttackCooldown;
            body.velocity = Vec2::ZERO;
            body.face_towards(target.position);
        }
        return;
    }

    body.velocity = (target.position - body.position).normalize_or_zero() * speed;
}

/// Damage resolves only once landed, with a fresh range check
fn prepare_attack(
    ai: &mut EnemyAi,
    body: &mut Body,
    attacker: &mut Attacker,
    candidates: &[Candidate],
) -> Option<Strike> {
    if !body.is_landed() {
        return None;
    }

    let strike = ai.target.map(|target| {
        let hit = resolve(target, candidates)
            .is_some_and(|c| attacker.in_range(body.distance_to(c.position)));
        Strike { target, hit }
    });

    ai.state = EnemyState::AttackCooldown;
    attacker.start_attack();
    strike
}

fn attack_cooldown(
    ai: &mut EnemyAi,
    body: &mut Body,
    attacker: &Attacker,
    candidates: &[Candidate],
) {
    if attacker.can_attack() {
        ai.state = EnemyState::Chase;
        return;
    }

    if let Some(target) = ai.target.and_then(|t| resolve(t, candidates)) {
        body.face_towards(target.position);
    }
}

fn hurt(ai: &mut EnemyAi, body: &mut Body) {
    body.velocity *= HURT_DECAY;

    if ai.hurt_timer == 0 {
        ai.state = if ai.target.is_some() {
            EnemyState::Chase
        } else {
            EnemyState::Patrol
        };
    }
}

/// System: step every enemy FSM against the friendly snapshot
///
/// Candidates are the player and summoned units, collected once per tick.
pub fn enemy_ai_system(
    mut enemies: Query<(Entity, &mut EnemyAi, &mut Body, &mut Attacker, &MovementSpeed)>,
    friendlies: Query<
        (Entity, &Body, &Health, Option<&Threat>),
        (Without<EnemyAi>, Or<(With<Player>, With<SummonedUnit>)>),
    >,
    mut damage_requests: EventWriter<DamageRequest>,
    mut attacks: EventWriter<AttackPerformed>,
) {
    let candidates: Vec<Candidate> = friendlies
        .iter()
        .map(|(entity, body, health, threat)| Candidate {
            entity,
            position: body.position,
            height: body.height,
            alive: health.is_alive(),
            threat: threat.map_or(1.0, |t| t.0),
        })
        .collect();

    for (entity, mut ai, mut body, mut attacker, speed) in enemies.iter_mut() {
        let previous = ai.state;
        let strike = step_enemy(&mut ai, &mut body, &mut attacker, speed.speed, &candidates);

        if ai.state != previous {
            crate::log(&format!(
                "{} {:?}: {:?} → {:?}",
                ai.kind.name(),
                entity,
                previous,
                ai.state
            ));
        }

        let Some(strike) = strike else {
            continue;
        };

        if strike.hit {
            damage_requests.write(DamageRequest {
                source: Some(entity),
                target: strike.target,
                amount: attacker.damage,
                origin: body.position,
            });
        }
        attacks.write(AttackPerformed {
            attacker: entity,
            target: strike.target,
            hit: strike.hit,
        });
    }
}
