//! Summoned unit melee: strike the nearest hostile in range

use bevy::prelude::*;

use crate::ai::targeting::{nearest, Candidate};
use crate::ai::EnemyAi;
use crate::combat::{AttackPerformed, Attacker, DamageRequest, Dead};
use crate::components::{Body, Health, SummonedUnit};

/// System: units with a ready `Attacker` hit the nearest live hostile
///
/// Nearest by raw distance, not threat-weighted.
pub fn unit_auto_attack(
    mut units: Query<(Entity, &Body, &mut Attacker), (With<SummonedUnit>, Without<Dead>)>,
    hostiles: Query<(Entity, &Body, &Health, &EnemyAi)>,
    mut damage_requests: EventWriter<DamageRequest>,
    mut attacks: EventWriter<AttackPerformed>,
) {
    let candidates: Vec<Candidate> = hostiles
        .iter()
        .map(|(entity, body, health, ai)| Candidate {
            entity,
            position: body.position,
            height: body.height,
            alive: health.is_alive() && !ai.is_dead(),
            threat: 1.0,
        })
        .collect();

    for (entity, body, mut attacker) in units.iter_mut() {
        if !attacker.can_attack() {
            continue;
        }

        let Some((target, distance)) = nearest(body.position, &candidates) else {
            continue;
        };
        if !attacker.in_range(distance) {
            continue;
        }

        attacker.start_attack();
        damage_requests.write(DamageRequest {
            source: Some(entity),
            target,
            amount: attacker.damage,
            origin: body.position,
        });
        attacks.write(AttackPerformed {
            attacker: entity,
            target,
            hit: true,
        });
    }
}
