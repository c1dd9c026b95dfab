//! Summoned unit movement (behavior → velocity)

use bevy::prelude::*;

use crate::ai::behavior::{Agent, Behavior, Surroundings};
use crate::ai::EnemyAi;
use crate::combat::Dead;
use crate::components::{Body, Health, MovementSpeed, Player, SummonedUnit};
use crate::DeterministicRng;

/// System: run each unit's behavior against this tick's world view
///
/// Without a player there is nothing to follow or guard for; units idle.
pub fn friendly_behavior_system(
    mut units: Query<(&mut Behavior, &mut Body, &MovementSpeed), (With<SummonedUnit>, Without<Dead>)>,
    players: Query<&Body, (With<Player>, Without<SummonedUnit>)>,
    hostiles: Query<(&Body, &Health, &EnemyAi), Without<SummonedUnit>>,
    mut rng: ResMut<DeterministicRng>,
) {
    let Ok(player) = players.single() else {
        return;
    };

    let hostile_positions: Vec<Vec2> = hostiles
        .iter()
        .filter(|(_, health, ai)| health.is_alive() && !ai.is_dead())
        .map(|(body, _, _)| body.position)
        .collect();

    let world = Surroundings {
        player: player.position,
        hostiles: &hostile_positions,
    };

    for (mut behavior, mut body, speed) in units.iter_mut() {
        let agent = Agent {
            position: body.position,
            speed: speed.speed,
        };
        let steering = behavior.decide(&agent, &world, &mut rng.rng);
        steering.apply(&mut body);
    }
}
