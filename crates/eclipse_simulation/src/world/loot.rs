//! Soul loot dropped by defeated enemies

use bevy::prelude::*;

use crate::ai::EnemyAi;
use crate::combat::{Dead, EntityDied};
use crate::components::{Body, Player, Summoner};
use crate::config::SimulationConfig;

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Loot {
    pub soul: u32,
    pub position: Vec2,
}

/// System: every dead enemy leaves a soul pickup where it fell
pub fn drop_loot(
    mut commands: Commands,
    mut died: EventReader<EntityDied>,
    enemies: Query<(), With<EnemyAi>>,
    config: Res<SimulationConfig>,
) {
    for event in died.read() {
        if !enemies.contains(event.entity) {
            continue;
        }
        commands.spawn(Loot {
            soul: config.combat.loot_soul_value,
            position: event.position,
        });
    }
}

/// System: the living player picks up loot within reach
pub fn collect_loot(
    mut commands: Commands,
    loot: Query<(Entity, &Loot)>,
    mut players: Query<(&Body, &mut Summoner), (With<Player>, Without<Dead>)>,
    config: Res<SimulationConfig>,
) {
    let Ok((body, mut summoner)) = players.single_mut() else {
        return;
    };

    for (entity, pickup) in loot.iter() {
        if body.distance_to(pickup.position) < config.combat.loot_pickup_radius {
            summoner.gain(pickup.soul);
            commands.entity(entity).despawn();
        }
    }
}
