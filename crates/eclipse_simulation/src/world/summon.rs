//! Summoning ghouls for soul

use bevy::prelude::*;

use crate::ai::Behavior;
use crate::combat::Dead;
use crate::components::{Body, Player, Summoner};
use crate::config::SimulationConfig;
use crate::logger;
use crate::world::spawn::{ghoul_bundle, GhoulStats};
use crate::DeterministicRng;

/// Request: summon a ghoul running the named behavior
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SummonRequest {
    pub behavior: String,
}

/// Ghouls appear this far in front of the player
pub const SUMMON_OFFSET: f32 = 50.0;

pub fn summon_position(summoner: &Body) -> Vec2 {
    let forward = if summoner.facing_right { 1.0 } else { -1.0 };
    summoner.position + Vec2::new(forward * SUMMON_OFFSET, 0.0)
}

/// System: pay soul, spawn ghoul
pub fn handle_summon_requests(
    mut commands: Commands,
    mut requests: EventReader<SummonRequest>,
    mut players: Query<(&Body, &mut Summoner), (With<Player>, Without<Dead>)>,
    config: Res<SimulationConfig>,
    mut rng: ResMut<DeterministicRng>,
) {
    for request in requests.read() {
        let Ok((body, mut summoner)) = players.single_mut() else {
            logger::log_warning("Summon requested without a living player");
            continue;
        };

        if !summoner.try_spend(config.combat.summon_cost) {
            logger::log_warning(&format!(
                "Not enough soul to summon ({} < {})",
                summoner.soul, config.combat.summon_cost
            ));
            continue;
        }

        let position = summon_position(body);
        let behavior = Behavior::from_name(
            &request.behavior,
            position,
            GhoulStats::ATTACK_RANGE,
            &mut rng.rng,
        );
        let speed = GhoulStats::roll_speed(&mut rng.rng);

        let ghoul = commands.spawn(ghoul_bundle(position, behavior, speed)).id();
        logger::log_info(&format!(
            "Summoned ghoul {:?} ({}) at ({:.0}, {:.0}), soul left {}",
            ghoul, request.behavior, position.x, position.y, summoner.soul
        ));
    }
}
