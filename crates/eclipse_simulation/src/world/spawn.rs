//! Actor archetypes: player, enemies, summoned ghouls

use bevy::prelude::*;
use rand::Rng;

use crate::ai::{Behavior, EnemyAi, EnemyKind};
use crate::combat::Attacker;
use crate::components::{
    Body, Faction, Health, Invincibility, MovementSpeed, Player, PlayerIntent, PlayerMotor,
    SummonedUnit, Summoner, Threat,
};
use crate::DeterministicRng;

/// Where (and as what) an enemy re-spawns after death
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SpawnOrigin {
    pub kind: EnemyKind,
    pub position: Vec2,
}

pub const PLAYER_MAX_HP: u32 = 100;
pub const PLAYER_SPEED: f32 = 2.5;
pub const PLAYER_SIZE: Vec2 = Vec2::new(50.0, 70.0);
pub const ENEMY_SIZE: Vec2 = Vec2::new(40.0, 40.0);

/// Summoned ghoul stats
pub struct GhoulStats;

impl GhoulStats {
    pub const MAX_HP: u32 = 15;
    pub const BASE_SPEED: f32 = 1.5;
    pub const SPEED_JITTER: f32 = 0.2;
    pub const DAMAGE: u32 = 5;
    pub const ATTACK_RANGE: f32 = 40.0;
    pub const ATTACK_COOLDOWN: u32 = 45;
    /// Above the player's threat so ghouls draw aggro
    pub const THREAT: f32 = 2.0;
    pub const SIZE: Vec2 = Vec2::new(40.0, 40.0);

    /// Base speed ± jitter, drawn per ghoul
    pub fn roll_speed<R: Rng + ?Sized>(rng: &mut R) -> f32 {
        Self::BASE_SPEED + rng.gen_range(-Self::SPEED_JITTER..=Self::SPEED_JITTER)
    }
}

pub fn player_bundle(position: Vec2) -> impl Bundle {
    (
        Player,
        Faction::Friendly,
        Body::new(position, PLAYER_SIZE),
        Health::new(PLAYER_MAX_HP),
        MovementSpeed { speed: PLAYER_SPEED },
        Threat(1.0),
        PlayerMotor::default(),
        PlayerIntent::default(),
        Invincibility::default(),
        Summoner::default(),
    )
}

pub fn enemy_bundle(kind: EnemyKind, position: Vec2) -> impl Bundle {
    let stats = kind.stats();
    (
        EnemyAi::new(kind, position),
        Faction::Hostile,
        Body::new(position, ENEMY_SIZE),
        Health::new(stats.max_hp),
        MovementSpeed { speed: stats.speed },
        Attacker::new(stats.damage, stats.attack_range, stats.attack_cooldown),
        Threat(1.0),
        SpawnOrigin { kind, position },
    )
}

pub fn ghoul_bundle(position: Vec2, behavior: Behavior, speed: f32) -> impl Bundle {
    (
        SummonedUnit,
        Faction::Friendly,
        Body::new(position, GhoulStats::SIZE),
        Health::new(GhoulStats::MAX_HP),
        MovementSpeed { speed },
        Attacker::new(
            GhoulStats::DAMAGE,
            GhoulStats::ATTACK_RANGE,
            GhoulStats::ATTACK_COOLDOWN,
        ),
        Threat(GhoulStats::THREAT),
        behavior,
    )
}

pub fn spawn_player(world: &mut World, position: Vec2) -> Entity {
    world.spawn(player_bundle(position)).id()
}

pub fn spawn_enemy(world: &mut World, kind: EnemyKind, position: Vec2) -> Entity {
    world.spawn(enemy_bundle(kind, position)).id()
}

/// Ghoul with a behavior chosen by name (unknown names follow the player)
///
/// Draws speed jitter and behavior state from the simulation RNG.
pub fn spawn_ghoul(world: &mut World, behavior: &str, position: Vec2) -> Entity {
    let (behavior, speed) = {
        let mut rng = world.resource_mut::<DeterministicRng>();
        let behavior =
            Behavior::from_name(behavior, position, GhoulStats::ATTACK_RANGE, &mut rng.rng);
        (behavior, GhoulStats::roll_speed(&mut rng.rng))
    };

    world.spawn(ghoul_bundle(position, behavior, speed)).id()
}
