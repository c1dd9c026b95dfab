//! Ranged attacks: straight-line projectiles with a travel limit
//!
//! A projectile flies at constant height. It hits only when it overlaps a live actor of
//! the opposing faction on the ground plane AND is close in height, so a ground shot
//! passes under an airborne target and vice versa.

use bevy::prelude::*;

use crate::combat::damage::{DamageRequest, Dead};
use crate::components::{Body, Faction, Health};
use crate::config::SimulationConfig;
use crate::logger;

/// Request: fire from `shooter` towards `target_point`
#[derive(Event, Debug, Clone, PartialEq)]
pub struct FireProjectile {
    pub shooter: Entity,
    pub target_point: Vec2,
    pub damage: u32,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    pub shooter: Option<Entity>,
    pub faction: Faction,
    pub position: Vec2,
    pub height: f32,
    pub velocity: Vec2,
    pub traveled: f32,
    pub max_travel: f32,
    pub hit_radius: f32,
    pub damage: u32,
}

impl Projectile {
    pub const SPEED: f32 = 8.0;
    pub const MAX_TRAVEL: f32 = 500.0;
    pub const HIT_RADIUS: f32 = 20.0;

    /// None when the target point is the muzzle itself (no direction)
    pub fn aimed(
        shooter: Option<Entity>,
        faction: Faction,
        from: Vec2,
        height: f32,
        target_point: Vec2,
        damage: u32,
    ) -> Option<Self> {
        let direction = (target_point - from).try_normalize()?;

        Some(Self {
            shooter,
            faction,
            position: from,
            height,
            velocity: direction * Self::SPEED,
            traveled: 0.0,
            max_travel: Self::MAX_TRAVEL,
            hit_radius: Self::HIT_RADIUS,
            damage,
        })
    }

    /// Move one tick; false once the travel limit is exceeded
    pub fn advance(&mut self) -> bool {
        self.position += self.velocity;
        self.traveled += self.velocity.length();
        self.traveled <= self.max_travel
    }

    /// Planar overlap AND vertical proximity
    pub fn hits(&self, body: &Body, height_tolerance: f32) -> bool {
        self.position.distance(body.position) < self.hit_radius
            && (self.height - body.height).abs() < height_tolerance
    }
}

/// System: turn `FireProjectile` requests into projectile entities
pub fn spawn_projectiles(
    mut commands: Commands,
    mut requests: EventReader<FireProjectile>,
    shooters: Query<(&Body, &Faction), Without<Dead>>,
) {
    for request in requests.read() {
        let Ok((body, faction)) = shooters.get(request.shooter) else {
            continue;
        };

        match Projectile::aimed(
            Some(request.shooter),
            *faction,
            body.position,
            body.height,
            request.target_point,
            request.damage,
        ) {
            Some(projectile) => {
                commands.spawn(projectile);
            }
            None => logger::log_warning(&format!(
                "{:?} fired at its own position, shot dropped",
                request.shooter
            )),
        }
    }
}

/// System: fly, expire, hit
pub fn advance_projectiles(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Projectile)>,
    targets: Query<(Entity, &Body, &Health, &Faction), Without<Dead>>,
    mut damage_requests: EventWriter<DamageRequest>,
    config: Res<SimulationConfig>,
) {
    let tolerance = config.combat.projectile_height_tolerance;

    for (entity, mut projectile) in projectiles.iter_mut() {
        if !projectile.advance() {
            commands.entity(entity).despawn();
            continue;
        }

        let hit = targets
            .iter()
            .filter(|(_, body, health, faction)| {
                health.is_alive()
                    && projectile.faction.is_opposed_to(**faction)
                    && projectile.hits(body, tolerance)
            })
            .map(|(target, body, _, _)| (target, projectile.position.distance(body.position)))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((target, _)) = hit {
            damage_requests.write(DamageRequest {
                source: projectile.shooter,
                target,
                amount: projectile.damage,
                origin: projectile.position,
            });
            commands.entity(entity).despawn();
        }
    }
}
