//! Target selection over a flat per-tick snapshot of actors
//!
//! Two policies:
//! - enemies score by `distance / max(threat, 1)` (summons draw aggro)
//! - friendly units pick the nearest hostile by raw distance

use bevy::prelude::*;

/// Read-only view of a potential target, collected once per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub entity: Entity,
    pub position: Vec2,
    pub height: f32,
    pub alive: bool,
    pub threat: f32,
}

impl Candidate {
    /// Lower is better
    pub fn score_from(&self, origin: Vec2) -> f32 {
        origin.distance(self.position) / self.threat.max(1.0)
    }
}

/// Best threat-weighted live candidate and its raw distance
pub fn select_target(origin: Vec2, candidates: &[Candidate]) -> Option<(Entity, f32)> {
    let mut best: Option<(Entity, f32, f32)> = None;

    for candidate in candidates.iter().filter(|c| c.alive) {
        let score = candidate.score_from(origin);
        let is_better = match best {
            Some((_, _, best_score)) => score < best_score,
            None => true,
        };
        if is_better {
            best = Some((candidate.entity, origin.distance(candidate.position), score));
        }
    }

    best.map(|(entity, distance, _)| (entity, distance))
}

/// Nearest live candidate by raw distance
pub fn nearest(origin: Vec2, candidates: &[Candidate]) -> Option<(Entity, f32)> {
    candidates
        .iter()
        .filter(|c| c.alive)
        .map(|c| (c.entity, origin.distance(c.position)))
        .fold(None, |best, (entity, distance)| match best {
            Some((_, best_distance)) if best_distance <= distance => best,
            _ => Some((entity, distance)),
        })
}

/// Resolve a sticky handle; absent when despawned or dead
pub fn resolve(target: Entity, candidates: &[Candidate]) -> Option<&Candidate> {
    candidates.iter().find(|c| c.entity == target && c.alive)
}
