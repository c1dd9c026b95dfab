//! Enemy respawn scheduling
//!
//! Deadlines are simulation ticks, not wall-clock time. The queue is a min-heap on
//! `(due_tick, sequence)`, so entries due on the same tick come out in scheduling order.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use bevy::prelude::*;

use crate::combat::EntityDied;
use crate::config::SimulationConfig;
use crate::world::spawn::{enemy_bundle, SpawnOrigin};
use crate::SimulationClock;

#[derive(Debug, Clone, Copy)]
pub struct PendingRespawn {
    pub due_tick: u64,
    pub sequence: u64,
    pub origin: SpawnOrigin,
}

impl PendingRespawn {
    fn key(&self) -> (u64, u64) {
        (self.due_tick, self.sequence)
    }
}

impl PartialEq for PendingRespawn {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PendingRespawn {}

impl PartialOrd for PendingRespawn {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingRespawn {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

#[derive(Resource, Debug, Default)]
pub struct RespawnQueue {
    pending: BinaryHeap<Reverse<PendingRespawn>>,
    next_sequence: u64,
}

impl RespawnQueue {
    pub fn schedule(&mut self, due_tick: u64, origin: SpawnOrigin) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.pending.push(Reverse(PendingRespawn {
            due_tick,
            sequence,
            origin,
        }));
    }

    /// Pop every entry due at or before `now`; later entries stay queued
    pub fn drain_due(&mut self, now: u64) -> Vec<SpawnOrigin> {
        let mut due = Vec::new();

        while let Some(Reverse(next)) = self.pending.peek() {
            if next.due_tick > now {
                break;
            }
            if let Some(Reverse(entry)) = self.pending.pop() {
                due.push(entry.origin);
            }
        }

        due
    }

    pub fn next_due(&self) -> Option<u64> {
        self.pending.peek().map(|Reverse(entry)| entry.due_tick)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// System: dead enemies with a spawn origin go onto the queue
pub fn queue_respawns(
    mut died: EventReader<EntityDied>,
    origins: Query<&SpawnOrigin>,
    mut queue: ResMut<RespawnQueue>,
    clock: Res<SimulationClock>,
    config: Res<SimulationConfig>,
) {
    for event in died.read() {
        if let Ok(origin) = origins.get(event.entity) {
            queue.schedule(clock.tick + config.respawn_delay_ticks, *origin);
        }
    }
}

/// System: realize due respawns
pub fn process_respawn_queue(
    mut commands: Commands,
    mut queue: ResMut<RespawnQueue>,
    clock: Res<SimulationClock>,
) {
    for origin in queue.drain_due(clock.tick) {
        commands.spawn(enemy_bundle(origin.kind, origin.position));
        crate::log(&format!(
            "Respawned {} at ({:.0}, {:.0})",
            origin.kind.name(),
            origin.position.x,
            origin.position.y
        ));
    }
}
