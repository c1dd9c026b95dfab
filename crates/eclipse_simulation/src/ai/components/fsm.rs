//! Enemy FSM components (state, patrol route, sticky target, roster stats).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Enemy FSM states
///
/// Patrol → Chase → PrepareAttack → AttackCooldown → Chase ...
/// Hurt is entered from damage; Dead is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Reflect)]
pub enum EnemyState {
    /// Walking between the two patrol points, scanning for targets
    #[default]
    Patrol,
    /// Running at the sticky target
    Chase,
    /// Airborne wind-up hop; the strike resolves on landing
    PrepareAttack,
    /// Holding position while the attack timer runs down
    AttackCooldown,
    /// Knockback window after a non-lethal hit
    Hurt,
    /// hp reached 0, waiting for removal
    Dead,
}

/// Enemy roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Basic melee fighter
    Skeleton,
    /// Fast but fragile
    Goblin,
}

impl EnemyKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "skeleton" => Some(Self::Skeleton),
            "goblin" => Some(Self::Goblin),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Skeleton => "skeleton",
            Self::Goblin => "goblin",
        }
    }

    pub fn stats(&self) -> EnemyStats {
        match self {
            Self::Skeleton => EnemyStats {
                max_hp: 50,
                speed: 1.2,
                damage: 10,
                attack_range: 35.0,
                attack_cooldown: 60,
            },
            Self::Goblin => EnemyStats {
                max_hp: 30,
                speed: 2.0,
                damage: 8,
                attack_range: 30.0,
                attack_cooldown: 45, // faster attacks
            },
        }
    }
}

/// Per-kind combat stats (cooldown in ticks)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub max_hp: u32,
    pub speed: f32,
    pub damage: u32,
    pub attack_range: f32,
    pub attack_cooldown: u32,
}

/// Which patrol point the enemy is walking to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum PatrolLeg {
    ToA,
    #[default]
    ToB,
}

/// Enemy brain
///
/// `target` is a plain `Entity` handle: it never keeps the target alive and is
/// resolved against the live actor list every tick. A despawned or dead handle reads as "no target".
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct EnemyAi {
    pub kind: EnemyKind,
    pub state: EnemyState,
    pub target: Option<Entity>,
    pub patrol_point_a: Vec2,
    pub patrol_point_b: Vec2,
    pub patrol_leg: PatrolLeg,
    /// Must stay below `lose_target_range` (hysteresis band)
    pub detection_range: f32,
    pub lose_target_range: f32,
    pub hurt_timer: u32,
    /// Vertical velocity of the wind-up hop
    pub hop_velocity: f32,
}

impl EnemyAi {
    pub const PATROL_OFFSET: f32 = 100.0;
    pub const DETECTION_RANGE: f32 = 200.0;
    pub const LOSE_TARGET_RANGE: f32 = 300.0;
    pub const HOP_VELOCITY: f32 = 5.0;

    pub fn new(kind: EnemyKind, spawn: Vec2) -> Self {
        let offset = Vec2::new(Self::PATROL_OFFSET, 0.0);
        Self {
            kind,
            state: EnemyState::Patrol,
            target: None,
            patrol_point_a: spawn - offset,
            patrol_point_b: spawn + offset,
            patrol_leg: PatrolLeg::ToB,
            detection_range: Self::DETECTION_RANGE,
            lose_target_range: Self::LOSE_TARGET_RANGE,
            hurt_timer: 0,
            hop_velocity: Self::HOP_VELOCITY,
        }
    }

    pub fn current_patrol_target(&self) -> Vec2 {
        match self.patrol_leg {
            PatrolLeg::ToA => self.patrol_point_a,
            PatrolLeg::ToB => self.patrol_point_b,
        }
    }

    pub fn flip_patrol_target(&mut self) {
        self.patrol_leg = match self.patrol_leg {
            PatrolLeg::ToA => PatrolLeg::ToB,
            PatrolLeg::ToB => PatrolLeg::ToA,
        };
    }

    pub fn is_dead(&self) -> bool {
        self.state == EnemyState::Dead
    }

    /// Non-lethal hit: start the knockback window (no-op once dead)
    pub fn enter_hurt(&mut self, ticks: u32) {
        if self.is_dead() {
            return;
        }
        self.state = EnemyState::Hurt;
        self.hurt_timer = ticks;
    }

    /// One-way transition; the target handle is dropped
    pub fn enter_dead(&mut self) {
        self.state = EnemyState::Dead;
        self.target = None;
    }

    pub fn lose_target(&mut self) {
        self.state = EnemyState::Patrol;
        self.target = None;
    }
}
