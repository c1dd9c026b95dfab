//! AI decision-making module
//!
//! Two decision layers share one tick:
//! - enemies: finite state machine with threat-weighted, sticky targeting
//! - summoned units: pluggable movement behaviors + nearest-hostile auto-attack
//!
//! Decisions only write velocity/facing/state and emit events. Integration and damage
//! happen later in the tick (`SimulationSet::Integrate`, `SimulationSet::Resolve`).

use bevy::prelude::*;

use crate::SimulationSet;

pub mod behavior;
pub mod command;
pub mod components;
pub mod systems;
pub mod targeting;


pub use behavior::{Behavior, BehaviorKind, Steering, Surroundings};
pub use command::{apply_unit_commands, set_unit_mode, CommandMode, UnitCommand};
pub use components::*;
pub use systems::{enemy_ai_system, friendly_behavior_system, step_enemy, unit_auto_attack, Strike};
pub use targeting::Candidate;

/// AI Plugin
///
/// Order inside `SimulationSet::Decide`:
/// 1. apply_unit_commands: external mode changes take effect this tick
/// 2. friendly_behavior_system: unit behaviors
/// 3. unit_auto_attack: unit melee
/// 4. enemy_ai_system: enemy FSMs (sees units' updated velocities, not positions)
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<UnitCommand>();

        app.register_type::<EnemyAi>().register_type::<Behavior>();

        app.add_systems(
            FixedUpdate,
            (
                apply_unit_commands,
                friendly_behavior_system,
                unit_auto_attack,
                enemy_ai_system,
            )
                .chain()
                .in_set(SimulationSet::Decide),
        );
    }
}
