//! Runtime orders for commandable units

use bevy::prelude::*;

use crate::ai::behavior::Behavior;
use crate::components::Body;
use crate::logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum CommandMode {
    #[default]
    Follow,
    Attack,
    Defend,
}

impl CommandMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "follow" => Some(Self::Follow),
            "attack" => Some(Self::Attack),
            "defend" => Some(Self::Defend),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Follow => "follow",
            Self::Attack => "attack",
            Self::Defend => "defend",
        }
    }
}

/// Order a unit into a mode by name (UI passes raw strings)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct UnitCommand {
    pub unit: Entity,
    pub mode: String,
}

/// Apply a mode change immediately; false for unknown units, modes or non-commandable behaviors
pub fn set_unit_mode(world: &mut World, unit: Entity, mode: &str) -> bool {
    let Some(position) = world.get::<Body>(unit).map(|body| body.position) else {
        return false;
    };
    let Some(mut behavior) = world.get_mut::<Behavior>(unit) else {
        return false;
    };

    match behavior.as_mut() {
        Behavior::Commandable(commandable) => commandable.set_mode(mode, position),
        _ => false,
    }
}

/// System: drain `UnitCommand` events
pub fn apply_unit_commands(
    mut commands_in: EventReader<UnitCommand>,
    mut units: Query<(&mut Behavior, &Body)>,
) {
    for command in commands_in.read() {
        let Ok((mut behavior, body)) = units.get_mut(command.unit) else {
            logger::log_warning(&format!("UnitCommand for missing unit {:?}", command.unit));
            continue;
        };

        let Behavior::Commandable(commandable) = behavior.as_mut() else {
            logger::log_warning(&format!("Unit {:?} does not take commands", command.unit));
            continue;
        };

        if commandable.set_mode(&command.mode, body.position) {
            logger::log(&format!("Unit {:?} -> {}", command.unit, commandable.mode.name()));
        } else {
            logger::log_warning(&format!("Unknown command mode '{}'", command.mode));
        }
    }
}
