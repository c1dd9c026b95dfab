//! Physics module
//!
//! Custom 2.5D integration (no physics engine): planar x/y, height z, gravity,
//! friction, floor collision and world bounds.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod integrator;
pub mod motor;

pub use integrator::{integrate, integrate_bodies};
pub use motor::apply_player_intent;

/// Physics Plugin
///
/// - Input: `apply_player_intent` (player input → velocity)
/// - Integrate: `integrate_bodies` (after every AI decision of the tick)
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, apply_player_intent.in_set(SimulationSet::Input))
            .add_systems(FixedUpdate, integrate_bodies.in_set(SimulationSet::Integrate));
    }
}
