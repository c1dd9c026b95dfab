//! ECS components for simulated actors
//!
//! Organized by domain:
//! - actor: health, threat, faction, role markers (Player, SummonedUnit), soul, invincibility
//! - movement: 2.5D Body, MovementSpeed, PlayerMotor, PlayerIntent
//!
//! AI state (EnemyAi, Behavior) lives in `crate::ai`, combat state (Attacker, Dead) in `crate::combat`.

pub mod actor;
pub mod movement;

pub use actor::*;
pub use movement::*;
