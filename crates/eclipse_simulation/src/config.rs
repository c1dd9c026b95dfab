//! Simulation tuning (physics constants, combat timings, respawn delay)
//!
//! Every field has a default matching the shipped game balance, so a config
//! file only needs the keys it overrides.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Gravity, friction and world bounds shared by every integrated body.
///
/// Units are world pixels and ticks (60 ticks per second).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Subtracted from vertical velocity every airborne tick
    pub gravity: f32,
    /// Planar velocity multiplier per tick
    pub friction: f32,
    pub world_width: f32,
    pub world_height: f32,
    /// Smallest y an actor may stand on
    pub ground_horizon: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.9,
            friction: 0.85,
            world_width: 2000.0,
            world_height: 1500.0,
            ground_horizon: 200.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct CombatConfig {
    pub hurt_duration_ticks: u32,
    pub knockback_speed: f32,
    /// Ticks between death and removal (death animation window)
    pub death_despawn_delay_ticks: u64,
    pub player_invincibility_ticks: u32,
    /// Max height difference for a projectile hit
    pub projectile_height_tolerance: f32,
    pub loot_pickup_radius: f32,
    pub loot_soul_value: u32,
    pub summon_cost: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            hurt_duration_ticks: 10,
            knockback_speed: 3.0,
            death_despawn_delay_ticks: 60,
            player_invincibility_ticks: 30,
            projectile_height_tolerance: 20.0,
            loot_pickup_radius: 40.0,
            loot_soul_value: 5,
            summon_cost: 10,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub combat: CombatConfig,
    /// Ticks between an enemy's death and its re-spawn
    pub respawn_delay_ticks: u64,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            combat: CombatConfig::default(),
            respawn_delay_ticks: 300, // 5 sec at 60Hz
            seed: 42,
        }
    }
}

impl SimulationConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let physics = &self.physics;

        if !(0.0..1.0).contains(&physics.friction) {
            return Err(ConfigError::Invalid(format!(
                "friction must be in [0, 1), got {}",
                physics.friction
            )));
        }
        if physics.gravity < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "gravity must be non-negative, got {}",
                physics.gravity
            )));
        }
        if physics.ground_horizon <= 0.0 || physics.ground_horizon >= physics.world_height {
            return Err(ConfigError::Invalid(format!(
                "ground_horizon {} outside world height {}",
                physics.ground_horizon, physics.world_height
            )));
        }

        Ok(())
    }
}
