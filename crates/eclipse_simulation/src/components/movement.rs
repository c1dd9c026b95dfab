//! Movement components: 2.5D body, speed, player motor and input intent

use bevy::prelude::*;

/// 2.5D kinematic body
///
/// - `position`: ground-plane point (x = left/right, y = depth)
/// - `height` / `vertical_velocity`: z axis for hops and jumps, independent of planar motion
/// - `velocity`: planar, accumulated by AI/input and decayed by friction in the integrator
///
/// Invariant: `height >= 0`; `grounded` ⇔ height == 0 and vertical_velocity <= 0 after integration.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub height: f32,
    pub vertical_velocity: f32,
    pub grounded: bool,
    pub facing_right: bool,
    /// Footprint (width, height) used for world clamping
    pub size: Vec2,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            height: 0.0,
            vertical_velocity: 0.0,
            grounded: true,
            facing_right: true,
            size: Vec2::new(40.0, 40.0),
        }
    }
}

impl Body {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            ..default()
        }
    }

    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            ..default()
        }
    }

    /// Landed: no height and not moving up
    pub fn is_landed(&self) -> bool {
        self.height <= 0.0 && self.vertical_velocity <= 0.0
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.position.distance(point)
    }

    /// Face towards a point (ties keep facing left, same as a zero-velocity flip)
    pub fn face_towards(&mut self, point: Vec2) {
        self.facing_right = point.x > self.position.x;
    }

    /// Start a vertical hop and stop planar motion
    pub fn hop(&mut self, vertical_velocity: f32) {
        self.vertical_velocity = vertical_velocity;
        self.grounded = false;
        self.velocity = Vec2::ZERO;
    }
}

/// Base acceleration per tick
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

/// Player-only movement limits
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerMotor {
    pub max_speed: f32,
    pub jump_force: f32,
}

impl Default for PlayerMotor {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            jump_force: 8.0,
        }
    }
}

/// Input intent written by the input collaborator each tick
///
/// `direction` is raw (not normalized); `jump` is consumed by `apply_player_intent`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerIntent {
    pub direction: Vec2,
    pub jump: bool,
}
