//! Player motor: converts `PlayerIntent` into velocity and jumps

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::{Body, MovementSpeed, Player, PlayerIntent, PlayerMotor};

/// Apply one tick of input to the player body.
///
/// Diagonal input is normalized so it is not faster than straight input;
/// the resulting planar speed is capped at `max_speed`. The jump flag is consumed.
pub fn drive(body: &mut Body, intent: &mut PlayerIntent, speed: f32, motor: &PlayerMotor) {
    if intent.direction != Vec2::ZERO {
        let direction = intent.direction.normalize_or_zero();
        body.velocity += direction * speed;

        if direction.x > 0.0 {
            body.facing_right = true;
        } else if direction.x < 0.0 {
            body.facing_right = false;
        }
    }

    body.velocity = body.velocity.clamp_length_max(motor.max_speed);

    if intent.jump && body.grounded {
        body.vertical_velocity = motor.jump_force;
        body.grounded = false;
    }
    intent.jump = false;
}

/// System: player input → velocity
pub fn apply_player_intent(
    mut players: Query<
        (&mut Body, &mut PlayerIntent, &MovementSpeed, &PlayerMotor),
        (With<Player>, Without<Dead>),
    >,
) {
    for (mut body, mut intent, speed, motor) in players.iter_mut() {
        drive(&mut body, &mut intent, speed.speed, motor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_input_is_normalized() {
        let mut body = Body::at(500.0, 500.0);
        let mut intent = PlayerIntent {
            direction: Vec2::new(1.0, 1.0),
            jump: false,
        };

        drive(&mut body, &mut intent, 2.5, &PlayerMotor::default());

        assert!((body.velocity.length() - 2.5).abs() < 1e-4);
        assert!(body.facing_right);
    }

    #[test]
    fn test_speed_is_capped() {
        let mut body = Body::at(500.0, 500.0);
        let mut intent = PlayerIntent {
            direction: Vec2::new(-1.0, 0.0),
            jump: false,
        };

        for _ in 0..10 {
            drive(&mut body, &mut intent, 2.5, &PlayerMotor::default());
        }

        assert!((body.velocity.length() - 5.0).abs() < 1e-4);
        assert!(!body.facing_right);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let motor = PlayerMotor::default();
        let mut body = Body::at(500.0, 500.0);
        let mut intent = PlayerIntent {
            direction: Vec2::ZERO,
            jump: true,
        };

        drive(&mut body, &mut intent, 2.5, &motor);
        assert_eq!(body.vertical_velocity, 8.0);
        assert!(!body.grounded);
        assert!(!intent.jump, "jump flag must be consumed");

        // Airborne: second jump ignored
        body.vertical_velocity = 2.0;
        intent.jump = true;
        drive(&mut body, &mut intent, 2.5, &motor);
        assert_eq!(body.vertical_velocity, 2.0);
    }
}
