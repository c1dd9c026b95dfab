//! 2.5D integrator: gravity on z, planar velocity, friction, floor and world clamping
//!
//! Fixed order per tick:
//! 1. gravity (only while airborne or moving up)
//! 2. position += velocity, height += vertical_velocity
//! 3. velocity *= friction
//! 4. floor collision on z
//! 5. world bounds on x/y

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::Body;
use crate::config::{PhysicsConfig, SimulationConfig};

/// Advance one body by one tick. Behaviors never call this; only `integrate_bodies` does.
pub fn integrate(body: &mut Body, physics: &PhysicsConfig) {
    if body.height > 0.0 || body.vertical_velocity > 0.0 {
        body.vertical_velocity -= physics.gravity;
        body.grounded = false;
    }

    body.position += body.velocity;
    body.height += body.vertical_velocity;

    body.velocity *= physics.friction;

    if body.height < 0.0 {
        body.height = 0.0;
        body.vertical_velocity = 0.0;
        body.grounded = true;
    }

    let max_x = (physics.world_width - body.size.x).max(0.0);
    let max_y = (physics.world_height - body.size.y).max(physics.ground_horizon);
    body.position.x = body.position.x.clamp(0.0, max_x);
    body.position.y = body.position.y.clamp(physics.ground_horizon, max_y);
}

/// System: integrate every living body
pub fn integrate_bodies(
    mut bodies: Query<&mut Body, Without<Dead>>,
    config: Res<SimulationConfig>,
) {
    for mut body in bodies.iter_mut() {
        integrate(&mut body, &config.physics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physics() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    #[test]
    fn test_grounded_body_ignores_gravity() {
        let mut body = Body::at(500.0, 500.0);

        integrate(&mut body, &physics());

        assert_eq!(body.height, 0.0);
        assert_eq!(body.vertical_velocity, 0.0);
        assert!(body.grounded);
    }

    #[test]
    fn test_jump_arc_lands_on_floor() {
        let mut body = Body::at(500.0, 500.0);
        body.vertical_velocity = 5.0;
        body.grounded = false;

        // First tick: 5 - 0.9 = 4.1 up
        integrate(&mut body, &physics());
        assert!((body.height - 4.1).abs() < 1e-4, "height = {}", body.height);
        assert!(!body.grounded);

        let mut landed_at = None;
        for tick in 0..30 {
            integrate(&mut body, &physics());
            assert!(body.height >= 0.0);
            if body.grounded {
                landed_at = Some(tick);
                break;
            }
        }

        assert!(landed_at.is_some(), "body never landed");
        assert_eq!(body.height, 0.0);
        assert_eq!(body.vertical_velocity, 0.0);
    }

    #[test]
    fn test_friction_decays_velocity_to_rest() {
        let mut body = Body::at(1000.0, 700.0);
        body.velocity = Vec2::new(4.0, -3.0);

        integrate(&mut body, &physics());
        assert!((body.velocity.x - 3.4).abs() < 1e-4);
        assert!((body.velocity.y + 2.55).abs() < 1e-4);

        for _ in 0..200 {
            integrate(&mut body, &physics());
        }
        assert!(body.velocity.length() < 1e-6, "velocity = {:?}", body.velocity);
        assert_eq!(body.height, 0.0);
    }

    #[test]
    fn test_world_clamping_uses_footprint() {
        let config = physics();

        let mut body = Body::new(Vec2::new(1990.0, 100.0), Vec2::new(50.0, 70.0));
        integrate(&mut body, &config);
        assert_eq!(body.position.x, 1950.0);
        assert_eq!(body.position.y, 200.0);

        body.position = Vec2::new(-20.0, 1499.0);
        integrate(&mut body, &config);
        assert_eq!(body.position.x, 0.0);
        assert_eq!(body.position.y, 1430.0);
    }
}
