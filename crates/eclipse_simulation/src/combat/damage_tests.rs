//! Tests for the damage pipeline.

#[cfg(test)]
mod tests {
    use super::super::damage::*;
    use crate::ai::{EnemyAi, EnemyKind, EnemyState};
    use crate::components::{Body, Health, Invincibility, Player};
    use crate::config::SimulationConfig;
    use crate::SimulationClock;
    use bevy::prelude::*;

    fn damage_app() -> App {
        let mut app = App::new();
        app.insert_resource(SimulationConfig::default())
            .insert_resource(SimulationClock { tick: 100 })
            .add_event::<DamageRequest>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_systems(Update, (apply_damage, mark_dead).chain());
        app
    }

    fn request(target: Entity, amount: u32, origin: Vec2) -> DamageRequest {
        DamageRequest {
            source: None,
            target,
            amount,
            origin,
        }
    }

    fn deaths(app: &App) -> usize {
        app.world()
            .resource::<Events<EntityDied>>()
            .iter_current_update_events()
            .count()
    }

    #[test]
    fn test_take_damage_outcomes() {
        let mut health = Health::new(50);

        assert_eq!(take_damage(&mut health, 20), DamageOutcome::Hurt);
        assert_eq!(take_damage(&mut health, 51), DamageOutcome::Defeated);
        assert_eq!(health.current, 0);
        assert_eq!(take_damage(&mut health, 10), DamageOutcome::Ignored);
        assert_eq!(health.current, 0);
    }

    #[test]
    fn test_knockback_points_away_from_origin() {
        let push = knockback(Vec2::new(10.0, 0.0), Vec2::ZERO, 3.0);
        assert_eq!(push, Vec2::new(3.0, 0.0));

        // Source on top of the target: no NaN, no push
        assert_eq!(knockback(Vec2::ONE, Vec2::ONE, 3.0), Vec2::ZERO);
    }

    #[test]
    fn test_non_lethal_hit_hurts_enemy() {
        let mut app = damage_app();
        let enemy = app
            .world_mut()
            .spawn((
                Health::new(50),
                Body::at(400.0, 300.0),
                EnemyAi::new(EnemyKind::Skeleton, Vec2::new(400.0, 300.0)),
            ))
            .id();

        app.world_mut()
            .send_event(request(enemy, 20, Vec2::new(390.0, 300.0)));
        app.update();

        let world = app.world();
        assert_eq!(world.get::<Health>(enemy).map(|h| h.current), Some(30));
        let ai = world.get::<EnemyAi>(enemy).expect("ai");
        assert_eq!(ai.state, EnemyState::Hurt);
        assert_eq!(ai.hurt_timer, 10);
        let body = world.get::<Body>(enemy).expect("body");
        assert_eq!(body.velocity, Vec2::new(3.0, 0.0));
        assert_eq!(deaths(&app), 0);
    }

    #[test]
    fn test_overkill_kills_exactly_once() {
        let mut app = damage_app();
        let enemy = app
            .world_mut()
            .spawn((
                Health::new(50),
                Body::at(400.0, 300.0),
                EnemyAi::new(EnemyKind::Skeleton, Vec2::new(400.0, 300.0)),
            ))
            .id();

        app.world_mut().send_event(request(enemy, 51, Vec2::ZERO));
        app.world_mut().send_event(request(enemy, 51, Vec2::ZERO));
        app.update();

        let world = app.world();
        assert_eq!(world.get::<Health>(enemy).map(|h| h.current), Some(0));
        assert_eq!(
            world.get::<EnemyAi>(enemy).map(|ai| ai.state),
            Some(EnemyState::Dead)
        );
        assert!(world.get::<Dead>(enemy).is_some());
        assert_eq!(
            world.get::<DespawnAfter>(enemy).map(|d| d.at_tick),
            Some(160)
        );
        assert_eq!(deaths(&app), 1);

        // Dead stays dead
        app.world_mut().send_event(request(enemy, 5, Vec2::ZERO));
        app.update();
        assert_eq!(
            app.world().get::<EnemyAi>(enemy).map(|ai| ai.state),
            Some(EnemyState::Dead)
        );
    }

    #[test]
    fn test_invincible_player_ignores_hits() {
        let mut app = damage_app();
        let player = app
            .world_mut()
            .spawn((
                Player,
                Health::new(100),
                Body::at(100.0, 300.0),
                Invincibility::default(),
            ))
            .id();

        app.world_mut().send_event(request(player, 10, Vec2::ZERO));
        app.world_mut().send_event(request(player, 10, Vec2::ZERO));
        app.update();

        let world = app.world();
        assert_eq!(world.get::<Health>(player).map(|h| h.current), Some(90));
        assert_eq!(
            world.get::<Invincibility>(player).map(|i| i.remaining),
            Some(30)
        );
    }

    #[test]
    fn test_dead_player_is_not_scheduled_for_removal() {
        let mut app = damage_app();
        let player = app
            .world_mut()
            .spawn((Player, Health::new(10), Body::at(100.0, 300.0)))
            .id();

        app.world_mut().send_event(request(player, 10, Vec2::ZERO));
        app.update();

        let world = app.world();
        assert!(world.get::<Dead>(player).is_some());
        assert!(world.get::<DespawnAfter>(player).is_none());
    }
}
