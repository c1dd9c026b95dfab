//! Melee attacker component and per-tick timers

use bevy::prelude::*;

use crate::components::Invincibility;

/// Melee attack capability
///
/// Cooldowns are counted in simulation ticks (60 per second).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Attacker {
    pub damage: u32,
    pub attack_range: f32,
    pub attack_cooldown: u32,
    pub cooldown_timer: u32,
}

impl Default for Attacker {
    fn default() -> Self {
        Self {
            damage: 10,
            attack_range: 40.0,
            attack_cooldown: 60,
            cooldown_timer: 0,
        }
    }
}

impl Attacker {
    pub fn new(damage: u32, attack_range: f32, attack_cooldown: u32) -> Self {
        Self {
            damage,
            attack_range,
            attack_cooldown,
            cooldown_timer: 0,
        }
    }

    pub fn can_attack(&self) -> bool {
        self.cooldown_timer == 0
    }

    pub fn start_attack(&mut self) {
        self.cooldown_timer = self.attack_cooldown;
    }

    pub fn tick(&mut self) {
        self.cooldown_timer = self.cooldown_timer.saturating_sub(1);
    }

    /// Strict: a target exactly at range is out of reach
    pub fn in_range(&self, distance: f32) -> bool {
        distance < self.attack_range
    }
}

/// System: run down every attack cooldown
pub fn tick_attack_cooldowns(mut attackers: Query<&mut Attacker>) {
    for mut attacker in attackers.iter_mut() {
        if !attacker.can_attack() {
            attacker.tick();
        }
    }
}

/// System: run down post-hit invincibility windows
pub fn tick_invincibility(mut query: Query<&mut Invincibility>) {
    for mut invincibility in query.iter_mut() {
        if invincibility.is_active() {
            invincibility.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attack_cycle() {
        let mut attacker = Attacker::new(10, 35.0, 3);
        assert!(attacker.can_attack());

        attacker.start_attack();
        assert!(!attacker.can_attack());

        attacker.tick();
        attacker.tick();
        assert!(!attacker.can_attack());
        attacker.tick();
        assert!(attacker.can_attack());

        attacker.tick();
        assert_eq!(attacker.cooldown_timer, 0);
    }

    #[test]
    fn test_range_is_strict() {
        let attacker = Attacker::new(10, 35.0, 60);
        assert!(attacker.in_range(34.9));
        assert!(!attacker.in_range(35.0));
    }
}
