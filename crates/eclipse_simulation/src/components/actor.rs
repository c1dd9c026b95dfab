//! Actor components: Health, Threat, Faction, role markers, player resources

use bevy::prelude::*;

/// Actor health
///
/// Invariant: 0 ≤ current ≤ max. Reaching 0 is terminal.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

/// Enemy targeting weight: at equal distance the higher threat wins.
///
/// Summoned units carry more threat than the player so they draw aggro.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Threat(pub f32);

impl Default for Threat {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Which side an actor fights for (projectiles only hit the other side)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum Faction {
    /// Player and summoned units
    Friendly,
    /// Enemies
    Hostile,
}

impl Faction {
    pub fn is_opposed_to(self, other: Faction) -> bool {
        self != other
    }
}

/// Marker: the summoner controlled by external input
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Marker: a unit summoned by the player
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SummonedUnit;

/// Soul resource spent on summons, refilled by loot
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Summoner {
    pub soul: u32,
    pub max_soul: u32,
}

impl Default for Summoner {
    fn default() -> Self {
        Self { soul: 100, max_soul: 100 }
    }
}

impl Summoner {
    pub fn try_spend(&mut self, cost: u32) -> bool {
        if self.soul < cost {
            return false;
        }
        self.soul -= cost;
        true
    }

    pub fn gain(&mut self, amount: u32) {
        self.soul = self.soul.saturating_add(amount).min(self.max_soul);
    }
}

/// Post-hit invincibility window (ticks)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Invincibility {
    pub remaining: u32,
}

impl Invincibility {
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn start(&mut self, ticks: u32) {
        self.remaining = ticks;
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}
