//! Movement behaviors for summoned units
//!
//! A closed set of strategies, selected at spawn time:
//! follow, guard, patrol, aggressive, flee, wander, commandable.
//!
//! Every strategy is a pure decision over (own position + speed, player position,
//! hostile positions) that returns a `Steering`. Strategies never integrate:
//! `integrate_bodies` moves the body later in the same tick.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::command::CommandMode;
use crate::components::Body;

/// Velocity change requested by a behavior for this tick
///
/// Applied as `velocity = velocity * damping + impulse`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    pub impulse: Vec2,
    pub damping: f32,
    pub facing_right: Option<bool>,
}

impl Default for Steering {
    fn default() -> Self {
        Self {
            impulse: Vec2::ZERO,
            damping: 1.0,
            facing_right: None,
        }
    }
}

impl Steering {
    /// Leave velocity untouched (friction still applies)
    pub fn hold() -> Self {
        Self::default()
    }

    pub fn accelerate(impulse: Vec2) -> Self {
        Self {
            impulse,
            ..default()
        }
    }

    pub fn damp(damping: f32) -> Self {
        Self {
            damping,
            ..default()
        }
    }

    pub fn facing(mut self, right: bool) -> Self {
        self.facing_right = Some(right);
        self
    }

    pub fn apply(&self, body: &mut Body) {
        body.velocity = body.velocity * self.damping + self.impulse;
        if let Some(right) = self.facing_right {
            body.facing_right = right;
        }
    }
}

/// The deciding actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agent {
    pub position: Vec2,
    pub speed: f32,
}

/// Per-tick world snapshot seen by behaviors
#[derive(Debug, Clone, Copy)]
pub struct Surroundings<'a> {
    pub player: Vec2,
    /// Live hostile positions
    pub hostiles: &'a [Vec2],
}

/// Follow the player with a three-zone band: chase / hold / back off
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct FollowPlayer {
    pub follow_distance: f32,
    pub stop_distance: f32,
}

impl Default for FollowPlayer {
    fn default() -> Self {
        Self {
            follow_distance: 80.0,
            stop_distance: 50.0,
        }
    }
}

impl FollowPlayer {
    const BACK_OFF_FORCE: f32 = 0.3;
    const HOLD_DAMPING: f32 = 0.9;

    pub fn decide(&self, agent: &Agent, world: &Surroundings) -> Steering {
        let to_player = world.player - agent.position;
        let distance = to_player.length();
        let direction = to_player.normalize_or_zero();

        if distance > self.follow_distance {
            Steering::accelerate(direction * agent.speed).facing(direction.x > 0.0)
        } else if distance < self.stop_distance {
            Steering::accelerate(-direction * agent.speed * Self::BACK_OFF_FORCE)
        } else {
            Steering::damp(Self::HOLD_DAMPING)
        }
    }
}

/// Hold a fixed anchor point
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct GuardPosition {
    pub anchor: Vec2,
}

impl GuardPosition {
    const SLACK: f32 = 10.0;
    const RETURN_FORCE: f32 = 0.5;
    const HOLD_DAMPING: f32 = 0.8;

    pub fn new(anchor: Vec2) -> Self {
        Self { anchor }
    }

    pub fn decide(&self, agent: &Agent) -> Steering {
        let to_anchor = self.anchor - agent.position;

        if to_anchor.length() > Self::SLACK {
            Steering::accelerate(to_anchor.normalize_or_zero() * agent.speed * Self::RETURN_FORCE)
        } else {
            Steering::damp(Self::HOLD_DAMPING)
        }
    }
}

/// Walk back and forth along x around the start point, pausing at each end
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Patrol {
    pub start: Vec2,
    /// Signed x offset of the current leg's end point
    pub target_offset: f32,
    pub wait_timer: u32,
    pub wait_duration: u32,
}

impl Patrol {
    const ARRIVAL: f32 = 20.0;
    const FORCE: f32 = 0.5;
    const WAIT_DAMPING: f32 = 0.9;

    pub fn new(start: Vec2, patrol_distance: f32) -> Self {
        Self {
            start,
            target_offset: patrol_distance,
            wait_timer: 0,
            wait_duration: 60,
        }
    }

    pub fn current_target(&self) -> Vec2 {
        self.start + Vec2::new(self.target_offset, 0.0)
    }

    pub fn decide(&mut self, agent: &Agent) -> Steering {
        if self.wait_timer > 0 {
            self.wait_timer -= 1;
            return Steering::damp(Self::WAIT_DAMPING);
        }

        let to_target = self.current_target() - agent.position;

        if to_target.length() < Self::ARRIVAL {
            self.target_offset = -self.target_offset;
            self.wait_timer = self.wait_duration;
            Steering::hold().facing(self.target_offset > 0.0)
        } else {
            let direction = to_target.normalize_or_zero();
            Steering::accelerate(direction * agent.speed * Self::FORCE).facing(direction.x > 0.0)
        }
    }
}

/// Chase the nearest hostile; with no hostiles, trail the player loosely
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Aggressive {
    pub attack_range: f32,
    pub chase_range: f32,
}

impl Default for Aggressive {
    fn default() -> Self {
        Self {
            attack_range: 150.0,
            chase_range: 300.0,
        }
    }
}

impl Aggressive {
    const LOITER_FORCE: f32 = 0.3;
    const TRAIL_DISTANCE: f32 = 100.0;
    const TRAIL_FORCE: f32 = 0.5;

    pub fn new(attack_range: f32, chase_range: f32) -> Self {
        Self {
            attack_range,
            chase_range,
        }
    }

    pub fn decide(&self, agent: &Agent, world: &Surroundings) -> Steering {
        let Some((nearest, distance)) = nearest_point(agent.position, world.hostiles) else {
            let to_player = world.player - agent.position;
            if to_player.length() > Self::TRAIL_DISTANCE {
                return Steering::accelerate(
                    to_player.normalize_or_zero() * agent.speed * Self::TRAIL_FORCE,
                );
            }
            return Steering::hold();
        };

        if distance >= self.chase_range {
            return Steering::hold();
        }

        let direction = (nearest - agent.position).normalize_or_zero();
        let force = if distance > self.attack_range {
            agent.speed
        } else {
            // Inside attack range: drift in without overlapping the target
            agent.speed * Self::LOITER_FORCE
        };

        Steering::accelerate(direction * force).facing(direction.x > 0.0)
    }
}

/// Run from the centroid of all hostiles
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Flee {
    pub flee_distance: f32,
}

impl Default for Flee {
    fn default() -> Self {
        Self { flee_distance: 200.0 }
    }
}

impl Flee {
    /// Faster than any chase force
    const FORCE: f32 = 1.5;

    pub fn decide(&self, agent: &Agent, world: &Surroundings) -> Steering {
        if world.hostiles.is_empty() {
            return Steering::hold();
        }

        let centroid =
            world.hostiles.iter().copied().sum::<Vec2>() / world.hostiles.len() as f32;
        let away = agent.position - centroid;

        if away.length() < self.flee_distance {
            let direction = away.normalize_or_zero();
            Steering::accelerate(direction * agent.speed * Self::FORCE).facing(direction.x > 0.0)
        } else {
            Steering::hold()
        }
    }
}

/// Roam to random points in an annulus around home, resting between them
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Wander {
    pub home: Vec2,
    pub radius: f32,
    pub target: Vec2,
    pub wait_timer: u32,
}

impl Wander {
    pub const MIN_RADIUS: f32 = 50.0;
    const ARRIVAL: f32 = 30.0;
    const FORCE: f32 = 0.3;
    const WAIT_DAMPING: f32 = 0.95;
    const MIN_WAIT: u32 = 30;
    const MAX_WAIT: u32 = 120;

    pub fn new<R: Rng + ?Sized>(home: Vec2, radius: f32, rng: &mut R) -> Self {
        let mut wander = Self {
            home,
            radius,
            target: home,
            wait_timer: 0,
        };
        wander.target = wander.pick_target(rng);
        wander
    }

    /// Uniform angle, uniform distance in [MIN_RADIUS, radius]
    pub fn pick_target<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let outer = self.radius.max(Self::MIN_RADIUS);
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let distance = rng.gen_range(Self::MIN_RADIUS..=outer);
        self.home + Vec2::from_angle(angle) * distance
    }

    pub fn decide<R: Rng + ?Sized>(&mut self, agent: &Agent, rng: &mut R) -> Steering {
        if self.wait_timer > 0 {
            self.wait_timer -= 1;
            return Steering::damp(Self::WAIT_DAMPING);
        }

        let to_target = self.target - agent.position;

        if to_target.length() < Self::ARRIVAL {
            self.target = self.pick_target(rng);
            self.wait_timer = rng.gen_range(Self::MIN_WAIT..=Self::MAX_WAIT);
            Steering::hold()
        } else {
            let direction = to_target.normalize_or_zero();
            Steering::accelerate(direction * agent.speed * Self::FORCE).facing(direction.x > 0.0)
        }
    }
}

/// Runtime-switchable follow / attack / defend unit
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Commandable {
    pub mode: CommandMode,
    pub follow: FollowPlayer,
    pub attack: Aggressive,
    pub defend: GuardPosition,
}

impl Commandable {
    pub const CHASE_RANGE: f32 = 400.0;
    pub const DEFAULT_ATTACK_RANGE: f32 = 40.0;

    pub fn new(position: Vec2, attack_range: f32) -> Self {
        Self {
            mode: CommandMode::Follow,
            follow: FollowPlayer::default(),
            attack: Aggressive::new(attack_range, Self::CHASE_RANGE),
            defend: GuardPosition::new(position),
        }
    }

    /// Switch mode by name; unknown names are ignored (returns false)
    pub fn set_mode(&mut self, mode: &str, current_position: Vec2) -> bool {
        match CommandMode::from_name(mode) {
            Some(mode) => {
                self.set_command(mode, current_position);
                true
            }
            None => false,
        }
    }

    /// Defend re-anchors at the position held when the order is given
    pub fn set_command(&mut self, mode: CommandMode, current_position: Vec2) {
        self.mode = mode;
        if mode == CommandMode::Defend {
            self.defend.anchor = current_position;
        }
    }

    pub fn decide(&self, agent: &Agent, world: &Surroundings) -> Steering {
        match self.mode {
            CommandMode::Follow => self.follow.decide(agent, world),
            CommandMode::Attack => self.attack.decide(agent, world),
            CommandMode::Defend => self.defend.decide(agent),
        }
    }
}

/// Behavior names accepted by spawners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum BehaviorKind {
    #[default]
    Follow,
    Guard,
    Patrol,
    Aggressive,
    Flee,
    Wander,
    Commandable,
}

impl BehaviorKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "follow" => Some(Self::Follow),
            "guard" => Some(Self::Guard),
            "patrol" => Some(Self::Patrol),
            "aggressive" => Some(Self::Aggressive),
            "flee" => Some(Self::Flee),
            "wander" => Some(Self::Wander),
            "commandable" => Some(Self::Commandable),
            _ => None,
        }
    }
}

/// Behavior component: one strategy bound to one unit for its lifetime
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub enum Behavior {
    Follow(FollowPlayer),
    Guard(GuardPosition),
    Patrol(Patrol),
    Aggressive(Aggressive),
    Flee(Flee),
    Wander(Wander),
    Commandable(Commandable),
}

impl Behavior {
    pub const PATROL_DISTANCE: f32 = 200.0;
    pub const WANDER_RADIUS: f32 = 150.0;

    /// Build a strategy anchored at `position`; `attack_range` feeds commandable units
    pub fn create<R: Rng + ?Sized>(
        kind: BehaviorKind,
        position: Vec2,
        attack_range: f32,
        rng: &mut R,
    ) -> Self {
        match kind {
            BehaviorKind::Follow => Self::Follow(FollowPlayer::default()),
            BehaviorKind::Guard => Self::Guard(GuardPosition::new(position)),
            BehaviorKind::Patrol => Self::Patrol(Patrol::new(position, Self::PATROL_DISTANCE)),
            BehaviorKind::Aggressive => Self::Aggressive(Aggressive::default()),
            BehaviorKind::Flee => Self::Flee(Flee::default()),
            BehaviorKind::Wander => Self::Wander(Wander::new(position, Self::WANDER_RADIUS, rng)),
            BehaviorKind::Commandable => Self::Commandable(Commandable::new(position, attack_range)),
        }
    }

    /// By name, falling back to follow for unknown names
    pub fn from_name<R: Rng + ?Sized>(
        name: &str,
        position: Vec2,
        attack_range: f32,
        rng: &mut R,
    ) -> Self {
        let kind = BehaviorKind::from_name(name).unwrap_or_default();
        Self::create(kind, position, attack_range, rng)
    }

    pub fn decide<R: Rng + ?Sized>(
        &mut self,
        agent: &Agent,
        world: &Surroundings,
        rng: &mut R,
    ) -> Steering {
        match self {
            Self::Follow(follow) => follow.decide(agent, world),
            Self::Guard(guard) => guard.decide(agent),
            Self::Patrol(patrol) => patrol.decide(agent),
            Self::Aggressive(aggressive) => aggressive.decide(agent, world),
            Self::Flee(flee) => flee.decide(agent, world),
            Self::Wander(wander) => wander.decide(agent, rng),
            Self::Commandable(commandable) => commandable.decide(agent, world),
        }
    }
}

fn nearest_point(origin: Vec2, points: &[Vec2]) -> Option<(Vec2, f32)> {
    points
        .iter()
        .map(|&point| (point, origin.distance(point)))
        .fold(None, |best, (point, distance)| match best {
            Some((_, best_distance)) if best_distance <= distance => best,
            _ => Some((point, distance)),
        })
}
