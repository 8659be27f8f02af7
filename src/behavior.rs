/*
 * Behavior Module
 *
 * Steering behaviors and the BehaviorSet that combines them.
 *
 * Every behavior answers the same question: given a body's current
 * velocity, position and limits, which force should be folded into its
 * velocity this tick? The known kinds form a closed enum (Wander, Seek,
 * Evade, Follow); new kinds are added as new variants.
 *
 * Behaviors may own state that persists between calls. Wander keeps its
 * drifting angle and Follow keeps the index of the waypoint it is heading
 * for. That state belongs to the behavior value, so cloning a BehaviorSet
 * clones it and serializing one captures it.
 *
 * Behaviors never look at other bodies directly. Targets that track another
 * body are resolved through the previous-tick snapshots handed in with the
 * steering input, which keeps each body's update independent of the order
 * bodies are updated in.
 */

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;
use crate::vector::Vector2D;

/// Length of the small offset vector Wander adds to its circle centre.
pub const WANDER_FORCE_LENGTH: f32 = 0.2;

/// Minimum circle radius Wander adds to its randomized radius.
pub const WANDER_MIN_CIRCLE_RADIUS: f32 = 5.0;

/// Position and velocity of a body as of the end of the previous tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub position: Vector2D,
    pub velocity: Vector2D,
}

/// Everything a behavior may read when computing its force.
#[derive(Debug, Clone, Copy)]
pub struct SteeringInput<'a> {
    pub velocity: Vector2D,
    pub position: Vector2D,
    pub max_speed: f32,
    pub max_acceleration: f32,
    pub mass: f32,
    /// Previous-tick state of every body in the world, indexed like the world's boids.
    pub snapshots: &'a [BodySnapshot],
}

impl<'a> SteeringInput<'a> {
    /// Input for a body that does not share a world with anything else.
    pub fn standalone(velocity: Vector2D, position: Vector2D, max_speed: f32, max_acceleration: f32, mass: f32) -> Self {
        Self {
            velocity,
            position,
            max_speed,
            max_acceleration,
            mass,
            snapshots: &[],
        }
    }
}

/// The shared force contract.
pub trait Steer {
    fn force(&mut self, input: &SteeringInput<'_>, rng: &mut dyn RandomSource) -> Vector2D;
}

/// Something to steer towards or away from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Target {
    /// A fixed point, treated as stationary.
    Point(Vector2D),
    /// Another boid, by index into the world's snapshots.
    Body(usize),
}

impl Target {
    fn resolve(&self, snapshots: &[BodySnapshot]) -> Option<BodySnapshot> {
        match *self {
            Target::Point(position) => Some(BodySnapshot {
                position,
                velocity: Vector2D::ZERO,
            }),
            Target::Body(index) => snapshots.get(index).copied(),
        }
    }
}

// Reynolds steering: desired velocity at full speed minus current velocity,
// limited to the body's maximum acceleration.
fn steer_towards(desired: Vector2D, input: &SteeringInput<'_>) -> Vector2D {
    if desired.is_zero() {
        return Vector2D::ZERO;
    }
    let mut steering = desired;
    steering.normalcate(input.max_speed).subtract(input.velocity).truncate(input.max_acceleration);
    steering
}

fn seek_point(point: Vector2D, input: &SteeringInput<'_>) -> Vector2D {
    steer_towards(point.copy_and_subtract(input.position), input)
}

// Wander

/// Construction parameters for [`Wander`]. Each is scaled by a random draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WanderConfig {
    pub circle_radius: f32,
    pub wander_angle: f32,
    pub wander_change: f32,
}

impl Default for WanderConfig {
    fn default() -> Self {
        Self {
            circle_radius: 10.0,
            wander_angle: 5.0,
            wander_change: 1.0,
        }
    }
}

/// Smoothly drifting random heading.
///
/// Each call projects a circle ahead of the body along its velocity and adds
/// a short vector pointing at `wander_angle` on that circle, then nudges the
/// angle by a random amount in `[-wander_change / 2, wander_change / 2)`.
/// Because the angle persists between calls, consecutive forces stay close
/// to each other instead of jumping around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wander {
    circle_radius: f32,
    wander_angle: f32,
    wander_change: f32,
}

impl Wander {
    /// Draws three values from `rng`: circle radius, angle, then jitter.
    pub fn new(config: WanderConfig, rng: &mut dyn RandomSource) -> Self {
        let circle_radius = WANDER_MIN_CIRCLE_RADIUS + rng.next_f32() * config.circle_radius;
        let wander_angle = config.wander_angle * rng.next_f32();
        let wander_change = config.wander_change * rng.next_f32();
        Self::from_state(circle_radius, wander_angle, wander_change)
    }

    /// Build with exact values, no randomization.
    pub fn from_state(circle_radius: f32, wander_angle: f32, wander_change: f32) -> Self {
        Self {
            circle_radius,
            wander_angle,
            wander_change,
        }
    }

    pub fn circle_radius(&self) -> f32 {
        self.circle_radius
    }

    pub fn wander_angle(&self) -> f32 {
        self.wander_angle
    }

    pub fn wander_change(&self) -> f32 {
        self.wander_change
    }
}

impl Steer for Wander {
    fn force(&mut self, input: &SteeringInput<'_>, rng: &mut dyn RandomSource) -> Vector2D {
        let mut circle_middle = input.velocity;
        circle_middle.normalize().multiply(self.circle_radius);

        let mut wander_force = Vector2D::ZERO;
        wander_force.set_length(WANDER_FORCE_LENGTH).set_angle(self.wander_angle);

        self.wander_angle += rng.next_f32() * self.wander_change - self.wander_change * 0.5;

        circle_middle.add(wander_force);
        circle_middle
    }
}

// Seek

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seek {
    pub target: Target,
}

impl Seek {
    pub fn new(target: Target) -> Self {
        Self { target }
    }

    pub fn set_target(&mut self, target: Target) {
        self.target = target;
    }
}

impl Steer for Seek {
    fn force(&mut self, input: &SteeringInput<'_>, _rng: &mut dyn RandomSource) -> Vector2D {
        match self.target.resolve(input.snapshots) {
            Some(target) => seek_point(target.position, input),
            None => Vector2D::ZERO,
        }
    }
}

// Evade

/// Flee from where the target will be, predicted from its last velocity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evade {
    pub target: Target,
    /// Ignore the target beyond this distance. `None` means always evade.
    pub panic_distance: Option<f32>,
}

impl Evade {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            panic_distance: None,
        }
    }

    pub fn with_panic_distance(mut self, distance: f32) -> Self {
        self.panic_distance = Some(distance);
        self
    }

    pub fn set_target(&mut self, target: Target) {
        self.target = target;
    }
}

impl Steer for Evade {
    fn force(&mut self, input: &SteeringInput<'_>, _rng: &mut dyn RandomSource) -> Vector2D {
        let Some(target) = self.target.resolve(input.snapshots) else {
            return Vector2D::ZERO;
        };

        let distance = input.position.distance(target.position);
        if let Some(panic) = self.panic_distance {
            if distance > panic {
                return Vector2D::ZERO;
            }
        }

        let lookahead = if input.max_speed > 0.0 { distance / input.max_speed } else { 0.0 };
        let predicted = target.position.copy_and_add(target.velocity * lookahead);

        steer_towards(input.position.copy_and_subtract(predicted), input)
    }
}

// Follow

/// Visit waypoints in order, advancing once within `arrival_radius` of the current one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Follow {
    path: Vec<Vector2D>,
    current: usize,
    pub arrival_radius: f32,
    /// Start over at the first waypoint after the last one.
    pub looped: bool,
}

impl Follow {
    pub fn new(path: Vec<Vector2D>, arrival_radius: f32) -> Self {
        Self {
            path,
            current: 0,
            arrival_radius,
            looped: true,
        }
    }

    pub fn once(mut self) -> Self {
        self.looped = false;
        self
    }

    pub fn path(&self) -> &[Vector2D] {
        &self.path
    }

    /// Index of the waypoint currently being steered towards.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_waypoint(&self) -> Option<Vector2D> {
        self.path.get(self.current).copied()
    }

    fn advance(&mut self) {
        if self.current + 1 < self.path.len() {
            self.current += 1;
        } else if self.looped {
            self.current = 0;
        }
    }
}

impl Steer for Follow {
    fn force(&mut self, input: &SteeringInput<'_>, _rng: &mut dyn RandomSource) -> Vector2D {
        let Some(waypoint) = self.current_waypoint() else {
            return Vector2D::ZERO;
        };
        if input.position.distance(waypoint) < self.arrival_radius {
            self.advance();
        }
        match self.current_waypoint() {
            Some(waypoint) => seek_point(waypoint, input),
            None => Vector2D::ZERO,
        }
    }
}

/// One steering behavior of a known kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    Wander(Wander),
    Seek(Seek),
    Evade(Evade),
    Follow(Follow),
}

impl Behavior {
    pub fn name(&self) -> &'static str {
        match self {
            Behavior::Wander(_) => "wander",
            Behavior::Seek(_) => "seek",
            Behavior::Evade(_) => "evade",
            Behavior::Follow(_) => "follow",
        }
    }
}

impl Steer for Behavior {
    fn force(&mut self, input: &SteeringInput<'_>, rng: &mut dyn RandomSource) -> Vector2D {
        match self {
            Behavior::Wander(b) => b.force(input, rng),
            Behavior::Seek(b) => b.force(input, rng),
            Behavior::Evade(b) => b.force(input, rng),
            Behavior::Follow(b) => b.force(input, rng),
        }
    }
}

impl From<Wander> for Behavior {
    fn from(b: Wander) -> Self {
        Behavior::Wander(b)
    }
}

impl From<Seek> for Behavior {
    fn from(b: Seek) -> Self {
        Behavior::Seek(b)
    }
}

impl From<Evade> for Behavior {
    fn from(b: Evade) -> Self {
        Behavior::Evade(b)
    }
}

impl From<Follow> for Behavior {
    fn from(b: Follow) -> Self {
        Behavior::Follow(b)
    }
}

/// Ordered collection of behaviors whose forces are summed, unweighted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorSet {
    behaviors: Vec<Behavior>,
}

impl BehaviorSet {
    /// Create an empty set. Its force is always zero.
    pub fn new() -> Self {
        Self { behaviors: Vec::new() }
    }

    /// Add a behavior, builder style.
    pub fn with(mut self, behavior: impl Into<Behavior>) -> Self {
        self.behaviors.push(behavior.into());
        self
    }

    pub fn push(&mut self, behavior: impl Into<Behavior>) {
        self.behaviors.push(behavior.into());
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Behavior> {
        self.behaviors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Behavior> {
        self.behaviors.iter_mut()
    }
}

impl Steer for BehaviorSet {
    fn force(&mut self, input: &SteeringInput<'_>, rng: &mut dyn RandomSource) -> Vector2D {
        let mut total = Vector2D::ZERO;
        for behavior in &mut self.behaviors {
            total.add(behavior.force(input, rng));
        }
        total
    }
}
