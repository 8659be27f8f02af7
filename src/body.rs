/*
 * Body Module
 *
 * Defines the Boid, the kinematic body that steers itself with a
 * BehaviorSet.
 *
 * The per-tick update runs in a fixed order:
 * 1. clamp velocity to max speed
 * 2. face along the clamped velocity
 * 3. move by the clamped velocity
 * 4. ask the behaviors for a force and fold it into velocity
 * 5. apply gravity
 * 6. bounce off the world bounds
 *
 * Facing and displacement therefore reflect last tick's velocity, and the
 * force computed this tick only shows up in the next tick's movement.
 */

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::balloon::BalloonString;
use crate::behavior::{BehaviorSet, BodySnapshot, Steer, SteeringInput};
use crate::color::Color;
use crate::error::ConfigError;
use crate::random::RandomSource;
use crate::vector::Vector2D;
use crate::world::WorldBounds;

/// Padding added around a body's circle by [`Boid::bounds`].
const BOUNDS_PADDING: f32 = 10.0;

/// How a steering force becomes a velocity change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForcePolicy {
    /// Add the force to velocity as-is. Mass and max acceleration are only
    /// passed through to the behaviors.
    #[default]
    Unscaled,
    /// Divide the force by mass and clamp it to max acceleration first.
    MassScaled,
}

impl ForcePolicy {
    pub fn apply(self, force: Vector2D, mass: f32, max_acceleration: f32) -> Vector2D {
        match self {
            ForcePolicy::Unscaled => force,
            ForcePolicy::MassScaled => {
                let mut acceleration = force;
                acceleration.divide(mass).truncate(max_acceleration);
                acceleration
            }
        }
    }
}

/// Every recognized boid option with its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoidConfig {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub mass: f32,
    pub max_speed: f32,
    pub max_acceleration: f32,
    pub radius: f32,
    pub gravity: f32,
    /// Restitution on wall contact. The velocity component is always
    /// inverted; only the magnitude of `bounce` is used. Zero disables walls.
    pub bounce: f32,
    pub friction: f32,
    pub spring: f32,
    pub x_scale: f32,
    pub y_scale: f32,
    pub color: Color,
    pub stroke_color: Color,
    pub line_width: f32,
    pub num_string_points: usize,
    pub force_policy: ForcePolicy,
}

impl Default for BoidConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            mass: 20.0,
            max_speed: 4.0,
            max_acceleration: 3.0,
            radius: 20.0,
            gravity: 0.0,
            bounce: 0.0,
            friction: 0.0,
            spring: 0.0,
            x_scale: 1.0,
            y_scale: 1.0,
            color: Color::GREEN,
            stroke_color: Color::BLACK,
            line_width: 2.0,
            num_string_points: 5,
            force_policy: ForcePolicy::Unscaled,
        }
    }
}

fn check_limit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidLimit { field, value })
    }
}

impl BoidConfig {
    pub fn at(x: f32, y: f32) -> Self {
        Self { x, y, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_limit("radius", self.radius)?;
        check_limit("max_speed", self.max_speed)?;
        check_limit("max_acceleration", self.max_acceleration)?;
        check_limit("line_width", self.line_width)?;
        if !(self.mass > 0.0) || !self.mass.is_finite() {
            return Err(ConfigError::NonPositiveMass(self.mass));
        }
        Ok(())
    }
}

/// Axis-aligned rectangle, `x`/`y` at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// What a renderer needs to draw a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyAppearance {
    pub position: Vector2D,
    pub rotation: f32,
    pub radius: f32,
    pub x_scale: f32,
    pub y_scale: f32,
    pub color: Color,
    pub stroke_color: Color,
    pub line_width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    position: Vector2D,
    velocity: Vector2D,
    /// Radians, derived from velocity on every update.
    rotation: f32,
    mass: f32,
    max_speed: f32,
    max_acceleration: f32,
    radius: f32,
    behaviors: BehaviorSet,
    pub gravity: f32,
    pub bounce: f32,
    pub friction: f32,
    pub spring: f32,
    pub x_scale: f32,
    pub y_scale: f32,
    pub color: Color,
    pub stroke_color: Color,
    pub line_width: f32,
    pub force_policy: ForcePolicy,
    num_string_points: usize,
    string: Option<BalloonString>,
}

impl Boid {
    /// Build a boid from `config`. A boid must steer, so `behaviors` is
    /// required; pass an empty set for a purely ballistic body.
    pub fn new(config: BoidConfig, behaviors: Option<BehaviorSet>) -> Result<Self, ConfigError> {
        config.validate()?;
        let behaviors = behaviors.ok_or(ConfigError::MissingBehaviors)?;

        debug!(
            x = config.x,
            y = config.y,
            behaviors = behaviors.len(),
            "boid created"
        );

        Ok(Self {
            position: Vector2D::new(config.x, config.y),
            velocity: Vector2D::new(config.vx, config.vy),
            rotation: 0.0,
            mass: config.mass,
            max_speed: config.max_speed,
            max_acceleration: config.max_acceleration,
            radius: config.radius,
            behaviors,
            gravity: config.gravity,
            bounce: config.bounce,
            friction: config.friction,
            spring: config.spring,
            x_scale: config.x_scale,
            y_scale: config.y_scale,
            color: config.color,
            stroke_color: config.stroke_color,
            line_width: config.line_width,
            force_policy: config.force_policy,
            num_string_points: config.num_string_points,
            string: None,
        })
    }

    /// Advance one tick. `snapshots` is the previous-tick state of every
    /// body in the world; pass `&[]` for a lone boid.
    ///
    /// Speed is clamped to `max_speed` at the start of the update. The force
    /// added afterwards may leave the velocity above the limit until the next
    /// call clamps it again.
    pub fn update(&mut self, bounds: WorldBounds, snapshots: &[BodySnapshot], rng: &mut dyn RandomSource) {
        self.velocity.truncate(self.max_speed);
        self.rotation = self.velocity.angle();

        let input = SteeringInput {
            velocity: self.velocity,
            position: self.position,
            max_speed: self.max_speed,
            max_acceleration: self.max_acceleration,
            mass: self.mass,
            snapshots,
        };

        self.position.add(self.velocity);

        let force = self.behaviors.force(&input, rng);
        let force = self.force_policy.apply(force, self.mass, self.max_acceleration);
        self.velocity.add(force);

        if self.gravity != 0.0 {
            self.velocity.y += self.gravity;
        }

        if self.bounce != 0.0 {
            self.bounce_off_walls(bounds);
        }
    }

    fn bounce_off_walls(&mut self, bounds: WorldBounds) {
        let restitution = self.bounce.abs();

        if self.position.x + self.radius > bounds.width {
            self.position.x = bounds.width - self.radius;
            self.velocity.x *= -restitution;
        } else if self.position.x - self.radius < 0.0 {
            self.position.x = self.radius;
            self.velocity.x *= -restitution;
        }

        if self.position.y + self.radius > bounds.height {
            self.position.y = bounds.height - self.radius;
            self.velocity.y *= -restitution;
        } else if self.position.y - self.radius < 0.0 {
            self.position.y = self.radius;
            self.velocity.y *= -restitution;
        }
    }

    /// Hang a balloon string of `num_string_points` below the boid.
    pub fn attach_string(&mut self) {
        self.string = Some(BalloonString::hang(self.position, self.radius, self.num_string_points));
    }

    pub fn string(&self) -> Option<&BalloonString> {
        self.string.as_ref()
    }

    /// Let the balloon string catch up with the boid's current position.
    pub fn update_string(&mut self) {
        if let Some(string) = &mut self.string {
            string.update(self.position);
        }
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn set_position(&mut self, position: Vector2D) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vector2D {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vector2D) {
        self.velocity = velocity;
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Non-positive or non-finite masses are rejected.
    pub fn set_mass(&mut self, mass: f32) -> Result<(), ConfigError> {
        if !(mass > 0.0) || !mass.is_finite() {
            return Err(ConfigError::NonPositiveMass(mass));
        }
        self.mass = mass;
        Ok(())
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn set_max_speed(&mut self, max_speed: f32) -> Result<(), ConfigError> {
        check_limit("max_speed", max_speed)?;
        self.max_speed = max_speed;
        Ok(())
    }

    pub fn max_acceleration(&self) -> f32 {
        self.max_acceleration
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn behaviors(&self) -> &BehaviorSet {
        &self.behaviors
    }

    pub fn behaviors_mut(&mut self) -> &mut BehaviorSet {
        &mut self.behaviors
    }

    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            position: self.position,
            velocity: self.velocity,
        }
    }

    /// Whether `point` lies strictly closer than `range`.
    pub fn is_within_range(&self, point: Vector2D, range: f32) -> bool {
        self.position.distance(point) < range
    }

    /// Scaled circle plus a fixed padding on each side.
    pub fn bounds(&self) -> Rect {
        Rect {
            x: self.position.x - self.radius * self.x_scale - BOUNDS_PADDING,
            y: self.position.y - self.radius * self.y_scale - BOUNDS_PADDING,
            width: self.radius * 2.0 * self.x_scale + BOUNDS_PADDING * 2.0,
            height: self.radius * 2.0 * self.y_scale + BOUNDS_PADDING * 2.0,
        }
    }

    pub fn appearance(&self) -> BodyAppearance {
        BodyAppearance {
            position: self.position,
            rotation: self.rotation,
            radius: self.radius,
            x_scale: self.x_scale,
            y_scale: self.y_scale,
            color: self.color,
            stroke_color: self.stroke_color,
            line_width: self.line_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{Seek, Target, Wander};
    use crate::random::SequenceSource;

    const EPS: f32 = 1e-5;

    fn world() -> WorldBounds {
        WorldBounds::new(800.0, 600.0)
    }

    fn still(config: BoidConfig) -> Boid {
        Boid::new(config, Some(BehaviorSet::new())).unwrap()
    }

    #[test]
    fn defaults_match_documented_values() {
        let boid = still(BoidConfig::default());
        assert_eq!(boid.mass(), 20.0);
        assert_eq!(boid.max_speed(), 4.0);
        assert_eq!(boid.max_acceleration(), 3.0);
        assert_eq!(boid.radius(), 20.0);
        assert_eq!(boid.gravity, 0.0);
        assert_eq!(boid.bounce, 0.0);
    }

    #[test]
    fn missing_behaviors_fail_fast() {
        let err = Boid::new(BoidConfig::default(), None).unwrap_err();
        assert_eq!(err, ConfigError::MissingBehaviors);
    }

    #[test]
    fn invalid_limits_are_rejected() {
        let bad_radius = BoidConfig { radius: -1.0, ..BoidConfig::default() };
        assert!(matches!(
            Boid::new(bad_radius, Some(BehaviorSet::new())),
            Err(ConfigError::InvalidLimit { field: "radius", .. })
        ));

        let bad_speed = BoidConfig { max_speed: f32::NAN, ..BoidConfig::default() };
        assert!(Boid::new(bad_speed, Some(BehaviorSet::new())).is_err());

        let bad_mass = BoidConfig { mass: 0.0, ..BoidConfig::default() };
        assert_eq!(
            Boid::new(bad_mass, Some(BehaviorSet::new())).unwrap_err(),
            ConfigError::NonPositiveMass(0.0)
        );
    }

    #[test]
    fn velocity_is_clamped_before_moving() {
        let mut boid = still(BoidConfig { x: 100.0, y: 100.0, vx: 30.0, vy: 40.0, ..BoidConfig::default() });
        let mut rng = SequenceSource::default();
        boid.update(world(), &[], &mut rng);
        assert!(boid.velocity().approx_eq(Vector2D::new(2.4, 3.2), EPS));
        assert!(boid.position().approx_eq(Vector2D::new(102.4, 103.2), EPS));
        assert!((boid.rotation() - 4f32.atan2(3.0)).abs() < EPS);
    }

    #[test]
    fn oversized_force_is_clamped_on_the_next_tick() {
        // wander with no jitter pushes 10.2 along the heading, above max speed 4
        let behaviors = BehaviorSet::new().with(Wander::from_state(10.0, 0.0, 0.0));
        let config = BoidConfig { vx: 4.0, ..BoidConfig::at(100.0, 100.0) };
        let mut boid = Boid::new(config, Some(behaviors)).unwrap();
        let mut rng = SequenceSource::default();

        boid.update(world(), &[], &mut rng);
        assert!(boid.position().approx_eq(Vector2D::new(104.0, 100.0), EPS));
        assert!(boid.velocity().approx_eq(Vector2D::new(14.2, 0.0), EPS));
        assert!(boid.velocity().length() > boid.max_speed());

        boid.update(world(), &[], &mut rng);
        // clamped back to 4 before moving, then pushed again
        assert!(boid.position().approx_eq(Vector2D::new(108.0, 100.0), EPS));
        assert!(boid.velocity().approx_eq(Vector2D::new(14.2, 0.0), EPS));
    }

    #[test]
    fn config_rejects_unparseable_color() {
        let ok: BoidConfig = serde_json::from_str(r##"{ "color": "#0f0" }"##).unwrap();
        assert_eq!(ok.color, Color::GREEN);

        let err = serde_json::from_str::<BoidConfig>(r#"{ "color": "nope" }"#).unwrap_err();
        assert!(err.to_string().contains("Expected #RGB or #RRGGBB"));
    }

    #[test]
    fn force_lags_one_tick() {
        let behaviors = BehaviorSet::new().with(Seek::new(Target::Point(Vector2D::new(1000.0, 100.0))));
        let mut boid = Boid::new(BoidConfig::at(100.0, 100.0), Some(behaviors)).unwrap();
        let mut rng = SequenceSource::default();

        boid.update(world(), &[], &mut rng);
        assert_eq!(boid.position(), Vector2D::new(100.0, 100.0));
        assert!(boid.velocity().approx_eq(Vector2D::new(3.0, 0.0), EPS));
        assert_eq!(boid.rotation(), 0.0);

        boid.update(world(), &[], &mut rng);
        assert!(boid.position().approx_eq(Vector2D::new(103.0, 100.0), EPS));
    }

    #[test]
    fn mass_scaled_policy_divides_by_mass() {
        let behaviors = BehaviorSet::new().with(Seek::new(Target::Point(Vector2D::new(1000.0, 100.0))));
        let config = BoidConfig { force_policy: ForcePolicy::MassScaled, ..BoidConfig::at(100.0, 100.0) };
        let mut boid = Boid::new(config, Some(behaviors)).unwrap();
        let mut rng = SequenceSource::default();
        boid.update(world(), &[], &mut rng);
        assert!(boid.velocity().approx_eq(Vector2D::new(3.0 / 20.0, 0.0), EPS));
    }

    #[test]
    fn gravity_adds_to_vertical_velocity() {
        let mut boid = still(BoidConfig { gravity: 0.5, ..BoidConfig::at(100.0, 100.0) });
        let mut rng = SequenceSource::default();
        boid.update(world(), &[], &mut rng);
        assert_eq!(boid.velocity(), Vector2D::new(0.0, 0.5));
    }

    #[test]
    fn bounce_clamps_each_wall_independently() {
        let mut rng = SequenceSource::default();
        let base = BoidConfig { bounce: -0.5, radius: 10.0, ..BoidConfig::default() };

        // Right wall
        let mut boid = still(BoidConfig { x: 795.0, y: 300.0, vx: 3.0, vy: 1.0, ..base.clone() });
        boid.update(world(), &[], &mut rng);
        assert_eq!(boid.position().x, 790.0);
        assert!(boid.velocity().approx_eq(Vector2D::new(-1.5, 1.0), EPS));

        // Left wall
        let mut boid = still(BoidConfig { x: 12.0, y: 300.0, vx: -3.0, vy: 1.0, ..base.clone() });
        boid.update(world(), &[], &mut rng);
        assert_eq!(boid.position().x, 10.0);
        assert!(boid.velocity().approx_eq(Vector2D::new(1.5, 1.0), EPS));

        // Floor
        let mut boid = still(BoidConfig { x: 400.0, y: 588.0, vx: 1.0, vy: 3.0, ..base.clone() });
        boid.update(world(), &[], &mut rng);
        assert_eq!(boid.position().y, 590.0);
        assert!(boid.velocity().approx_eq(Vector2D::new(1.0, -1.5), EPS));

        // Ceiling
        let mut boid = still(BoidConfig { x: 400.0, y: 11.0, vx: 1.0, vy: -3.0, ..base });
        boid.update(world(), &[], &mut rng);
        assert_eq!(boid.position().y, 10.0);
        assert!(boid.velocity().approx_eq(Vector2D::new(1.0, 1.5), EPS));
    }

    #[test]
    fn positive_bounce_still_inverts() {
        let mut rng = SequenceSource::default();
        let mut boid = still(BoidConfig { x: 795.0, y: 300.0, vx: 3.0, bounce: 0.5, radius: 10.0, ..BoidConfig::default() });
        boid.update(world(), &[], &mut rng);
        assert!((boid.velocity().x + 1.5).abs() < EPS);
    }

    #[test]
    fn zero_bounce_ignores_walls() {
        let mut rng = SequenceSource::default();
        let mut boid = still(BoidConfig { x: 799.0, y: 300.0, vx: 3.0, ..BoidConfig::default() });
        boid.update(world(), &[], &mut rng);
        assert_eq!(boid.position().x, 802.0);
        assert_eq!(boid.velocity().x, 3.0);
    }

    #[test]
    fn accessors_validate() {
        let mut boid = still(BoidConfig::default());
        assert!(boid.set_mass(-2.0).is_err());
        assert!(boid.set_mass(5.0).is_ok());
        assert_eq!(boid.mass(), 5.0);
        assert!(boid.set_max_speed(-1.0).is_err());
        boid.set_position(Vector2D::new(3.0, 4.0));
        assert!(boid.is_within_range(Vector2D::ZERO, 5.01));
        assert!(!boid.is_within_range(Vector2D::ZERO, 5.0));
    }

    #[test]
    fn bounds_pad_scaled_circle() {
        let boid = still(BoidConfig { x: 100.0, y: 50.0, radius: 10.0, x_scale: 2.0, ..BoidConfig::default() });
        assert_eq!(boid.bounds(), Rect { x: 70.0, y: 30.0, width: 60.0, height: 40.0 });
    }

    #[test]
    fn string_trails_the_boid() {
        let mut boid = still(BoidConfig { num_string_points: 3, ..BoidConfig::at(100.0, 100.0) });
        boid.attach_string();
        assert_eq!(boid.string().map(BalloonString::len), Some(3));
        boid.set_position(Vector2D::new(150.0, 100.0));
        boid.update_string();
        let first = boid.string().unwrap().points()[0];
        assert!(first.velocity.x > 0.0);
    }
}
