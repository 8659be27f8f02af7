/*
 * Agent Module
 *
 * Agents are turret-like bodies (a round base with a rectangular gun)
 * driven through a SteeringForce accumulator. Unlike Boid, an agent moves
 * first and clamps afterwards, so its speed limit holds at the end of the
 * update rather than the start.
 */

use serde::{Deserialize, Serialize};

use crate::behavior::{BehaviorSet, BodySnapshot, Steer, SteeringInput};
use crate::body::BodyAppearance;
use crate::color::Color;
use crate::error::ConfigError;
use crate::random::RandomSource;
use crate::vector::Vector2D;
use crate::world::WorldBounds;

/// Mass reported to behaviors steering an agent.
const AGENT_MASS: f32 = 1.0;

/// Accumulates the influences of all steering behaviors for one update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SteeringForce {
    pub linear: Vector2D,
}

impl SteeringForce {
    pub fn add(&mut self, force: Vector2D) -> &mut Self {
        self.linear.add(force);
        self
    }

    pub fn clear(&mut self) {
        self.linear.zero();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// `None` places the agent at the centre of the world.
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub vx: f32,
    pub vy: f32,
    pub max_speed: f32,
    pub max_acceleration: f32,
    pub rotation: f32,
    pub radius: f32,
    pub color: Color,
    pub stroke_color: Color,
    pub line_width: f32,
    pub gun_width: f32,
    pub gun_height: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            vx: 0.0,
            vy: 0.0,
            max_speed: 4.0,
            max_acceleration: 2.0,
            rotation: 0.0,
            radius: 25.0,
            color: Color::GREY,
            stroke_color: Color::BLACK,
            line_width: 3.0,
            gun_width: 14.0,
            gun_height: 28.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub rotation: f32,
    max_speed: f32,
    max_acceleration: f32,
    pub radius: f32,
    pub color: Color,
    pub stroke_color: Color,
    pub line_width: f32,
    pub gun_width: f32,
    pub gun_height: f32,
    behaviors: BehaviorSet,
    steering: SteeringForce,
}

impl Agent {
    pub fn new(config: AgentConfig, bounds: WorldBounds, behaviors: BehaviorSet) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("max_speed", config.max_speed),
            ("max_acceleration", config.max_acceleration),
            ("radius", config.radius),
            ("line_width", config.line_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidLimit { field, value });
            }
        }

        let centre = bounds.centre();
        Ok(Self {
            position: Vector2D::new(config.x.unwrap_or(centre.x), config.y.unwrap_or(centre.y)),
            velocity: Vector2D::new(config.vx, config.vy),
            rotation: config.rotation,
            max_speed: config.max_speed,
            max_acceleration: config.max_acceleration,
            radius: config.radius,
            color: config.color,
            stroke_color: config.stroke_color,
            line_width: config.line_width,
            gun_width: config.gun_width,
            gun_height: config.gun_height,
            behaviors,
            steering: SteeringForce::default(),
        })
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn max_acceleration(&self) -> f32 {
        self.max_acceleration
    }

    pub fn behaviors_mut(&mut self) -> &mut BehaviorSet {
        &mut self.behaviors
    }

    /// Move by the current velocity, then fold in `force`, clamp the speed
    /// and face along the new velocity.
    pub fn update_physics(&mut self, force: SteeringForce) {
        self.position.add(self.velocity);
        self.velocity.add(force.linear);

        let speed = self.velocity.length();
        if speed > 0.0 && speed > self.max_speed {
            self.velocity.multiply(self.max_speed / speed);
        }

        self.rotation = self.velocity.y.atan2(self.velocity.x);
    }

    /// Gather this tick's force from the agent's behaviors and apply it.
    pub fn tick(&mut self, snapshots: &[BodySnapshot], rng: &mut dyn RandomSource) {
        let input = SteeringInput {
            velocity: self.velocity,
            position: self.position,
            max_speed: self.max_speed,
            max_acceleration: self.max_acceleration,
            mass: AGENT_MASS,
            snapshots,
        };
        self.steering.clear();
        self.steering.add(self.behaviors.force(&input, rng));
        let force = self.steering;
        self.update_physics(force);
    }

    pub fn appearance(&self) -> BodyAppearance {
        BodyAppearance {
            position: self.position,
            rotation: self.rotation,
            radius: self.radius,
            x_scale: 1.0,
            y_scale: 1.0,
            color: self.color,
            stroke_color: self.stroke_color,
            line_width: self.line_width,
        }
    }
}

/// A marker on a path, drawn as a small circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: Vector2D,
    pub radius: f32,
    pub color: Color,
}

impl Waypoint {
    pub fn new(position: Vector2D, radius: f32, color: Color) -> Self {
        Self { position, radius, color }
    }
}
