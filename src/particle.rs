/*
 * Particle Module
 *
 * Ballistic debris for one-shot effects such as explosions. Particles
 * fall under gravity, bounce and skid on the floor, and ricochet off the
 * side walls. They know nothing about steering behaviors, and the caller
 * decides when to throw them away.
 */

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::random::{random_range, RandomSource};
use crate::vector::Vector2D;
use crate::world::WorldBounds;

/// Largest initial speed per axis of a burst particle.
pub const BURST_SPEED: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub radius: f32,
    pub color: Color,
    pub friction: f32,
    pub bounce: f32,
    pub gravity: f32,
}

impl Particle {
    /// A particle flying off in a random direction, each velocity component
    /// drawn from `[-BURST_SPEED, BURST_SPEED)`.
    pub fn new(position: Vector2D, radius: f32, color: Color, rng: &mut dyn RandomSource) -> Self {
        let vx = random_range(rng, -BURST_SPEED, BURST_SPEED);
        let vy = random_range(rng, -BURST_SPEED, BURST_SPEED);
        Self::with_velocity(position, Vector2D::new(vx, vy), radius, color)
    }

    pub fn with_velocity(position: Vector2D, velocity: Vector2D, radius: f32, color: Color) -> Self {
        Self {
            position,
            velocity,
            radius,
            color,
            friction: 0.9,
            bounce: -0.6,
            gravity: 0.25,
        }
    }

    /// `count` particles starting at `origin`.
    pub fn burst(origin: Vector2D, count: usize, radius: f32, color: Color, rng: &mut dyn RandomSource) -> Vec<Particle> {
        (0..count).map(|_| Particle::new(origin, radius, color, &mut *rng)).collect()
    }

    /// The line a particle rests on, one unit above the bottom edge so it is not clipped.
    pub fn floor(&self, bounds: WorldBounds) -> f32 {
        bounds.height - (self.radius + 1.0)
    }

    pub fn is_on_floor(&self, bounds: WorldBounds) -> bool {
        self.position.y >= self.floor(bounds)
    }

    pub fn update(&mut self, bounds: WorldBounds) {
        let floor = self.floor(bounds);
        if self.position.y > floor {
            self.position.y = floor;
            self.velocity.y *= self.bounce;
            // friction only while touching the floor
            self.velocity.multiply(self.friction);
        } else {
            self.velocity.y += self.gravity;
        }

        // Side walls flip vx without damping, checked where this tick's move would land.
        let next_x = self.position.x + self.velocity.x;
        let past_right = next_x > bounds.width - self.radius && self.velocity.x > 0.0;
        let past_left = next_x < self.radius && self.velocity.x < 0.0;
        if past_right || past_left {
            self.velocity.x = -self.velocity.x;
        }

        self.position.add(self.velocity);
    }
}
