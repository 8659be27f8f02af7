/*
 * World Module
 *
 * Owns every simulated entity plus the random source, and advances them
 * all by one tick at a time.
 *
 * A tick first records a snapshot of every boid, then updates each boid
 * against those snapshots. No boid ever sees another boid's state from the
 * current tick, so the order boids are updated in does not matter.
 * Particles need no randomness and are updated in parallel when enabled.
 */

use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::agent::{Agent, AgentConfig, Waypoint};
use crate::behavior::{BehaviorSet, BodySnapshot, Evade, Follow, Seek, Target, Wander, WanderConfig};
use crate::body::{Boid, BoidConfig};
use crate::color::Color;
use crate::error::ConfigError;
use crate::params::SimulationParams;
use crate::particle::Particle;
use crate::random::{random_range, RandomSource};
use crate::vector::Vector2D;

/// Width and height of the world, origin at the top-left, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ConfigError::InvalidBounds {
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn centre(&self) -> Vector2D {
        Vector2D::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(&self, point: Vector2D) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

// Balloon palette
const BALLOON_COLORS: [Color; 5] = [
    Color::rgb(230, 57, 70),
    Color::rgb(69, 123, 157),
    Color::rgb(244, 162, 97),
    Color::rgb(42, 157, 143),
    Color::rgb(233, 196, 106),
];

pub struct World {
    bounds: WorldBounds,
    boids: Vec<Boid>,
    agents: Vec<Agent>,
    particles: Vec<Particle>,
    waypoints: Vec<Waypoint>,
    rng: StdRng,
    parallel: bool,
    ticks: u64,
}

impl World {
    /// An empty world. With a seed every run is reproducible.
    pub fn new(bounds: WorldBounds, seed: Option<u64>) -> Result<Self, ConfigError> {
        bounds.validate()?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            bounds,
            boids: Vec::new(),
            agents: Vec::new(),
            particles: Vec::new(),
            waypoints: Vec::new(),
            rng,
            parallel: false,
            ticks: 0,
        })
    }

    /// Populate a world from parameters.
    ///
    /// Boid indices are laid out as seekers, then wanderers, then followers.
    /// Seekers chase the first wanderer; wanderers evade the first seeker;
    /// followers circle a rectangle of waypoints.
    pub fn from_params(params: &SimulationParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let mut world = World::new(params.bounds(), params.seed)?;
        world.parallel = params.enable_parallel;

        let first_wanderer = params.num_seekers;
        for _ in 0..params.num_seekers {
            let behaviors = BehaviorSet::new().with(Seek::new(Target::Body(first_wanderer)));
            let config = BoidConfig {
                radius: params.boid_radius * 0.75,
                color: Color::rgb(200, 40, 40),
                ..world.body_config(params)
            };
            world.add_boid(Boid::new(config, Some(behaviors))?);
        }

        for i in 0..params.num_wanderers {
            let wander = Wander::new(params.wander, &mut world.rng);
            let mut behaviors = BehaviorSet::new().with(wander);
            if params.num_seekers > 0 {
                behaviors.push(Evade::new(Target::Body(0)).with_panic_distance(params.evade_distance));
            }
            let config = BoidConfig {
                color: BALLOON_COLORS[i % BALLOON_COLORS.len()],
                ..world.body_config(params)
            };
            let mut boid = Boid::new(config, Some(behaviors))?;
            if params.balloon_strings {
                boid.attach_string();
            }
            world.add_boid(boid);
        }

        if params.num_followers > 0 {
            world.waypoints = world.rectangle_path(params.waypoint_radius);
            let path: Vec<Vector2D> = world.waypoints.iter().map(|w| w.position).collect();
            for _ in 0..params.num_followers {
                let behaviors = BehaviorSet::new().with(Follow::new(path.clone(), params.waypoint_radius));
                let config = BoidConfig {
                    radius: params.boid_radius * 0.6,
                    color: Color::rgb(120, 120, 220),
                    ..world.body_config(params)
                };
                world.add_boid(Boid::new(config, Some(behaviors))?);
            }
        }

        for _ in 0..params.num_agents {
            let wander = Wander::new(params.wander, &mut world.rng);
            let config = AgentConfig {
                max_speed: params.max_speed * 0.5,
                ..AgentConfig::default()
            };
            let agent = Agent::new(config, world.bounds, BehaviorSet::new().with(wander))?;
            world.agents.push(agent);
        }

        info!(
            boids = world.boids.len(),
            agents = world.agents.len(),
            seed = ?params.seed,
            "world populated"
        );
        Ok(world)
    }

    // Shared limits with a random position and heading
    fn body_config(&mut self, params: &SimulationParams) -> BoidConfig {
        let r = params.boid_radius;
        let x = random_range(&mut self.rng, r, self.bounds.width - r);
        let y = random_range(&mut self.rng, r, self.bounds.height - r);
        let heading = random_range(&mut self.rng, -std::f32::consts::PI, std::f32::consts::PI);
        let velocity = Vector2D::from_angle(heading) * (params.max_speed * 0.5);
        BoidConfig {
            x,
            y,
            vx: velocity.x,
            vy: velocity.y,
            max_speed: params.max_speed,
            max_acceleration: params.max_acceleration,
            radius: r,
            gravity: params.gravity,
            bounce: params.bounce,
            num_string_points: params.num_string_points,
            force_policy: params.force_policy,
            ..BoidConfig::default()
        }
    }

    // Four corners inset by a fifth of the world
    fn rectangle_path(&self, radius: f32) -> Vec<Waypoint> {
        let (w, h) = (self.bounds.width, self.bounds.height);
        [(0.2, 0.2), (0.8, 0.2), (0.8, 0.8), (0.2, 0.8)]
            .into_iter()
            .map(|(fx, fy)| Waypoint::new(Vector2D::new(w * fx, h * fy), radius, Color::PURPLE))
            .collect()
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    /// Add a boid and return its index, usable as a [`Target::Body`].
    pub fn add_boid(&mut self, boid: Boid) -> usize {
        self.boids.push(boid);
        self.boids.len() - 1
    }

    pub fn add_agent(&mut self, agent: Agent) {
        self.agents.push(agent);
    }

    pub fn add_waypoint(&mut self, waypoint: Waypoint) {
        self.waypoints.push(waypoint);
    }

    /// Build a wandering boid with this world's random source.
    pub fn spawn_wanderer(&mut self, config: BoidConfig, wander: WanderConfig) -> Result<usize, ConfigError> {
        let behaviors = BehaviorSet::new().with(Wander::new(wander, &mut self.rng));
        let boid = Boid::new(config, Some(behaviors))?;
        Ok(self.add_boid(boid))
    }

    /// Throw `count` particles out from `at`.
    pub fn explode(&mut self, at: Vector2D, count: usize, radius: f32, color: Color) {
        debug!(x = at.x, y = at.y, count, "explosion");
        let burst = Particle::burst(at, count, radius, color, &mut self.rng);
        self.particles.extend(burst);
    }

    /// Previous-tick state of every boid, indexed like [`World::boids`].
    pub fn snapshots(&self) -> Vec<BodySnapshot> {
        self.boids.iter().map(Boid::snapshot).collect()
    }

    /// Advance every entity by exactly one tick.
    pub fn tick(&mut self) {
        let snapshots = self.snapshots();
        let bounds = self.bounds;

        for boid in &mut self.boids {
            boid.update(bounds, &snapshots, &mut self.rng);
            boid.update_string();
        }

        for agent in &mut self.agents {
            agent.tick(&snapshots, &mut self.rng);
        }

        self.update_particles();
        self.ticks += 1;
    }

    #[cfg(feature = "parallel")]
    fn update_particles(&mut self) {
        let bounds = self.bounds;
        if self.parallel {
            self.particles.par_iter_mut().for_each(|p| p.update(bounds));
        } else {
            self.particles.iter_mut().for_each(|p| p.update(bounds));
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn update_particles(&mut self) {
        let bounds = self.bounds;
        self.particles.iter_mut().for_each(|p| p.update(bounds));
    }

    /// Drop particles the caller no longer wants, e.g. those resting on the floor.
    pub fn retain_particles(&mut self, keep: impl FnMut(&Particle) -> bool) {
        self.particles.retain(keep);
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn boids_mut(&mut self) -> &mut [Boid] {
        &mut self.boids
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn rng(&mut self) -> &mut dyn RandomSource {
        &mut self.rng
    }
}
