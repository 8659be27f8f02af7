/*
 * Steering Behaviors - Module Definitions
 *
 * This file defines the module structure for the steering simulation.
 * The simulation core (vectors, bodies, behaviors, particles, world) has
 * no windowing dependencies; the nannou demo modules sit behind the
 * `demo` feature.
 */

// Re-export key components for easier access
pub use agent::{Agent, AgentConfig, SteeringForce, Waypoint};
pub use balloon::BalloonString;
pub use behavior::{Behavior, BehaviorSet, BodySnapshot, Evade, Follow, Seek, Steer, SteeringInput, Target, Wander, WanderConfig};
pub use body::{Boid, BoidConfig, BodyAppearance, ForcePolicy, Rect};
pub use color::Color;
pub use error::{ConfigError, ParamsError, ParseColorError, ParseVectorError};
pub use params::SimulationParams;
pub use particle::Particle;
pub use random::{random_range, RandomSource, SequenceSource};
pub use vector::Vector2D;
pub use world::{World, WorldBounds};

// Define modules
pub mod agent;
pub mod balloon;
pub mod behavior;
pub mod body;
pub mod color;
pub mod error;
pub mod params;
pub mod particle;
pub mod random;
pub mod vector;
pub mod world;

#[cfg(feature = "demo")]
pub mod app;
#[cfg(feature = "demo")]
pub mod camera;
#[cfg(feature = "demo")]
pub mod debug;
#[cfg(feature = "demo")]
pub mod input;
#[cfg(feature = "demo")]
pub mod renderer;
#[cfg(feature = "demo")]
pub mod ui;
