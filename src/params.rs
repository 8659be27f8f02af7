/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * adjustable parameters for the steering simulation. Parameters come from
 * their defaults or a JSON file and can be modified through the UI. It also
 * provides change detection so the app knows when to rebuild the world.
 */

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::behavior::WanderConfig;
use crate::body::ForcePolicy;
use crate::error::{ConfigError, ParamsError};
use crate::world::WorldBounds;

// Parameters for the simulation that can be adjusted via UI or a parameter file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub world_width: f32,
    pub world_height: f32,
    // Population
    pub num_wanderers: usize,
    pub num_seekers: usize,
    pub num_followers: usize,
    pub num_agents: usize,
    // Body limits
    pub max_speed: f32,
    pub max_acceleration: f32,
    pub boid_radius: f32,
    pub gravity: f32,
    pub bounce: f32,
    pub force_policy: ForcePolicy,
    // Behaviors
    pub wander: WanderConfig,
    pub evade_distance: f32,
    pub waypoint_radius: f32,
    // Effects
    pub balloon_strings: bool,
    pub num_string_points: usize,
    pub particles_per_explosion: usize,
    pub particle_radius: f32,
    // Run control
    pub seed: Option<u64>,
    pub fixed_physics_fps: f32,
    pub enable_parallel: bool,
    pub show_debug: bool,
    pub pause_simulation: bool,

    // Internal state for tracking changes
    #[serde(skip)]
    pub previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSnapshot {
    population: [usize; 4],
    max_speed: f32,
    max_acceleration: f32,
    boid_radius: f32,
    gravity: f32,
    bounce: f32,
    force_policy: ForcePolicy,
    balloon_strings: bool,
    particles_per_explosion: usize,
    fixed_physics_fps: f32,
    enable_parallel: bool,
    show_debug: bool,
    pause_simulation: bool,
}

/// Result of comparing the current parameters against the last snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamChanges {
    /// A population count or body limit changed; the world must be rebuilt.
    pub rebuild_world: bool,
    /// Anything at all changed.
    pub any: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            world_width: 1024.0,
            world_height: 768.0,
            num_wanderers: 12,
            num_seekers: 1,
            num_followers: 2,
            num_agents: 1,
            max_speed: 4.0,
            max_acceleration: 3.0,
            boid_radius: 20.0,
            gravity: 0.0,
            bounce: -0.7,
            force_policy: ForcePolicy::Unscaled,
            wander: WanderConfig::default(),
            evade_distance: 150.0,
            waypoint_radius: 25.0,
            balloon_strings: true,
            num_string_points: 5,
            particles_per_explosion: 40,
            particle_radius: 4.0,
            seed: None,
            fixed_physics_fps: 60.0,
            enable_parallel: true,
            show_debug: false,
            pause_simulation: false,
            previous_values: None,
        }
    }
}

impl SimulationParams {
    /// Read parameters from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let params = Self::from_json(&text)?;
        info!(path = %path.display(), "loaded simulation parameters");
        Ok(params)
    }

    pub fn from_json(text: &str) -> Result<Self, ParamsError> {
        let params: SimulationParams = serde_json::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn bounds(&self) -> WorldBounds {
        WorldBounds::new(self.world_width, self.world_height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds().validate()?;
        for (field, value) in [
            ("max_speed", self.max_speed),
            ("max_acceleration", self.max_acceleration),
            ("boid_radius", self.boid_radius),
            ("particle_radius", self.particle_radius),
            ("evade_distance", self.evade_distance),
            ("waypoint_radius", self.waypoint_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidLimit { field, value });
            }
        }
        if !(self.fixed_physics_fps > 0.0) {
            return Err(ConfigError::InvalidLimit {
                field: "fixed_physics_fps",
                value: self.fixed_physics_fps,
            });
        }
        Ok(())
    }

    fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            population: [self.num_wanderers, self.num_seekers, self.num_followers, self.num_agents],
            max_speed: self.max_speed,
            max_acceleration: self.max_acceleration,
            boid_radius: self.boid_radius,
            gravity: self.gravity,
            bounce: self.bounce,
            force_policy: self.force_policy,
            balloon_strings: self.balloon_strings,
            particles_per_explosion: self.particles_per_explosion,
            fixed_physics_fps: self.fixed_physics_fps,
            enable_parallel: self.enable_parallel,
            show_debug: self.show_debug,
            pause_simulation: self.pause_simulation,
        }
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(self.snapshot());
    }

    // Compare against the last snapshot; nothing has changed if there is none
    pub fn detect_changes(&self) -> ParamChanges {
        let Some(prev) = &self.previous_values else {
            return ParamChanges::default();
        };
        let now = self.snapshot();

        let rebuild_world = now.population != prev.population
            || now.max_speed != prev.max_speed
            || now.max_acceleration != prev.max_acceleration
            || now.boid_radius != prev.boid_radius
            || now.gravity != prev.gravity
            || now.bounce != prev.bounce
            || now.force_policy != prev.force_policy
            || now.balloon_strings != prev.balloon_strings;

        ParamChanges {
            rebuild_world,
            any: now != *prev,
        }
    }

    // Get parameter ranges for UI sliders
    pub fn get_population_range() -> std::ops::RangeInclusive<usize> {
        0..=200
    }

    pub fn get_max_speed_range() -> std::ops::RangeInclusive<f32> {
        0.5..=20.0
    }

    pub fn get_acceleration_range() -> std::ops::RangeInclusive<f32> {
        0.0..=10.0
    }

    pub fn get_radius_range() -> std::ops::RangeInclusive<f32> {
        2.0..=60.0
    }

    pub fn get_gravity_range() -> std::ops::RangeInclusive<f32> {
        0.0..=2.0
    }

    pub fn get_bounce_range() -> std::ops::RangeInclusive<f32> {
        -1.0..=0.0
    }

    pub fn get_particle_count_range() -> std::ops::RangeInclusive<usize> {
        1..=300
    }

    pub fn get_physics_fps_range() -> std::ops::RangeInclusive<f32> {
        10.0..=240.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let params = SimulationParams::from_json(r#"{ "num_wanderers": 3, "seed": 9, "wander": { "circle_radius": 4.0 } }"#).unwrap();
        assert_eq!(params.num_wanderers, 3);
        assert_eq!(params.seed, Some(9));
        assert_eq!(params.wander.circle_radius, 4.0);
        assert_eq!(params.wander.wander_change, 1.0);
        assert_eq!(params.max_speed, 4.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            SimulationParams::from_json(r#"{ "world_width": -5.0 }"#),
            Err(ParamsError::Invalid(ConfigError::InvalidBounds { .. }))
        ));
        assert!(matches!(
            SimulationParams::from_json(r#"{ "max_speed": -1.0 }"#),
            Err(ParamsError::Invalid(ConfigError::InvalidLimit { field: "max_speed", .. }))
        ));
        assert!(matches!(SimulationParams::from_json("{ nope"), Err(ParamsError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = SimulationParams::load("/definitely/not/here.json");
        assert!(matches!(result, Err(ParamsError::Io(_))));
    }

    #[test]
    fn change_detection() {
        let mut params = SimulationParams::default();
        assert_eq!(params.detect_changes(), ParamChanges::default());

        params.take_snapshot();
        assert_eq!(params.detect_changes(), ParamChanges::default());

        params.show_debug = true;
        assert_eq!(params.detect_changes(), ParamChanges { rebuild_world: false, any: true });

        params.take_snapshot();
        params.num_wanderers += 1;
        assert_eq!(params.detect_changes(), ParamChanges { rebuild_world: true, any: true });
    }
}
