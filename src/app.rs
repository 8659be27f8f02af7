/*
 * Application Module
 *
 * This module defines the nannou model for the steering demo. It owns the
 * simulation World and advances it with a fixed timestep, so the number of
 * ticks depends on elapsed time and never on the render rate.
 */

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{error, info, warn};

use crate::camera::Camera;
use crate::color::Color;
use crate::debug::DebugInfo;
use crate::input;
use crate::params::SimulationParams;
use crate::renderer;
use crate::ui;
use crate::world::World;

// Explosion debris colors, picked in turn
const PARTICLE_COLORS: [Color; 3] = [Color::rgb(255, 200, 60), Color::rgb(255, 120, 40), Color::WHITE];

/// Resting particles slower than this are dropped.
const PARTICLE_REST_SPEED: f32 = 0.1;

static STARTUP_PARAMS: OnceLock<SimulationParams> = OnceLock::new();

/// Parameters the first world is built from. nannou builds the model from a
/// plain function pointer, so they are handed over before the app starts.
pub fn set_startup_params(params: SimulationParams) {
    if STARTUP_PARAMS.set(params).is_err() {
        warn!("startup parameters were already set; keeping the first ones");
    }
}

// Main model for the application
pub struct Model {
    pub world: World,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: Camera,
    pub mouse_position: Vec2,
    pub explosions: usize,
    // Fixed timestep physics variables
    pub physics_accumulator: Duration,
    pub physics_step_size: Duration,
    pub last_update_time: Instant,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let params = STARTUP_PARAMS.get().cloned().unwrap_or_default();

    let window_id = match app
        .new_window()
        .title("Steering Behaviors")
        .size(params.world_width as u32, params.world_height as u32)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .mouse_wheel(input::mouse_wheel)
        .raw_event(input::raw_window_event)
        .build()
    {
        Ok(id) => id,
        Err(e) => {
            error!(error = ?e, "failed to create window");
            std::process::exit(1);
        }
    };

    let Some(window) = app.window(window_id) else {
        error!("window closed during startup");
        std::process::exit(1);
    };
    let egui = Egui::from_window(&window);

    let world = match World::from_params(&params) {
        Ok(world) => world,
        Err(e) => {
            error!(error = %e, "failed to build world");
            std::process::exit(1);
        }
    };

    let camera = Camera::new(world.bounds().centre());
    let physics_step_size = Duration::from_secs_f32(1.0 / params.fixed_physics_fps);

    Model {
        world,
        params,
        egui,
        debug_info: DebugInfo::default(),
        camera,
        mouse_position: Vec2::ZERO,
        explosions: 0,
        physics_accumulator: Duration::ZERO,
        physics_step_size,
        last_update_time: Instant::now(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let (actions, changes) = ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);

    if changes.any {
        model.physics_step_size = Duration::from_secs_f32(1.0 / model.params.fixed_physics_fps);
        model.world.set_parallel(model.params.enable_parallel);
    }

    if actions.reset_world || changes.rebuild_world {
        rebuild_world(model);
    }
    if actions.reset_camera {
        model.camera.reset(model.world.bounds().centre());
    }
    if actions.clear_particles {
        model.world.retain_particles(|_| false);
    }

    let now = Instant::now();
    let frame_time = now.duration_since(model.last_update_time);
    model.last_update_time = now;

    if model.params.pause_simulation {
        model.physics_accumulator = Duration::ZERO;
    } else {
        model.physics_accumulator += frame_time;

        let mut steps = 0;
        while model.physics_accumulator >= model.physics_step_size {
            model.world.tick();
            model.physics_accumulator -= model.physics_step_size;
            steps += 1;
        }
        model.debug_info.physics_updates_per_frame = steps;

        let bounds = model.world.bounds();
        model
            .world
            .retain_particles(|p| !(p.is_on_floor(bounds) && p.velocity.length() < PARTICLE_REST_SPEED));
    }

    model.debug_info.ticks = model.world.ticks();
    model.debug_info.boids = model.world.boids().len();
    model.debug_info.agents = model.world.agents().len();
    model.debug_info.particles = model.world.particles().len();
}

// Rebuild the world from the current parameters, keeping the old one on failure
fn rebuild_world(model: &mut Model) {
    match World::from_params(&model.params) {
        Ok(world) => {
            info!(boids = world.boids().len(), "world rebuilt");
            model.world = world;
        }
        Err(e) => warn!(error = %e, "keeping previous world"),
    }
}

/// Throw an explosion of particles at a canvas position.
pub fn explode_at(model: &mut Model, at: crate::vector::Vector2D) {
    let color = PARTICLE_COLORS[model.explosions % PARTICLE_COLORS.len()];
    model.explosions += 1;
    model
        .world
        .explode(at, model.params.particles_per_explosion, model.params.particle_radius, color);
}
