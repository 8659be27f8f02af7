/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides controls for adjusting simulation parameters.
 * Parameter change detection is handled by the SimulationParams struct.
 */

use nannou_egui::{egui, Egui};

use crate::body::ForcePolicy;
use crate::debug::DebugInfo;
use crate::params::{ParamChanges, SimulationParams};

/// Buttons pressed this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiActions {
    pub reset_world: bool,
    pub reset_camera: bool,
    pub clear_particles: bool,
}

// Update the UI and report what the user asked for and which parameters changed
pub fn update_ui(egui: &mut Egui, params: &mut SimulationParams, debug_info: &DebugInfo) -> (UiActions, ParamChanges) {
    let mut actions = UiActions::default();

    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Population", |ui| {
                let range = SimulationParams::get_population_range;
                ui.add(egui::Slider::new(&mut params.num_wanderers, range()).text("Wanderers"));
                ui.add(egui::Slider::new(&mut params.num_seekers, range()).text("Seekers"));
                ui.add(egui::Slider::new(&mut params.num_followers, range()).text("Followers"));
                ui.add(egui::Slider::new(&mut params.num_agents, range()).text("Agents"));

                if ui.button("Reset World").clicked() {
                    actions.reset_world = true;
                }
            });

            ui.collapsing("Bodies", |ui| {
                ui.add(egui::Slider::new(&mut params.max_speed, SimulationParams::get_max_speed_range()).text("Max Speed"));
                ui.add(
                    egui::Slider::new(&mut params.max_acceleration, SimulationParams::get_acceleration_range())
                        .text("Max Acceleration"),
                );
                ui.add(egui::Slider::new(&mut params.boid_radius, SimulationParams::get_radius_range()).text("Radius"));
                ui.add(egui::Slider::new(&mut params.gravity, SimulationParams::get_gravity_range()).text("Gravity"));
                ui.add(egui::Slider::new(&mut params.bounce, SimulationParams::get_bounce_range()).text("Bounce"));
                ui.checkbox(&mut params.balloon_strings, "Balloon Strings");

                ui.horizontal(|ui| {
                    ui.label("Force");
                    ui.radio_value(&mut params.force_policy, ForcePolicy::Unscaled, "Unscaled");
                    ui.radio_value(&mut params.force_policy, ForcePolicy::MassScaled, "Mass scaled");
                });
            });

            ui.collapsing("Explosions", |ui| {
                ui.label("Left click to explode");
                ui.add(
                    egui::Slider::new(&mut params.particles_per_explosion, SimulationParams::get_particle_count_range())
                        .text("Particles"),
                );
                if ui.button("Clear Particles").clicked() {
                    actions.clear_particles = true;
                }
            });

            ui.collapsing("Camera Controls", |ui| {
                ui.label("Zoom: Use mouse wheel or trackpad pinch gesture");
                ui.label("Pan: Right click and drag");
                if ui.button("Reset Camera").clicked() {
                    actions.reset_camera = true;
                }
            });

            ui.collapsing("Performance", |ui| {
                ui.checkbox(&mut params.enable_parallel, "Parallel Particles");
                ui.add(
                    egui::Slider::new(&mut params.fixed_physics_fps, SimulationParams::get_physics_fps_range())
                        .text("Physics FPS"),
                );

                ui.separator();

                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Ticks: {}", debug_info.ticks));
                ui.label(format!("Particles: {}", debug_info.particles));
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    (actions, params.detect_changes())
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect, camera_zoom: f32) {
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 200.0;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Physics steps: {}", debug_info.physics_updates_per_frame),
        format!("Boids: {}", debug_info.boids),
        format!("Agents: {}", debug_info.agents),
        format!("Particles: {}", debug_info.particles),
        format!("Zoom: {:.2}x", camera_zoom),
    ];

    let panel_height = line_height * debug_texts.len() as f32 + margin;
    let panel_x = window_rect.right() - panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width + margin;
    let text_y = window_rect.top() - margin;

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);
        draw.text(text)
            .x_y(text_x + 70.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
