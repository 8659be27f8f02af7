/*
 * Renderer Module
 *
 * Draws the world with nannou: waypoints first, then particles, balloon
 * strings, boids and agents on top. Everything is read from the entities'
 * appearance data, so the simulation itself never touches the draw API.
 */

use nannou::prelude::*;
use tracing::warn;

use crate::app::Model;
use crate::body::BodyAppearance;
use crate::camera::Camera;
use crate::color::Color;
use crate::ui;

fn to_rgba(color: Color) -> nannou::color::Rgba {
    rgba(
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
        color.a as f32 / 255.0,
    )
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let camera = &model.camera;
    let zoom = camera.zoom;
    let world = &model.world;

    // World boundary
    let bounds = world.bounds();
    let top_left = camera.world_to_screen(crate::vector::Vector2D::ZERO, window_rect);
    let bottom_right = camera.world_to_screen(crate::vector::Vector2D::new(bounds.width, bounds.height), window_rect);
    let world_rect = Rect::from_corners(top_left, bottom_right);
    draw.rect()
        .xy(world_rect.xy())
        .wh(world_rect.wh())
        .color(rgba(0.08, 0.08, 0.1, 1.0))
        .stroke_weight(1.0)
        .stroke(rgba(0.3, 0.3, 0.3, 1.0));

    for waypoint in world.waypoints() {
        draw.ellipse()
            .xy(camera.world_to_screen(waypoint.position, window_rect))
            .radius(waypoint.radius * zoom)
            .no_fill()
            .stroke(to_rgba(waypoint.color))
            .stroke_weight(2.0);
    }

    for particle in world.particles() {
        draw.ellipse()
            .xy(camera.world_to_screen(particle.position, window_rect))
            .radius(particle.radius * zoom)
            .color(to_rgba(particle.color));
    }

    for boid in world.boids() {
        if let Some(string) = boid.string() {
            for (from, to) in string.segments(boid.position()) {
                draw.line()
                    .start(camera.world_to_screen(from, window_rect))
                    .end(camera.world_to_screen(to, window_rect))
                    .weight(1.0)
                    .color(rgba(0.8, 0.8, 0.8, 1.0));
            }
        }
        draw_body(&draw, camera, window_rect, &boid.appearance());
    }

    for agent in world.agents() {
        let look = agent.appearance();
        let centre = camera.world_to_screen(look.position, window_rect);
        let rotation = Camera::screen_rotation(look.rotation);

        // The gun sticks out of the base along the heading
        let offset = vec2(rotation.cos(), rotation.sin()) * (agent.gun_height * 0.5 * zoom);
        draw.rect()
            .xy(centre + offset)
            .w_h(agent.gun_height * zoom, agent.gun_width * zoom)
            .rotate(rotation)
            .color(to_rgba(look.stroke_color));
        draw_body(&draw, camera, window_rect, &look);
    }

    if model.params.show_debug {
        draw_debug_overlay(&draw, model, window_rect);
        ui::draw_debug_info(&draw, &model.debug_info, window_rect, zoom);
    }

    if let Err(e) = draw.to_frame(app, &frame) {
        warn!(error = ?e, "failed to draw frame");
    }
    if let Err(e) = model.egui.draw_to_frame(&frame) {
        warn!(error = ?e, "failed to draw ui");
    }
}

// A filled, outlined ellipse with a heading line from the centre to the rim
fn draw_body(draw: &Draw, camera: &Camera, window_rect: Rect, look: &BodyAppearance) {
    let centre = camera.world_to_screen(look.position, window_rect);
    let rotation = Camera::screen_rotation(look.rotation);
    let w = look.radius * 2.0 * look.x_scale * camera.zoom;
    let h = look.radius * 2.0 * look.y_scale * camera.zoom;

    draw.ellipse()
        .xy(centre)
        .w_h(w, h)
        .rotate(rotation)
        .color(to_rgba(look.color))
        .stroke(to_rgba(look.stroke_color))
        .stroke_weight(look.line_width);

    let tip = centre + vec2(rotation.cos(), rotation.sin()) * (w * 0.5);
    draw.line()
        .start(centre)
        .end(tip)
        .weight(look.line_width)
        .color(to_rgba(look.stroke_color));
}

// Velocity arrows for every body
fn draw_debug_overlay(draw: &Draw, model: &Model, window_rect: Rect) {
    let camera = &model.camera;
    for boid in model.world.boids() {
        let start = camera.world_to_screen(boid.position(), window_rect);
        let mut ahead = boid.velocity();
        ahead.multiply(10.0).add(boid.position());
        draw.arrow()
            .start(start)
            .end(camera.world_to_screen(ahead, window_rect))
            .color(YELLOW)
            .stroke_weight(2.0);
    }
    for agent in model.world.agents() {
        let start = camera.world_to_screen(agent.position, window_rect);
        let mut ahead = agent.velocity;
        ahead.multiply(10.0).add(agent.position);
        draw.arrow()
            .start(start)
            .end(camera.world_to_screen(ahead, window_rect))
            .color(ORANGE)
            .stroke_weight(2.0);
    }
}
