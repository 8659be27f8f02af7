/*
 * Input Module
 *
 * This module handles user input events for the steering demo.
 *
 * Features:
 * - Explosions at the cursor with a left click
 * - Camera panning with a right drag
 * - Camera zooming with mouse wheel
 * - Forwarding raw events to egui
 */

use nannou::prelude::*;
use nannou::winit::event::{MouseButton, MouseScrollDelta, TouchPhase};

use crate::app::{self, Model};

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    let new_pos = Vec2::new(pos.x, pos.y);
    if model.camera.is_dragging {
        model.camera.drag(new_pos);
    }
    model.mouse_position = new_pos;
}

// Mouse pressed event handler
pub fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    // Clicks on the UI belong to egui
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }

    match button {
        MouseButton::Left => {
            let at = model.camera.screen_to_world(model.mouse_position, app.window_rect());
            if model.world.bounds().contains(at) {
                app::explode_at(model, at);
            }
        }
        MouseButton::Right => model.camera.start_drag(model.mouse_position),
        _ => {}
    }
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Right {
        model.camera.end_drag();
    }
}

// Mouse wheel event handler for zooming
pub fn mouse_wheel(app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    let window_rect = app.window_rect();
    match delta {
        MouseScrollDelta::LineDelta(x, y) => {
            model.camera.zoom(vec2(x, y), model.mouse_position, window_rect);
        }
        MouseScrollDelta::PixelDelta(pos) => {
            model
                .camera
                .zoom(vec2(pos.x as f32, pos.y as f32) * 0.01, model.mouse_position, window_rect);
        }
    }
}

// Pass raw window events to egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
