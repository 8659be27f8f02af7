/*
 * Camera Module
 *
 * This module defines the Camera struct that handles zooming and panning
 * in the demo. The simulation works in canvas coordinates (origin at the
 * top-left, y pointing down) while nannou draws with the origin at the
 * window centre and y pointing up, so every transformation flips y.
 */

use nannou::prelude::*;

use crate::vector::Vector2D;

pub struct Camera {
    /// World point shown at the centre of the window.
    pub position: Vector2D,
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub is_dragging: bool,
    pub last_cursor_pos: Vec2,
}

impl Camera {
    pub fn new(centre: Vector2D) -> Self {
        Self {
            position: centre,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 5.0,
            is_dragging: false,
            last_cursor_pos: Vec2::ZERO,
        }
    }

    // Convert a point from world space to screen space
    pub fn world_to_screen(&self, point: Vector2D, window_rect: Rect) -> Vec2 {
        let x = (point.x - self.position.x) * self.zoom;
        let y = -(point.y - self.position.y) * self.zoom;
        vec2(x, y) + window_rect.xy()
    }

    // Convert a point from screen space to world space
    pub fn screen_to_world(&self, point: Vec2, window_rect: Rect) -> Vector2D {
        let centred = point - window_rect.xy();
        Vector2D::new(
            centred.x / self.zoom + self.position.x,
            -centred.y / self.zoom + self.position.y,
        )
    }

    /// World-space angle (radians, y down) as a nannou rotation (y up).
    pub fn screen_rotation(angle: f32) -> f32 {
        -angle
    }

    // Handle mouse wheel events for zooming
    pub fn zoom(&mut self, scroll_delta: Vec2, cursor_position: Vec2, window_rect: Rect) {
        let zoom_factor = 1.0 + scroll_delta.y * 0.1;

        let cursor_world_before = self.screen_to_world(cursor_position, window_rect);
        self.zoom = (self.zoom * zoom_factor).clamp(self.min_zoom, self.max_zoom);
        let cursor_world_after = self.screen_to_world(cursor_position, window_rect);

        // Keep the cursor over the same world point
        self.position.add(cursor_world_before.copy_and_subtract(cursor_world_after));
    }

    pub fn start_drag(&mut self, position: Vec2) {
        self.last_cursor_pos = position;
        self.is_dragging = true;
    }

    // Update camera position while dragging
    pub fn drag(&mut self, position: Vec2) {
        if !self.is_dragging {
            return;
        }
        let delta = position - self.last_cursor_pos;
        if delta.length_squared() > 0.0 {
            self.position.x -= delta.x / self.zoom;
            self.position.y += delta.y / self.zoom;
            self.last_cursor_pos = position;
        }
    }

    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }

    pub fn reset(&mut self, centre: Vector2D) {
        self.position = centre;
        self.zoom = 1.0;
    }
}
