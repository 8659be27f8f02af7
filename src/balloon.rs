/*
 * Balloon Module
 *
 * A balloon string is a chain of light points hanging below a boid. Each
 * point is pulled towards the one above it by a spring, sags under gravity
 * and loses a little speed every tick to friction, so the string trails
 * behind the balloon as it moves.
 */

use serde::{Deserialize, Serialize};

use crate::vector::Vector2D;

/// Vertical gap between consecutive points when a string is first hung.
pub const STRING_SEGMENT_LENGTH: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StringPoint {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub radius: f32,
    pub spring: f32,
    pub friction: f32,
    pub gravity: f32,
}

impl StringPoint {
    pub fn at(position: Vector2D) -> Self {
        Self {
            position,
            velocity: Vector2D::ZERO,
            radius: 4.0,
            spring: 0.03,
            friction: 0.9,
            gravity: 1.0,
        }
    }

    // Spring towards target, sag, damp, move
    fn follow(&mut self, target: Vector2D) {
        let mut to_target = target.copy_and_subtract(self.position);
        self.velocity.add(*to_target.multiply(self.spring));
        self.velocity.y += self.gravity;
        self.velocity.multiply(self.friction);
        self.position.add(self.velocity);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalloonString {
    points: Vec<StringPoint>,
}

impl BalloonString {
    /// Hang `count` points straight down from the bottom of a balloon of
    /// `radius` centred at `anchor`.
    pub fn hang(anchor: Vector2D, radius: f32, count: usize) -> Self {
        let points = (1..=count)
            .map(|i| {
                let y = anchor.y + radius + STRING_SEGMENT_LENGTH * i as f32;
                StringPoint::at(Vector2D::new(anchor.x, y))
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[StringPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Advance one tick. The first point follows `anchor`, every other point
    /// follows the already-updated point above it.
    pub fn update(&mut self, anchor: Vector2D) {
        let mut target = anchor;
        for point in &mut self.points {
            point.follow(target);
            target = point.position;
        }
    }

    /// Line segments from the anchor down the string, for drawing.
    pub fn segments(&self, anchor: Vector2D) -> impl Iterator<Item = (Vector2D, Vector2D)> + '_ {
        let starts = std::iter::once(anchor).chain(self.points.iter().map(|p| p.position));
        starts.zip(self.points.iter().map(|p| p.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hangs_evenly_below_balloon() {
        let string = BalloonString::hang(Vector2D::new(50.0, 100.0), 20.0, 3);
        let ys: Vec<f32> = string.points().iter().map(|p| p.position.y).collect();
        assert_eq!(ys, vec![140.0, 160.0, 180.0]);
        assert!(string.points().iter().all(|p| p.position.x == 50.0));
    }

    #[test]
    fn first_point_springs_towards_anchor() {
        let mut string = BalloonString::hang(Vector2D::new(0.0, 0.0), 0.0, 1);
        // Anchor moved 100 to the right of the point at (0, 20).
        string.update(Vector2D::new(100.0, 20.0));
        let p = string.points()[0];
        // vx = 100 * 0.03 * 0.9, vy = (0 + 1) * 0.9
        assert!((p.velocity.x - 2.7).abs() < 1e-5);
        assert!((p.velocity.y - 0.9).abs() < 1e-5);
        assert!((p.position.x - 2.7).abs() < 1e-5);
        assert!((p.position.y - 20.9).abs() < 1e-4);
    }

    #[test]
    fn segments_chain_from_anchor() {
        let anchor = Vector2D::new(0.0, 0.0);
        let string = BalloonString::hang(anchor, 10.0, 2);
        let segs: Vec<_> = string.segments(anchor).collect();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].0, anchor);
        assert_eq!(segs[1].0, string.points()[0].position);
        assert_eq!(segs[1].1, string.points()[1].position);
    }
}
