/*
 * Vector Module
 *
 * Defines Vector2D, the 2D vector algebra every other part of the
 * simulation is built on.
 *
 * Two disciplines coexist:
 * - Mutating operations (add, subtract, multiply, normalize, truncate, ...)
 *   take `&mut self` and return `&mut Self` so they can be chained.
 * - Pure operations (copy_and_add, perpendicular, distance, the std::ops
 *   impls, ...) leave their operands untouched and return a new value.
 *
 * There is no `std::ops::Add`/`Sub` impl: a by-value `Add::add` would
 * shadow the mutating `add` in method-call position.
 *
 * Degenerate inputs never panic. A zero vector normalizes to (1, 0),
 * dividing by zero or setting the length to zero yields the zero vector.
 */

use std::fmt;
use std::ops::{AddAssign, Div, Mul, Neg, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseVectorError;

/// Components with a smaller magnitude are snapped to zero after a length change.
/// Compared in `f64`, where the trig residue of an axis-aligned angle stays below it.
pub const SNAP_EPSILON: f64 = 1e-8;

/// Tolerance used by `is_normalized`.
const UNIT_TOLERANCE: f32 = 1e-6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };
    pub const UNIT_X: Vector2D = Vector2D { x: 1.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians.
    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    // Reset both components to zero
    pub fn zero(&mut self) -> &mut Self {
        self.x = 0.0;
        self.y = 0.0;
        self
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn is_normalized(&self) -> bool {
        (self.length() - 1.0).abs() < UNIT_TOLERANCE
    }

    /// Component-wise comparison within `eps`.
    pub fn approx_eq(&self, other: Vector2D, eps: f32) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Rescale to `value` while keeping the current angle.
    ///
    /// A zero vector has angle 0, so it grows along +x. Setting a length of
    /// zero (or NaN) produces the zero vector. Negative lengths are clamped
    /// to zero as well, so they never flip the direction. The angle and trig
    /// are evaluated in `f64`, and components smaller than [`SNAP_EPSILON`]
    /// are snapped to exactly zero before narrowing back to `f32`.
    pub fn set_length(&mut self, value: f32) -> &mut Self {
        if !(value > 0.0) {
            return self.zero();
        }
        let angle = (self.y as f64).atan2(self.x as f64);
        let length = value as f64;
        let mut x = angle.cos() * length;
        let mut y = angle.sin() * length;
        if x.abs() < SNAP_EPSILON {
            x = 0.0;
        }
        if y.abs() < SNAP_EPSILON {
            y = 0.0;
        }
        self.x = x as f32;
        self.y = y as f32;
        self
    }

    /// Angle in radians, `atan2(y, x)`.
    pub fn angle(&self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Rotate to `value` radians while keeping the current length.
    pub fn set_angle(&mut self, value: f32) -> &mut Self {
        let len = self.length();
        self.x = value.cos() * len;
        self.y = value.sin() * len;
        self
    }

    /// Scale to unit length. The zero vector becomes (1, 0).
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.length();
        if len == 0.0 {
            self.x = 1.0;
            self.y = 0.0;
            return self;
        }
        self.x /= len;
        self.y /= len;
        self
    }

    /// Like `normalize`, but leaves the zero vector untouched.
    pub fn unit(&mut self) -> &mut Self {
        let len = self.length();
        if len != 0.0 {
            self.x /= len;
            self.y /= len;
        }
        self
    }

    /// Set the length to `len`, chainable alias of `set_length`.
    pub fn normalcate(&mut self, len: f32) -> &mut Self {
        self.set_length(len)
    }

    /// Clamp the length to at most `max`. No-op when already within bound.
    pub fn truncate(&mut self, max: f32) -> &mut Self {
        if self.length() <= max {
            return self;
        }
        self.set_length(max)
    }

    pub fn reverse(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self
    }

    pub fn dot_product(&self, other: Vector2D) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z component of the 3D cross product).
    pub fn cross_product(&self, other: Vector2D) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Angle in radians between two vectors, in `[0, π]`.
    pub fn angle_between(a: Vector2D, b: Vector2D) -> f32 {
        let mut a = a;
        let mut b = b;
        if !a.is_normalized() {
            a.normalize();
        }
        if !b.is_normalized() {
            b.normalize();
        }
        a.dot_product(b).clamp(-1.0, 1.0).acos()
    }

    /// -1 when `other` lies to the right of this vector, 1 otherwise.
    pub fn sign(&self, other: Vector2D) -> i32 {
        if self.perpendicular().dot_product(other) < 0.0 {
            -1
        } else {
            1
        }
    }

    /// This vector rotated by 90°: `(-y, x)`.
    pub fn perpendicular(&self) -> Vector2D {
        Vector2D::new(-self.y, self.x)
    }

    pub fn distance(&self, other: Vector2D) -> f32 {
        self.dist_sq(other).sqrt()
    }

    /// Squared distance, for comparisons that don't need the root.
    pub fn dist_sq(&self, other: Vector2D) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    pub fn add(&mut self, other: Vector2D) -> &mut Self {
        self.x += other.x;
        self.y += other.y;
        self
    }

    pub fn subtract(&mut self, other: Vector2D) -> &mut Self {
        self.x -= other.x;
        self.y -= other.y;
        self
    }

    pub fn multiply(&mut self, scalar: f32) -> &mut Self {
        self.x *= scalar;
        self.y *= scalar;
        self
    }

    /// Divide both components by `scalar`. Dividing by zero yields the zero vector.
    pub fn divide(&mut self, scalar: f32) -> &mut Self {
        if scalar == 0.0 {
            return self.zero();
        }
        self.x /= scalar;
        self.y /= scalar;
        self
    }

    pub fn copy_and_add(&self, other: Vector2D) -> Vector2D {
        Vector2D::new(self.x + other.x, self.y + other.y)
    }

    pub fn copy_and_subtract(&self, other: Vector2D) -> Vector2D {
        Vector2D::new(self.x - other.x, self.y - other.y)
    }
}

impl From<(f32, f32)> for Vector2D {
    fn from((x, y): (f32, f32)) -> Self {
        Vector2D::new(x, y)
    }
}

impl Mul<f32> for Vector2D {
    type Output = Vector2D;

    fn mul(self, rhs: f32) -> Vector2D {
        Vector2D::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vector2D {
    type Output = Vector2D;

    fn div(mut self, rhs: f32) -> Vector2D {
        self.divide(rhs);
        self
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;

    fn neg(self) -> Vector2D {
        Vector2D::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Vector2D) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vector2D {
    fn sub_assign(&mut self, rhs: Vector2D) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector2D x:{}, y:{}", self.x, self.y)
    }
}

impl FromStr for Vector2D {
    type Err = ParseVectorError;

    /// Parse the `Display` format, `Vector2D x:<x>, y:<y>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseVectorError { input: s.to_string() };

        let rest = s.trim().strip_prefix("Vector2D").ok_or_else(err)?;
        let (x_part, y_part) = rest.split_once(',').ok_or_else(err)?;
        let x = x_part
            .trim()
            .strip_prefix("x:")
            .and_then(|v| v.trim().parse::<f32>().ok())
            .ok_or_else(err)?;
        let y = y_part
            .trim()
            .strip_prefix("y:")
            .and_then(|v| v.trim().parse::<f32>().ok())
            .ok_or_else(err)?;

        Ok(Vector2D::new(x, y))
    }
}
