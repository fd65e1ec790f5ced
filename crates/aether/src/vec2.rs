//! Two-dimensional vectors and rectangles.
//!
//! Positions and velocities share the same [`Vec2`] type: a position is a
//! displacement from the origin of the host's coordinate space.
//!
//! # Example
//!
//! ```rust
//! use aether::Vec2;
//!
//! let p = Vec2::new(1.0, 2.0);
//! let v = Vec2::new(4.0, 0.0);
//! let moved = p + v * 0.5;
//! assert_eq!(moved, Vec2::new(3.0, 2.0));
//! ```

use core::iter::Sum;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A vector in 2D space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a vector with both components set to `v`.
    #[inline]
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Returns the Euclidean length of the vector.
    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Returns a unit vector pointing the same way.
    ///
    /// The zero vector has no direction and is returned unchanged.
    #[inline]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return self;
        }
        self / len
    }

    /// Returns `true` if both components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    #[inline]
    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, other: Vec2) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    #[inline]
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, other: Vec2) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    #[inline]
    fn mul(self, scalar: f64) -> Vec2 {
        Vec2::new(self.x * scalar, self.y * scalar)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;

    #[inline]
    fn mul(self, v: Vec2) -> Vec2 {
        v * self
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;

    #[inline]
    fn div(self, scalar: f64) -> Vec2 {
        Vec2::new(self.x / scalar, self.y / scalar)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Sum for Vec2 {
    fn sum<I: Iterator<Item = Vec2>>(iter: I) -> Vec2 {
        iter.fold(Vec2::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Vec2> for Vec2 {
    fn sum<I: Iterator<Item = &'a Vec2>>(iter: I) -> Vec2 {
        iter.copied().sum()
    }
}

impl From<(f64, f64)> for Vec2 {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// An axis-aligned rectangle, used for draw instructions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Vec2,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Vec2::new(x, y),
            width,
            height,
        }
    }

    /// Creates a square with its corner at `origin`.
    #[inline]
    pub const fn square(origin: Vec2, side: f64) -> Self {
        Self {
            origin,
            width: side,
            height: side,
        }
    }
}

/// Standard gravity for coordinate systems where Y increases upward.
///
/// ```text
///   y
///   │
///   │
///   └───── x
/// ```
pub const GRAVITY: Vec2 = Vec2 { x: 0.0, y: -9.81 };

/// Gravity for screen coordinate systems where the origin is the top-left
/// corner and Y increases downward.
pub const SCREEN_GRAVITY: Vec2 = Vec2 { x: 0.0, y: 9.81 };

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-10;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn test_add_sub() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);
        assert_eq!(a + b, Vec2::new(5.0, 8.0));
        assert_eq!(b - a, Vec2::new(3.0, 4.0));

        let mut c = a;
        c += b;
        c -= Vec2::new(1.0, 1.0);
        assert_eq!(c, Vec2::new(4.0, 7.0));
    }

    #[test]
    fn test_scalar_mul_both_sides() {
        let v = Vec2::new(1.0, -2.0);
        assert_eq!(v * 2.0, Vec2::new(2.0, -4.0));
        assert_eq!(2.0 * v, v * 2.0);
        assert_eq!(v / 2.0, Vec2::new(0.5, -1.0));
        assert_eq!(-v, Vec2::new(-1.0, 2.0));
    }

    #[test]
    fn test_length_and_dot() {
        let v = Vec2::new(3.0, 4.0);
        assert!(approx_eq(v.length(), 5.0));
        assert!(approx_eq(v.length_squared(), 25.0));
        assert!(approx_eq(v.dot(Vec2::new(1.0, 0.0)), 3.0));
    }

    #[test]
    fn test_normalized() {
        let n = Vec2::new(3.0, 4.0).normalized();
        assert!(approx_eq(n.length(), 1.0));
        assert!(approx_eq(n.x, 0.6));
        assert!(approx_eq(n.y, 0.8));
    }

    #[test]
    fn test_normalized_zero_stays_zero() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
    }

    #[test]
    fn test_sum() {
        let forces = [Vec2::new(1.0, 0.0), Vec2::new(0.0, 2.0), Vec2::new(-3.0, 1.0)];
        let net: Vec2 = forces.iter().sum();
        assert_eq!(net, Vec2::new(-2.0, 3.0));

        let empty: Vec2 = core::iter::empty::<Vec2>().sum();
        assert_eq!(empty, Vec2::ZERO);
    }

    #[test]
    fn test_from_tuple() {
        let v: Vec2 = (1.5, -2.0).into();
        assert_eq!(v, Vec2::new(1.5, -2.0));
    }

    #[test]
    fn test_length_of_huge_vector_is_finite() {
        let v = Vec2::new(1e200, 1e200);
        assert!(v.length().is_finite());
        assert!(approx_eq(v.normalized().length(), 1.0));
    }

    #[test]
    fn test_gravity_constants() {
        assert!(approx_eq(GRAVITY.y, -9.81));
        assert!(approx_eq(SCREEN_GRAVITY.y, 9.81));
    }

    #[test]
    fn test_rect_square() {
        let r = Rect::square(Vec2::new(1.0, 2.0), 20.0);
        assert_eq!(r, Rect::new(1.0, 2.0, 20.0, 20.0));
    }
}
