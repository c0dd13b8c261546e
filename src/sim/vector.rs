//! 2D vector helpers on top of `glam::Vec2`
//!
//! Vectors are plain `Copy` values. Nothing here mutates in place: a "rotate in
//! place" is `self.direction = self.direction.rotated(angle)`.
//!
//! Angles are in degrees and follow the standard rotation matrix. With screen
//! coordinates (y down) a positive angle turns clockwise on screen.

use glam::Vec2;

use crate::deg_to_rad;

/// Vector type used throughout the simulation
pub type Vector2 = Vec2;

/// Operations glam doesn't provide under these names
pub trait Vector2Ext: Sized {
    /// Rotate by `angle_deg` degrees, returning a new vector
    fn rotated(self, angle_deg: f32) -> Self;

    /// Same direction, new length. The zero vector stays zero.
    fn with_magnitude(self, magnitude: f32) -> Self;

    /// Unit vector in the same direction (zero for the zero vector)
    fn unitized(self) -> Self;

    /// Angle from the positive x axis, radians
    fn theta(self) -> f32;
}

impl Vector2Ext for Vec2 {
    #[inline]
    fn rotated(self, angle_deg: f32) -> Self {
        Vec2::from_angle(deg_to_rad(angle_deg)).rotate(self)
    }

    /// Divides by the length, so axis-aligned vectors rescale exactly
    #[inline]
    fn with_magnitude(self, magnitude: f32) -> Self {
        let length = self.length();
        if length > 0.0 { self / length * magnitude } else { Vec2::ZERO }
    }

    #[inline]
    fn unitized(self) -> Self {
        self.normalize_or_zero()
    }

    #[inline]
    fn theta(self) -> f32 {
        self.to_angle()
    }
}

/// Unit vector pointing along `(x, y)`
///
/// `(0, 0)` has no direction; it maps to the zero vector instead of NaN.
#[inline]
pub fn unit(x: f32, y: f32) -> Vector2 {
    Vec2::new(x, y).normalize_or_zero()
}

/// Sum of any number of vectors
pub fn add<I>(vectors: I) -> Vector2
where
    I: IntoIterator<Item = Vector2>,
{
    vectors.into_iter().sum()
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vector2, b: Vector2) -> f32 {
    a.distance(b)
}

#[inline]
pub fn dot(a: Vector2, b: Vector2) -> f32 {
    a.dot(b)
}

/// Vector from `(x1, y1)` to `(x2, y2)`, optionally normalized
pub fn from_points(x1: f32, y1: f32, x2: f32, y2: f32, as_unit: bool) -> Vector2 {
    let v = Vec2::new(x2, y2) - Vec2::new(x1, y1);
    if as_unit { v.normalize_or_zero() } else { v }
}
