//! Hitbox geometry
//!
//! Shapes here are used only for collision math and a few derived metrics,
//! never for drawing.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Collision shape attached to an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Hitbox {
    Circle { radius: f32 },
    /// Isosceles triangle: two equal `leg`s and a `base`
    IsoTriangle { leg: f32, base: f32 },
}

impl Hitbox {
    pub fn circle(radius: f32) -> Self {
        Hitbox::Circle { radius }
    }

    /// Triangle enclosed by a `width` x `height` box, apex at the top
    pub fn triangle_in_box(width: f32, height: f32) -> Self {
        let leg = (height * height + (width / 2.0).powi(2)).sqrt();
        Hitbox::IsoTriangle { leg, base: width }
    }

    /// Radius of a circle hitbox
    pub fn radius(&self) -> Option<f32> {
        match *self {
            Hitbox::Circle { radius } => Some(radius),
            Hitbox::IsoTriangle { .. } => None,
        }
    }

    /// Apex-to-base height (diameter for circles)
    pub fn height(&self) -> f32 {
        match *self {
            Hitbox::Circle { radius } => 2.0 * radius,
            Hitbox::IsoTriangle { leg, base } => (leg * leg - (base / 2.0).powi(2)).max(0.0).sqrt(),
        }
    }

    /// Circumference or perimeter
    pub fn perimeter(&self) -> f32 {
        match *self {
            Hitbox::Circle { radius } => 2.0 * PI * radius,
            Hitbox::IsoTriangle { leg, base } => 2.0 * leg + base,
        }
    }

    pub fn area(&self) -> f32 {
        match *self {
            Hitbox::Circle { radius } => PI * radius * radius,
            Hitbox::IsoTriangle { base, .. } => 0.5 * base * self.height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_metrics() {
        let c = Hitbox::circle(2.0);
        assert_eq!(c.radius(), Some(2.0));
        assert_eq!(c.height(), 4.0);
        assert!((c.perimeter() - 4.0 * PI).abs() < 1e-5);
        assert!((c.area() - 4.0 * PI).abs() < 1e-5);
    }

    #[test]
    fn test_triangle_metrics() {
        // 3-4-5 halves: legs of 5 over a base of 6 stand 4 tall
        let t = Hitbox::IsoTriangle { leg: 5.0, base: 6.0 };
        assert_eq!(t.radius(), None);
        assert!((t.height() - 4.0).abs() < 1e-5);
        assert_eq!(t.perimeter(), 16.0);
        assert!((t.area() - 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_triangle_in_box_recovers_height() {
        let t = Hitbox::triangle_in_box(30.0, 30.0);
        assert!((t.height() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_triangle_has_zero_height() {
        let t = Hitbox::IsoTriangle { leg: 1.0, base: 4.0 };
        assert_eq!(t.height(), 0.0);
    }
}
