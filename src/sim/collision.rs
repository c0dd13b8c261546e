//! Collision detection and resolution
//!
//! All tests are circle vs circle. The ship's triangular outline is
//! approximated by its circular hitbox.

use glam::Vec2;

use super::state::{Asteroid, Body, Bullet, Spaceship};
use super::vector::distance;

/// Circles at `a` and `b` overlap (touching edges don't count)
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    distance(a, b) < radius_a + radius_b
}

/// Two bodies' hitboxes overlap
#[inline]
pub fn circle_circle(a: &Body, b: &Body) -> bool {
    circles_overlap(a.position, a.radius(), b.position, b.radius())
}

/// Outcome of matching bullets against asteroids
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulletHits {
    /// (bullet index, asteroid index) pairs, each index used at most once
    pub pairs: Vec<(usize, usize)>,
}

impl BulletHits {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Match every bullet against every asteroid
///
/// Works on the collections as they stand; nothing is removed here, so no
/// entity is skipped or counted twice. Each bullet destroys at most one
/// asteroid (the first live one it overlaps, in collection order) and each
/// asteroid is destroyed at most once.
pub fn bullet_asteroid_hits(bullets: &[Bullet], asteroids: &[Asteroid]) -> BulletHits {
    let mut asteroid_hit = vec![false; asteroids.len()];
    let mut hits = BulletHits::default();

    for (bullet_idx, bullet) in bullets.iter().enumerate() {
        let target = asteroids
            .iter()
            .enumerate()
            .find(|(idx, asteroid)| !asteroid_hit[*idx] && circle_circle(&bullet.body, &asteroid.body));
        if let Some((asteroid_idx, _)) = target {
            asteroid_hit[asteroid_idx] = true;
            hits.pairs.push((bullet_idx, asteroid_idx));
        }
    }

    hits
}

/// First asteroid touching the ship, if any
pub fn ship_asteroid_hit<'a>(ship: &Spaceship, asteroids: &'a [Asteroid]) -> Option<&'a Asteroid> {
    asteroids
        .iter()
        .find(|asteroid| circle_circle(&ship.body, &asteroid.body))
}
