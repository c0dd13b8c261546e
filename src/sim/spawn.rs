//! Asteroid placement and fragmentation
//!
//! Nothing here touches the entity collections directly. New entities are
//! described as `Spawn`s in a `SpawnQueue`, which the state machine drains
//! once per tick.

use glam::Vec2;
use rand::Rng;

use super::state::{Arena, Asteroid, AsteroidSize};
use super::vector::{Vector2Ext, distance};
use crate::rad_to_deg;
use crate::settings::AsteroidSettings;

/// Descriptor for an entity to be created at the end of the tick
#[derive(Debug, Clone, PartialEq)]
pub enum Spawn {
    Bullet {
        position: Vec2,
        velocity: Vec2,
    },
    Asteroid {
        position: Vec2,
        velocity: Vec2,
        size: AsteroidSize,
    },
}

/// Per-tick output queue of new entities
#[derive(Debug, Default)]
pub struct SpawnQueue {
    pending: Vec<Spawn>,
}

impl SpawnQueue {
    pub fn push(&mut self, spawn: Spawn) {
        self.pending.push(spawn);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Spawn> + '_ {
        self.pending.drain(..)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Uniform point inside the arena (which must be valid)
pub fn random_position<R: Rng>(rng: &mut R, arena: &Arena) -> Vec2 {
    Vec2::new(
        rng.random_range(0.0..arena.width),
        rng.random_range(0.0..arena.height),
    )
}

/// Random speed in `[min_speed, max_speed]` along a uniform heading
pub fn random_velocity<R: Rng>(rng: &mut R, min_speed: f32, max_speed: f32) -> Vec2 {
    let angle = rng.random_range(0.0..360.0);
    Vec2::X.rotated(angle) * random_speed(rng, min_speed, max_speed)
}

/// Random speed, heading within `spread_deg` of `heading`
///
/// A zero `heading` has no direction, so the result falls back to a uniform one.
pub fn random_directional_velocity<R: Rng>(
    rng: &mut R,
    min_speed: f32,
    max_speed: f32,
    heading: Vec2,
    spread_deg: f32,
) -> Vec2 {
    if heading == Vec2::ZERO {
        return random_velocity(rng, min_speed, max_speed);
    }
    let offset = if spread_deg > 0.0 {
        rng.random_range(-spread_deg..=spread_deg)
    } else {
        0.0
    };
    Vec2::X.rotated(rad_to_deg(heading.theta()) + offset) * random_speed(rng, min_speed, max_speed)
}

fn random_speed<R: Rng>(rng: &mut R, min_speed: f32, max_speed: f32) -> f32 {
    if max_speed > min_speed {
        rng.random_range(min_speed..=max_speed)
    } else {
        min_speed
    }
}

/// Queue `count` large asteroids, each at least `min_distance` from `avoid`
///
/// Positions are rejection-sampled. If `max_spawn_attempts` candidates all land
/// inside the exclusion zone, the farthest one seen is used instead.
pub fn spawn_asteroids<R: Rng>(
    rng: &mut R,
    arena: &Arena,
    avoid: Vec2,
    count: usize,
    min_distance: f32,
    tuning: &AsteroidSettings,
    queue: &mut SpawnQueue,
) {
    if !arena.is_valid() {
        log::warn!("Cannot place asteroids in degenerate arena {:?}", arena);
        return;
    }
    for _ in 0..count {
        let mut best: Option<(f32, Vec2, Vec2)> = None;
        for _ in 0..tuning.max_spawn_attempts.max(1) {
            let position = random_position(rng, arena);
            let velocity = random_velocity(rng, tuning.min_speed, tuning.max_speed);
            let clearance = distance(position, avoid);
            if best.is_none_or(|(d, _, _)| clearance > d) {
                best = Some((clearance, position, velocity));
            }
            if clearance >= min_distance {
                break;
            }
        }

        if let Some((clearance, position, velocity)) = best {
            if clearance < min_distance {
                log::warn!(
                    "No spawn point {:.1} from ship after {} attempts, using one at {:.1}",
                    min_distance,
                    tuning.max_spawn_attempts,
                    clearance
                );
            }
            queue.push(Spawn::Asteroid {
                position,
                velocity,
                size: AsteroidSize::Large,
            });
        }
    }
}

/// Break `asteroid` apart after being hit by something moving at `impactor_velocity`
///
/// Sizes above the smallest produce two fragments one tier down at the
/// asteroid's position, heading roughly the way the impactor was. The smallest
/// size produces nothing. Returns the number of fragments queued.
pub fn split<R: Rng>(
    rng: &mut R,
    asteroid: &Asteroid,
    impactor_velocity: Vec2,
    tuning: &AsteroidSettings,
    queue: &mut SpawnQueue,
) -> usize {
    let Some(size) = asteroid.size.smaller() else {
        return 0;
    };
    for _ in 0..2 {
        let velocity = random_directional_velocity(
            rng,
            tuning.min_speed,
            tuning.max_speed,
            impactor_velocity,
            tuning.fragment_spread_deg,
        );
        queue.push(Spawn::Asteroid {
            position: asteroid.body.position,
            velocity,
            size,
        });
    }
    log::debug!(
        "Asteroid {} ({:?}) split into two {:?}",
        asteroid.id,
        asteroid.size,
        size
    );
    2
}
