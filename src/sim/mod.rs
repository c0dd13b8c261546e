//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per ready frame
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod hud;
pub mod shape;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;
pub mod vector;

pub use collision::{circle_circle, circles_overlap};
pub use hud::HudReadout;
pub use shape::Hitbox;
pub use spawn::{Spawn, SpawnQueue, spawn_asteroids, split};
pub use state::{
    Arena, Asteroid, AsteroidSize, Body, Bullet, GameEvent, GamePhase, GameState, Spaceship,
    Sprite, SpriteHandle, SpriteSet,
};
pub use tick::{InputSnapshot, populate_screensaver, return_to_menu, start_round, tick};
pub use timer::Timer;
pub use vector::{Vector2, Vector2Ext};
