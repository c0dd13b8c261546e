//! Rock Drift - a wrap-around arena asteroid shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, spawning, game state)
//! - `platform`: Collaborator seams (input, rendering, menus, assets)
//! - `game`: Owned simulation context driven once per display frame
//! - `settings`: Data-driven tuning

pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game::{Game, GameError};
pub use settings::{ConfigError, Settings};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE_HZ: f64 = 120.0;

    /// Spaceship defaults
    pub const SHIP_ACCELERATION: f32 = 0.25;
    /// Degrees of heading change per tick
    pub const SHIP_MANEUVERABILITY: f32 = 3.0;
    pub const SHIP_MAX_SPEED: f32 = 15.0;
    pub const SHIP_BULLET_SPEED: f32 = 8.0;
    pub const SHIP_RELOAD_COOLDOWN_MS: f64 = 200.0;

    /// Bullet hitbox radius
    pub const BULLET_RADIUS: f32 = 2.5;

    /// Asteroid round setup
    pub const ROUND_ASTEROIDS: usize = 6;
    pub const SCREENSAVER_ASTEROIDS: usize = 6;
    pub const SPAWN_EXCLUSION_RADIUS: f32 = 100.0;
    pub const ASTEROID_MIN_SPEED: f32 = 1.0;
    pub const ASTEROID_MAX_SPEED: f32 = 5.0;
    /// Largest deviation (degrees) of a fragment from its impactor's heading
    pub const FRAGMENT_SPREAD_DEG: f32 = 30.0;
    /// Rejection sampling gives up after this many candidates per asteroid
    pub const MAX_SPAWN_ATTEMPTS: u32 = 10_000;
}

/// Degrees to radians
#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * (std::f32::consts::PI / 180.0)
}

/// Radians to degrees
#[inline]
pub fn rad_to_deg(rad: f32) -> f32 {
    rad * (180.0 / std::f32::consts::PI)
}

/// Round to a fixed number of decimal places (HUD display)
#[inline]
pub fn round_to(value: f32, decimals: i32) -> f32 {
    let power = 10f32.powi(decimals);
    (value * power).round() / power
}
