//! Game settings and tuning
//!
//! Every field has a default, so a partial JSON document only overrides what
//! it names.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Problems with a settings document
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Spaceship handling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipSettings {
    /// Speed gained per accelerate tick
    pub acceleration: f32,
    /// Heading change per rotate tick (degrees)
    pub maneuverability: f32,
    pub max_speed: f32,
    /// Bullet speed relative to the ship
    pub bullet_speed: f32,
    /// Minimum time between shots (ms)
    pub reload_cooldown_ms: f64,
}

impl Default for ShipSettings {
    fn default() -> Self {
        Self {
            acceleration: SHIP_ACCELERATION,
            maneuverability: SHIP_MANEUVERABILITY,
            max_speed: SHIP_MAX_SPEED,
            bullet_speed: SHIP_BULLET_SPEED,
            reload_cooldown_ms: SHIP_RELOAD_COOLDOWN_MS,
        }
    }
}

/// Asteroid field setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidSettings {
    /// Asteroids placed when a round starts
    pub round_count: usize,
    /// Asteroids drifting behind the title screen
    pub screensaver_count: usize,
    /// No round asteroid spawns closer than this to the ship
    pub spawn_exclusion_radius: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Max deviation (degrees) of fragments from the impactor heading
    pub fragment_spread_deg: f32,
    pub max_spawn_attempts: u32,
}

impl Default for AsteroidSettings {
    fn default() -> Self {
        Self {
            round_count: ROUND_ASTEROIDS,
            screensaver_count: SCREENSAVER_ASTEROIDS,
            spawn_exclusion_radius: SPAWN_EXCLUSION_RADIUS,
            min_speed: ASTEROID_MIN_SPEED,
            max_speed: ASTEROID_MAX_SPEED,
            fragment_spread_deg: FRAGMENT_SPREAD_DEG,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
        }
    }
}

/// Top-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation ticks per second
    pub tick_rate_hz: f64,
    /// RNG seed for spawn placement and fragment headings
    pub seed: u64,
    /// Draw the ship/asteroid readout while playing
    pub show_hud: bool,
    pub ship: ShipSettings,
    pub asteroids: AsteroidSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_hz: TICK_RATE_HZ,
            seed: 0,
            show_hud: true,
            ship: ShipSettings::default(),
            asteroids: AsteroidSettings::default(),
        }
    }
}

impl Settings {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Same settings with a different seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !(self.tick_rate_hz > 0.0) {
            return Err(invalid("tick_rate_hz", "must be positive"));
        }
        if !(self.ship.max_speed > 0.0) {
            return Err(invalid("ship.max_speed", "must be positive"));
        }
        if self.ship.acceleration < 0.0 {
            return Err(invalid("ship.acceleration", "must not be negative"));
        }
        if self.ship.reload_cooldown_ms < 0.0 {
            return Err(invalid("ship.reload_cooldown_ms", "must not be negative"));
        }
        let asteroids = &self.asteroids;
        if asteroids.round_count == 0 {
            return Err(invalid("asteroids.round_count", "a round needs at least one asteroid"));
        }
        if asteroids.min_speed < 0.0 || asteroids.min_speed > asteroids.max_speed {
            return Err(invalid(
                "asteroids.min_speed",
                format!(
                    "speed range [{}, {}] is empty or negative",
                    asteroids.min_speed, asteroids.max_speed
                ),
            ));
        }
        if asteroids.spawn_exclusion_radius < 0.0 {
            return Err(invalid("asteroids.spawn_exclusion_radius", "must not be negative"));
        }
        if asteroids.max_spawn_attempts == 0 {
            return Err(invalid("asteroids.max_spawn_attempts", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.ship.max_speed, 15.0);
        assert_eq!(settings.asteroids.round_count, 6);
    }

    #[test]
    fn test_partial_json_overrides() {
        let settings = Settings::from_json(r#"{ "seed": 7, "ship": { "max_speed": 10.0 } }"#)
            .expect("valid settings");
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.ship.max_speed, 10.0);
        assert_eq!(settings.ship.acceleration, SHIP_ACCELERATION);
        assert_eq!(settings.tick_rate_hz, TICK_RATE_HZ);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(Settings::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let err = Settings::from_json(r#"{ "asteroids": { "min_speed": 6.0, "max_speed": 2.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "asteroids.min_speed", .. }));
    }

    #[test]
    fn test_rejects_zero_tick_rate() {
        let err = Settings::from_json(r#"{ "tick_rate_hz": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("tick_rate_hz"));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
