//! Ship readout shown while a round is running

use glam::Vec2;

use super::state::{GamePhase, GameState};
use crate::round_to;

#[derive(Debug, Clone, PartialEq)]
pub struct HudReadout {
    pub position: Vec2,
    pub velocity: Vec2,
    pub direction: Vec2,
    pub asteroids_remaining: usize,
}

impl HudReadout {
    /// Readout for the current round, if there is one on screen
    pub fn from_state(state: &GameState) -> Option<Self> {
        if state.phase == GamePhase::Screensaver {
            return None;
        }
        let ship = state.ship.as_ref()?;
        Some(Self {
            position: ship.body.position,
            velocity: ship.body.velocity,
            direction: ship.direction,
            asteroids_remaining: state.asteroids.len(),
        })
    }

    /// Display lines, values rounded to 2 decimals
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("position: {}", pair(self.position)),
            format!("velocity: {}", pair(self.velocity)),
            format!("direction: {}", pair(self.direction)),
            format!("asteroids remaining: {}", self.asteroids_remaining),
        ]
    }
}

fn pair(v: Vec2) -> String {
    format!("{}, {}", round_to(v.x, 2), round_to(v.y, 2))
}
