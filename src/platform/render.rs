//! Drawing seam
//!
//! Each ready frame the core clears the arena and hands the renderer one
//! `DrawCommand` per live entity. Sprite contents stay opaque.

use glam::Vec2;

use crate::sim::{Arena, GamePhase, GameState, SpriteHandle, Vector2Ext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawKind {
    Ship,
    Bullet,
    Asteroid,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub kind: DrawKind,
    pub sprite: SpriteHandle,
    /// Sprite center
    pub position: Vec2,
    /// Radians to rotate the sprite by (ship art points up)
    pub rotation: f32,
    /// Multiplier on the sprite's natural size
    pub scale: f32,
}

pub trait Renderer {
    fn clear(&mut self, arena: &Arena);

    fn draw(&mut self, command: &DrawCommand);

    /// HUD text at a screen position; ignored unless overridden
    fn draw_text(&mut self, _x: f32, _y: f32, _text: &str) {}
}

/// Everything visible this frame: bullets, then asteroids, then the ship
pub fn draw_commands(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(state.bullets.len() + state.asteroids.len() + 1);

    commands.extend(state.bullets.iter().map(|bullet| DrawCommand {
        kind: DrawKind::Bullet,
        sprite: bullet.sprite,
        position: bullet.body.position,
        rotation: 0.0,
        scale: 1.0,
    }));
    commands.extend(state.asteroids.iter().map(|asteroid| DrawCommand {
        kind: DrawKind::Asteroid,
        sprite: asteroid.sprite,
        position: asteroid.body.position,
        rotation: 0.0,
        scale: asteroid.size.scale(),
    }));

    if state.phase != GamePhase::Screensaver {
        if let Some(ship) = &state.ship {
            commands.push(DrawCommand {
                kind: DrawKind::Ship,
                sprite: ship.sprite,
                position: ship.body.position,
                rotation: ship.direction.theta() + std::f32::consts::FRAC_PI_2,
                scale: 1.0,
            });
        }
    }

    commands
}
