//! Per-tick simulation step and phase transitions
//!
//! `tick` is the only thing that moves entities. Round start and "back to
//! menu" are explicit actions rather than inputs, so they live in their own
//! functions.

use serde::{Deserialize, Serialize};

use super::collision::{bullet_asteroid_hits, ship_asteroid_hit};
use super::spawn::{SpawnQueue, spawn_asteroids, split};
use super::state::{Arena, GameEvent, GamePhase, GameState, Spaceship};

/// Logical input state sampled at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub accelerate: bool,
    pub fire: bool,
    /// Pause key held; toggles on the press edge
    pub pause: bool,
}

/// Advance the game by one ready frame
///
/// `now_ms` is the frame timestamp, used for the reload cooldown.
pub fn tick(state: &mut GameState, input: &InputSnapshot, arena: &Arena, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !arena.is_valid() {
        log::debug!("Skipping tick for degenerate arena {:?}", arena);
        return events;
    }

    // Handle pause toggle
    let pause_pressed = input.pause && !state.pause_held;
    state.pause_held = input.pause;
    if pause_pressed {
        match state.phase {
            GamePhase::Playing => {
                state.set_phase(GamePhase::Paused, &mut events);
                return events;
            }
            GamePhase::Paused => state.set_phase(GamePhase::Playing, &mut events),
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Screensaver => {
            for asteroid in &mut state.asteroids {
                asteroid.body.integrate_wrapped(arena);
            }
            state.time_ticks += 1;
        }
        GamePhase::Playing => {
            play(state, input, arena, now_ms, &mut events);
            state.time_ticks += 1;
        }
        GamePhase::Paused | GamePhase::Won | GamePhase::Lost => {}
    }

    events
}

/// One Playing tick: input, motion, wrap/cull, collisions
fn play(state: &mut GameState, input: &InputSnapshot, arena: &Arena, now_ms: f64, events: &mut Vec<GameEvent>) {
    let mut queue = SpawnQueue::default();

    let Some(ship) = state.ship.as_mut() else {
        log::warn!("Playing without a ship; ending round");
        state.set_phase(GamePhase::Lost, events);
        return;
    };

    if input.rotate_left {
        ship.rotate(false);
    }
    if input.rotate_right {
        ship.rotate(true);
    }
    if input.accelerate {
        ship.accelerate();
    }
    if input.fire {
        ship.fire(now_ms, &mut queue);
    }

    // --- MOTION ---
    ship.body.integrate_wrapped(arena);
    for bullet in &mut state.bullets {
        bullet.body.integrate();
    }
    for asteroid in &mut state.asteroids {
        asteroid.body.integrate_wrapped(arena);
    }

    // --- COLLISIONS ---
    // Bullets leave the arena for good
    state.bullets.retain(|bullet| arena.contains(bullet.body.position));

    let hits = bullet_asteroid_hits(&state.bullets, &state.asteroids);
    let mut dead_bullets = vec![false; state.bullets.len()];
    let mut dead_asteroids = vec![false; state.asteroids.len()];
    for &(bullet_idx, asteroid_idx) in &hits.pairs {
        let asteroid = &state.asteroids[asteroid_idx];
        let fragments = split(
            &mut state.rng,
            asteroid,
            state.bullets[bullet_idx].body.velocity,
            &state.settings.asteroids,
            &mut queue,
        );
        log::debug!(
            "Bullet {} destroyed asteroid {} ({:?})",
            state.bullets[bullet_idx].id,
            asteroid.id,
            asteroid.size
        );
        events.push(GameEvent::AsteroidDestroyed {
            id: asteroid.id,
            size: asteroid.size,
            fragments,
        });
        dead_bullets[bullet_idx] = true;
        dead_asteroids[asteroid_idx] = true;
    }
    retain_alive(&mut state.bullets, &dead_bullets);
    retain_alive(&mut state.asteroids, &dead_asteroids);

    let ship_hit = state
        .ship
        .as_ref()
        .and_then(|ship| ship_asteroid_hit(ship, &state.asteroids))
        .map(|asteroid| asteroid.id);

    // Fragments and new bullets join at the end of the tick
    for id in state.drain_spawns(&mut queue) {
        events.push(GameEvent::BulletFired { id });
    }

    if let Some(by_asteroid) = ship_hit {
        log::info!("Ship destroyed by asteroid {}", by_asteroid);
        events.push(GameEvent::ShipDestroyed { by_asteroid });
        state.set_phase(GamePhase::Lost, events);
    } else if state.asteroids.is_empty() {
        log::info!("Asteroid field cleared after {} ticks", state.time_ticks);
        state.set_phase(GamePhase::Won, events);
    }
}

fn retain_alive<T>(items: &mut Vec<T>, dead: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !dead[idx];
        idx += 1;
        keep
    });
}

/// Fill the title screen with drifting asteroids (no ship, no exclusion zone)
pub fn populate_screensaver(state: &mut GameState, arena: &Arena) {
    state.clear_entities();
    let mut queue = SpawnQueue::default();
    spawn_asteroids(
        &mut state.rng,
        arena,
        arena.center(),
        state.settings.asteroids.screensaver_count,
        0.0,
        &state.settings.asteroids,
        &mut queue,
    );
    state.drain_spawns(&mut queue);
}

/// Leave the title screen and start a round
///
/// Only valid from Screensaver; anything else is logged and ignored.
pub fn start_round(state: &mut GameState, arena: &Arena) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Screensaver {
        log::warn!("Start ignored in phase {:?}", state.phase);
        return events;
    }
    if !arena.is_valid() {
        log::warn!("Start ignored for degenerate arena {:?}", arena);
        return events;
    }

    state.clear_entities();
    let ship = Spaceship::new(arena.center(), &state.sprites.ship, &state.settings.ship);
    let avoid = ship.body.position;
    state.ship = Some(ship);

    let tuning = &state.settings.asteroids;
    let mut queue = SpawnQueue::default();
    spawn_asteroids(
        &mut state.rng,
        arena,
        avoid,
        tuning.round_count,
        tuning.spawn_exclusion_radius,
        tuning,
        &mut queue,
    );
    state.drain_spawns(&mut queue);

    log::info!("Round started with {} asteroids", state.asteroids.len());
    events.push(GameEvent::RoundStarted {
        asteroids: state.asteroids.len(),
    });
    state.set_phase(GamePhase::Playing, &mut events);
    events
}

/// Leave a finished round for the title screen
///
/// Only valid from Won or Lost; anything else is logged and ignored.
pub fn return_to_menu(state: &mut GameState, arena: &Arena) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.phase.is_round_over() {
        log::warn!("Return to menu ignored in phase {:?}", state.phase);
        return events;
    }
    if !arena.is_valid() {
        log::warn!("Return to menu ignored for degenerate arena {:?}", arena);
        return events;
    }
    populate_screensaver(state, arena);
    state.set_phase(GamePhase::Screensaver, &mut events);
    events
}
