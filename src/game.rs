//! Owned game context
//!
//! `Game` holds the frame timer, the asset status and (once sprites arrive) the
//! simulation state. The host calls `frame` on every display refresh and wires
//! the renderer, menu, and input collaborators in.

use thiserror::Error;

use crate::platform::menu::directives_for;
use crate::platform::render::draw_commands;
use crate::platform::{AssetStatus, MenuDirective, MenuSink, Renderer};
use crate::settings::{ConfigError, Settings};
use crate::sim::{
    Arena, GameEvent, GamePhase, GameState, HudReadout, InputSnapshot, SpriteSet, Timer,
    populate_screensaver, return_to_menu, start_round, tick,
};

/// HUD text layout (screen pixels)
const HUD_MARGIN: f32 = 10.0;
const HUD_LINE_HEIGHT: f32 = 20.0;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("assets are not loaded yet")]
    AssetsNotReady,

    #[error("asset loading failed: {0}")]
    AssetsFailed(String),

    #[error("cannot {action} while {phase:?}")]
    InvalidTransition {
        action: &'static str,
        phase: GamePhase,
    },

    #[error("arena {width}x{height} has no playable area")]
    InvalidArena { width: f32, height: f32 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn check_arena(arena: &Arena) -> Result<(), GameError> {
    if arena.is_valid() {
        Ok(())
    } else {
        Err(GameError::InvalidArena {
            width: arena.width,
            height: arena.height,
        })
    }
}

#[derive(Debug)]
pub struct Game {
    settings: Settings,
    timer: Timer,
    assets: AssetStatus,
    state: Option<GameState>,
}

impl Game {
    pub fn new(settings: Settings) -> Result<Self, GameError> {
        settings.validate()?;
        let timer = Timer::new(settings.tick_rate_hz);
        Ok(Self {
            settings,
            timer,
            assets: AssetStatus::Loading,
            state: None,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn assets(&self) -> &AssetStatus {
        &self.assets
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Direct access for hosts that script scenarios (debug tools, tests)
    pub fn state_mut(&mut self) -> Option<&mut GameState> {
        self.state.as_mut()
    }

    /// Current phase, or `None` while waiting on assets
    pub fn phase(&self) -> Option<GamePhase> {
        self.state.as_ref().map(|state| state.phase)
    }

    /// Sprites arrived: enter the screensaver and show the title menu
    ///
    /// Rejected (nothing changes) while the arena has no area.
    pub fn assets_ready(
        &mut self,
        sprites: SpriteSet,
        arena: &Arena,
        menu: &mut impl MenuSink,
    ) -> Result<(), GameError> {
        if self.state.is_some() {
            log::warn!("Assets delivered twice; keeping the running game");
            return Ok(());
        }
        check_arena(arena)?;

        let mut state = GameState::new(self.settings.clone(), sprites);
        populate_screensaver(&mut state, arena);
        log::info!(
            "Assets ready, screensaver with {} asteroids",
            state.asteroids.len()
        );

        self.assets = AssetStatus::Ready(sprites);
        self.state = Some(state);
        menu.notify(MenuDirective::ShowTitle);
        Ok(())
    }

    pub fn assets_failed(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        log::error!("Asset loading failed: {}", reason);
        if self.state.is_none() {
            self.assets = AssetStatus::Failed(reason);
        }
    }

    fn loaded_state(&mut self) -> Result<&mut GameState, GameError> {
        match (&mut self.state, &self.assets) {
            (Some(state), _) => Ok(state),
            (None, AssetStatus::Failed(reason)) => Err(GameError::AssetsFailed(reason.clone())),
            (None, _) => Err(GameError::AssetsNotReady),
        }
    }

    /// Start a round from the title screen. Frame pacing restarts at `now_ms`.
    pub fn start(
        &mut self,
        arena: &Arena,
        menu: &mut impl MenuSink,
        now_ms: f64,
    ) -> Result<(), GameError> {
        self.try_start(arena, menu, now_ms)
            .inspect_err(|err| log::warn!("Start rejected: {}", err))
    }

    fn try_start(
        &mut self,
        arena: &Arena,
        menu: &mut impl MenuSink,
        now_ms: f64,
    ) -> Result<(), GameError> {
        let state = self.loaded_state()?;
        if state.phase != GamePhase::Screensaver {
            return Err(GameError::InvalidTransition {
                action: "start",
                phase: state.phase,
            });
        }
        check_arena(arena)?;

        let events = start_round(state, arena);
        notify_menu(&events, menu);
        self.timer.reset(now_ms);
        Ok(())
    }

    /// Leave a finished round for the title screen
    pub fn return_to_menu(
        &mut self,
        arena: &Arena,
        menu: &mut impl MenuSink,
    ) -> Result<(), GameError> {
        self.try_return_to_menu(arena, menu)
            .inspect_err(|err| log::warn!("Return to menu rejected: {}", err))
    }

    fn try_return_to_menu(
        &mut self,
        arena: &Arena,
        menu: &mut impl MenuSink,
    ) -> Result<(), GameError> {
        let state = self.loaded_state()?;
        if !state.phase.is_round_over() {
            return Err(GameError::InvalidTransition {
                action: "return to menu",
                phase: state.phase,
            });
        }
        check_arena(arena)?;

        let events = return_to_menu(state, arena);
        notify_menu(&events, menu);
        Ok(())
    }

    /// One display refresh. Simulates and draws only when the timer says a
    /// frame is due; returns the events that tick produced. A degenerate
    /// arena (e.g. a minimized window) freezes the simulation but still draws.
    pub fn frame(
        &mut self,
        timestamp_ms: f64,
        input: &InputSnapshot,
        arena: &Arena,
        renderer: &mut impl Renderer,
        menu: &mut impl MenuSink,
    ) -> Vec<GameEvent> {
        self.timer.advance(timestamp_ms);
        let Some(state) = self.state.as_mut() else {
            return Vec::new();
        };
        if !self.timer.frame_ready() {
            return Vec::new();
        }

        let events = if arena.is_valid() {
            tick(state, input, arena, timestamp_ms)
        } else {
            Vec::new()
        };
        notify_menu(&events, menu);
        render(state, arena, self.settings.show_hud, renderer);
        events
    }
}

fn notify_menu(events: &[GameEvent], menu: &mut impl MenuSink) {
    for event in events {
        if let GameEvent::PhaseChanged { from, to } = event {
            for directive in directives_for(*from, *to) {
                menu.notify(directive);
            }
        }
    }
}

fn render(state: &GameState, arena: &Arena, show_hud: bool, renderer: &mut impl Renderer) {
    renderer.clear(arena);
    for command in draw_commands(state) {
        renderer.draw(&command);
    }

    if !show_hud {
        return;
    }
    if let Some(hud) = HudReadout::from_state(state) {
        for (i, line) in hud.lines().iter().enumerate() {
            let y = HUD_MARGIN + HUD_LINE_HEIGHT * (i as f32 + 1.0);
            renderer.draw_text(HUD_MARGIN, y, line);
        }
    }
}
