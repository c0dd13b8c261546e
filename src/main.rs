//! Rock Drift headless driver
//!
//! Plays one seeded round with a simple autopilot against logging
//! collaborators and prints how it ended. Pass a settings JSON path as the
//! first argument to override the defaults.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::process::ExitCode;

    use rock_drift::platform::{DrawCommand, DrawKind, MenuDirective, MenuSink, Renderer};
    use rock_drift::sim::vector::from_points;
    use rock_drift::sim::{
        Arena, GameEvent, GamePhase, GameState, InputSnapshot, Sprite, SpriteHandle, SpriteSet,
    };
    use rock_drift::{Game, GameError, Settings};

    /// Simulated display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after two simulated minutes
    const MAX_FRAMES: u32 = 60 * 120;
    /// Title screen frames before pressing start
    const TITLE_FRAMES: u32 = 30;
    /// Aim tolerance (cosine of the angle to target)
    const AIM_COS: f32 = 0.97;

    /// Counts what would have been drawn
    #[derive(Default)]
    struct LogRenderer {
        frames: u64,
        asteroids: usize,
        bullets: usize,
        hud: Vec<String>,
    }

    impl Renderer for LogRenderer {
        fn clear(&mut self, arena: &Arena) {
            self.frames += 1;
            self.asteroids = 0;
            self.bullets = 0;
            self.hud.clear();
            log::trace!("clear {}x{}", arena.width, arena.height);
        }

        fn draw(&mut self, command: &DrawCommand) {
            match command.kind {
                DrawKind::Asteroid => self.asteroids += 1,
                DrawKind::Bullet => self.bullets += 1,
                DrawKind::Ship => {}
            }
        }

        fn draw_text(&mut self, _x: f32, _y: f32, text: &str) {
            self.hud.push(text.to_string());
        }
    }

    struct LogMenu;

    impl MenuSink for LogMenu {
        fn notify(&mut self, directive: MenuDirective) {
            log::info!("menu: {:?}", directive);
        }
    }

    fn sprites() -> SpriteSet {
        SpriteSet {
            ship: Sprite {
                handle: SpriteHandle(0),
                width: 30.0,
                height: 30.0,
            },
            bullet: Sprite {
                handle: SpriteHandle(1),
                width: 5.0,
                height: 5.0,
            },
            asteroid: Sprite {
                handle: SpriteHandle(2),
                width: 75.0,
                height: 75.0,
            },
        }
    }

    /// Turn toward the nearest asteroid, fire when lined up, creep forward
    /// when nothing is close
    fn autopilot(state: &GameState) -> InputSnapshot {
        let Some(ship) = &state.ship else {
            return InputSnapshot::default();
        };
        let origin = ship.body.position;
        let Some(target) = state
            .asteroids
            .iter()
            .map(|asteroid| asteroid.body.position)
            .min_by(|a, b| a.distance_squared(origin).total_cmp(&b.distance_squared(origin)))
        else {
            return InputSnapshot::default();
        };

        let to_target = from_points(origin.x, origin.y, target.x, target.y, true);
        let turn = ship.direction.perp_dot(to_target);
        let aligned = ship.direction.dot(to_target) >= AIM_COS;
        InputSnapshot {
            rotate_left: !aligned && turn < 0.0,
            rotate_right: !aligned && turn >= 0.0,
            accelerate: target.distance(origin) > 250.0 && ship.body.velocity.length() < 1.0,
            fire: aligned,
            pause: false,
        }
    }

    pub fn run() -> Result<GamePhase, GameError> {
        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        log::info!("Rock Drift (headless) starting, seed {}", settings.seed);

        let arena = Arena::new(800.0, 600.0);
        let mut game = Game::new(settings)?;
        let mut renderer = LogRenderer::default();
        let mut menu = LogMenu;
        let idle = InputSnapshot::default();

        game.assets_ready(sprites(), &arena, &mut menu)?;

        let mut now = 0.0;
        for _ in 0..TITLE_FRAMES {
            now += FRAME_MS;
            game.frame(now, &idle, &arena, &mut renderer, &mut menu);
        }

        game.start(&arena, &mut menu, now)?;

        let mut shots = 0u32;
        let mut kills = 0u32;
        for _ in 0..MAX_FRAMES {
            now += FRAME_MS;
            let input = game.state().map(autopilot).unwrap_or_default();
            for event in game.frame(now, &input, &arena, &mut renderer, &mut menu) {
                match event {
                    GameEvent::BulletFired { .. } => shots += 1,
                    GameEvent::AsteroidDestroyed { .. } => kills += 1,
                    _ => {}
                }
            }
            if game.phase().is_some_and(|phase| phase.is_round_over()) {
                break;
            }
        }

        for line in &renderer.hud {
            log::info!("hud: {}", line);
        }
        println!(
            "{} frames drawn, {} shots, {} asteroids destroyed ({} left, {} bullets in flight)",
            renderer.frames, shots, kills, renderer.asteroids, renderer.bullets
        );

        let phase = game.phase().unwrap_or(GamePhase::Screensaver);
        if phase.is_round_over() {
            game.return_to_menu(&arena, &mut menu)?;
        }
        Ok(phase)
    }

    pub fn main() -> ExitCode {
        env_logger::init();

        match run() {
            Ok(GamePhase::Won) => {
                println!("Field cleared");
                ExitCode::SUCCESS
            }
            Ok(GamePhase::Lost) => {
                println!("Ship destroyed");
                ExitCode::SUCCESS
            }
            Ok(phase) => {
                println!("Round still running ({:?}) when the demo ended", phase);
                ExitCode::SUCCESS
            }
            Err(err) => {
                log::error!("{}", err);
                eprintln!("error: {}", err);
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    headless::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on the web
}
