//! End-to-end rounds through the public `Game` API with fake collaborators

use glam::Vec2;
use rock_drift::platform::{DrawCommand, DrawKind, InputBuffer, MenuDirective, Renderer};
use rock_drift::sim::{
    Arena, Asteroid, AsteroidSize, GameEvent, GamePhase, InputSnapshot, Sprite, SpriteHandle,
    SpriteSet,
};
use rock_drift::{Game, GameError, Settings};

const ARENA: Arena = Arena {
    width: 800.0,
    height: 600.0,
};
const FRAME_MS: f64 = 1000.0 / 60.0;

fn sprites() -> SpriteSet {
    let sprite = |handle, size| Sprite {
        handle: SpriteHandle(handle),
        width: size,
        height: size,
    };
    SpriteSet {
        ship: sprite(10, 30.0),
        bullet: sprite(11, 5.0),
        asteroid: sprite(12, 75.0),
    }
}

#[derive(Default)]
struct FakeRenderer {
    frames: usize,
    last_frame: Vec<DrawCommand>,
}

impl Renderer for FakeRenderer {
    fn clear(&mut self, _arena: &Arena) {
        self.frames += 1;
        self.last_frame.clear();
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.last_frame.push(*command);
    }
}

struct Harness {
    game: Game,
    renderer: FakeRenderer,
    menu: Vec<MenuDirective>,
    now: f64,
}

impl Harness {
    fn ready() -> Self {
        let mut game = Game::new(Settings::default().with_seed(7)).unwrap();
        let mut menu = Vec::new();
        game.assets_ready(sprites(), &ARENA, &mut menu).unwrap();
        Self {
            game,
            renderer: FakeRenderer::default(),
            menu,
            now: 0.0,
        }
    }

    fn start(&mut self) {
        self.game.start(&ARENA, &mut self.menu, self.now).unwrap();
    }

    fn frame(&mut self, input: InputSnapshot) -> Vec<GameEvent> {
        self.now += FRAME_MS;
        self.game
            .frame(self.now, &input, &ARENA, &mut self.renderer, &mut self.menu)
    }

    /// Replace the field with one asteroid
    fn place_asteroid(&mut self, position: Vec2, size: AsteroidSize) {
        let state = self.game.state_mut().unwrap();
        let asteroid = Asteroid::new(1_000, position, Vec2::ZERO, size, &state.sprites.asteroid);
        state.asteroids = vec![asteroid];
    }
}

#[test]
fn start_waits_for_assets() {
    let mut game = Game::new(Settings::default()).unwrap();
    let mut menu = Vec::new();

    let err = game.start(&ARENA, &mut menu, 0.0).unwrap_err();
    assert!(matches!(err, GameError::AssetsNotReady));
    assert_eq!(err.to_string(), "assets are not loaded yet");

    game.assets_ready(sprites(), &ARENA, &mut menu).unwrap();
    game.start(&ARENA, &mut menu, 0.0).unwrap();
    assert_eq!(game.phase(), Some(GamePhase::Playing));
    assert_eq!(menu, vec![MenuDirective::ShowTitle, MenuDirective::HideTitle]);
}

#[test]
fn keyboard_pause_round_trip() {
    let mut h = Harness::ready();
    h.start();
    let keys = InputBuffer::new();

    keys.handle_key("Escape", true);
    h.frame(keys.snapshot());
    assert_eq!(h.game.phase(), Some(GamePhase::Paused));

    // Holding the key does not toggle again
    let frozen: Vec<Vec2> = h.renderer.last_frame.iter().map(|c| c.position).collect();
    h.frame(keys.snapshot());
    assert_eq!(h.game.phase(), Some(GamePhase::Paused));
    let still: Vec<Vec2> = h.renderer.last_frame.iter().map(|c| c.position).collect();
    assert_eq!(frozen, still);

    keys.handle_key("Escape", false);
    h.frame(keys.snapshot());
    keys.handle_key("Escape", true);
    h.frame(keys.snapshot());
    assert_eq!(h.game.phase(), Some(GamePhase::Playing));
    assert_eq!(
        h.menu[2..],
        [MenuDirective::ShowPauseMenu, MenuDirective::HidePauseMenu]
    );
}

#[test]
fn shooting_the_last_asteroid_wins() {
    let mut h = Harness::ready();
    h.start();
    // Straight ahead of the ship (which faces up from the center)
    h.place_asteroid(Vec2::new(400.0, 240.0), AsteroidSize::Small);

    let fire = InputSnapshot {
        fire: true,
        ..Default::default()
    };
    let mut destroyed = Vec::new();
    for _ in 0..20 {
        for event in h.frame(fire) {
            if let GameEvent::AsteroidDestroyed { id, fragments, .. } = event {
                destroyed.push((id, fragments));
            }
        }
        if h.game.phase() == Some(GamePhase::Won) {
            break;
        }
    }

    assert_eq!(destroyed, vec![(1_000, 0)]);
    assert_eq!(h.game.phase(), Some(GamePhase::Won));
    assert_eq!(h.menu.last(), Some(&MenuDirective::ShowVictory));

    h.game.return_to_menu(&ARENA, &mut h.menu).unwrap();
    assert_eq!(h.game.phase(), Some(GamePhase::Screensaver));
    assert_eq!(
        h.menu[h.menu.len() - 2..],
        [MenuDirective::HideOutcome, MenuDirective::ShowTitle]
    );
    assert!(h.game.state().unwrap().ship.is_none());
}

#[test]
fn large_asteroid_splits_before_dying() {
    let mut h = Harness::ready();
    h.start();
    h.place_asteroid(Vec2::new(400.0, 200.0), AsteroidSize::Large);

    let fire = InputSnapshot {
        fire: true,
        ..Default::default()
    };
    let mut fragments = None;
    for _ in 0..30 {
        for event in h.frame(fire) {
            if let GameEvent::AsteroidDestroyed { id: 1_000, fragments: n, .. } = event {
                fragments = Some(n);
            }
        }
        if fragments.is_some() {
            break;
        }
    }

    assert_eq!(fragments, Some(2));
    let state = h.game.state().unwrap();
    assert_eq!(state.asteroids.len(), 2);
    assert!(state.asteroids.iter().all(|a| a.size == AsteroidSize::Medium));
    assert_eq!(h.game.phase(), Some(GamePhase::Playing));
}

#[test]
fn collision_loses_and_freezes() {
    let mut h = Harness::ready();
    h.start();
    h.place_asteroid(ARENA.center(), AsteroidSize::Medium);

    let events = h.frame(InputSnapshot::default());
    assert!(events.contains(&GameEvent::ShipDestroyed { by_asteroid: 1_000 }));
    assert_eq!(h.game.phase(), Some(GamePhase::Lost));
    assert_eq!(h.menu.last(), Some(&MenuDirective::ShowDefeat));

    // Every later frame is frozen but still drawn
    let thrust = InputSnapshot {
        accelerate: true,
        fire: true,
        ..Default::default()
    };
    let before = h.renderer.frames;
    assert!(h.frame(thrust).is_empty());
    assert_eq!(h.renderer.frames, before + 1);
    let ship = h
        .renderer
        .last_frame
        .iter()
        .find(|c| c.kind == DrawKind::Ship)
        .unwrap();
    assert_eq!(ship.position, ARENA.center());

    let err = h.game.start(&ARENA, &mut h.menu, h.now).unwrap_err();
    assert!(matches!(
        err,
        GameError::InvalidTransition {
            phase: GamePhase::Lost,
            ..
        }
    ));
}

#[test]
fn same_seed_same_round() {
    let mut a = Harness::ready();
    let mut b = Harness::ready();
    a.start();
    b.start();

    let input = InputSnapshot {
        rotate_right: true,
        accelerate: true,
        fire: true,
        ..Default::default()
    };
    for _ in 0..120 {
        let ea = a.frame(input);
        let eb = b.frame(input);
        assert_eq!(ea, eb);
    }
    assert_eq!(a.renderer.last_frame, b.renderer.last_frame);
}
