//! Game state and core simulation types
//!
//! Entities share a `Body` (position, velocity, hitbox) and add their own
//! behavior on top. The `GameState` owns every collection.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::shape::Hitbox;
use super::spawn::{Spawn, SpawnQueue};
use super::vector::{Vector2Ext, unit};
use crate::consts::BULLET_RADIUS;
use crate::settings::{Settings, ShipSettings};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen; asteroids drift, no ship
    Screensaver,
    /// Active round
    Playing,
    /// Round frozen until pause is toggled again
    Paused,
    /// Every asteroid destroyed
    Won,
    /// Ship hit by an asteroid
    Lost,
}

impl GamePhase {
    /// Phases in which nothing moves
    pub fn is_frozen(&self) -> bool {
        matches!(self, GamePhase::Paused | GamePhase::Won | GamePhase::Lost)
    }

    /// Round over, waiting for "return to menu"
    pub fn is_round_over(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    RoundStarted { asteroids: usize },
    BulletFired { id: u32 },
    AsteroidDestroyed { id: u32, size: AsteroidSize, fragments: usize },
    ShipDestroyed { by_asteroid: u32 },
}

/// Opaque handle owned by the asset collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteHandle(pub u32);

/// A loaded sprite: handle plus pixel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub handle: SpriteHandle,
    pub width: f32,
    pub height: f32,
}

/// Everything the asset collaborator hands over once loading completes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteSet {
    pub ship: Sprite,
    pub bullet: Sprite,
    pub asteroid: Sprite,
}

/// Arena bounds, supplied fresh every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Finite, positive extents; anything else can't be sampled or wrapped
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(0.5 * self.width, 0.5 * self.height)
    }

    /// Inside `[0, width] x [0, height]`, edges included
    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    /// Toroidal wrap into `[0, width) x [0, height)`
    pub fn wrap(&self, point: Vec2) -> Vec2 {
        Vec2::new(wrap_axis(point.x, self.width), wrap_axis(point.y, self.height))
    }
}

#[inline]
fn wrap_axis(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Shared physical record of every entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub hitbox: Hitbox,
}

impl Body {
    pub fn new(position: Vec2, velocity: Vec2, hitbox: Hitbox) -> Self {
        Self {
            position,
            velocity,
            hitbox,
        }
    }

    /// Advance one tick of linear motion
    #[inline]
    pub fn integrate(&mut self) {
        self.position += self.velocity;
    }

    /// Advance, then wrap around the arena edges
    pub fn integrate_wrapped(&mut self, arena: &Arena) {
        self.integrate();
        self.position = arena.wrap(self.position);
    }

    /// Collision radius (circle hitboxes; triangles use half their height)
    pub fn radius(&self) -> f32 {
        self.hitbox.radius().unwrap_or_else(|| 0.5 * self.hitbox.height())
    }
}

/// Asteroid size tier; radius and sprite scale follow it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Small = 1,
    Medium = 2,
    Large = 3,
}

impl AsteroidSize {
    pub fn from_tier(tier: u8) -> Option<Self> {
        match tier {
            1 => Some(AsteroidSize::Small),
            2 => Some(AsteroidSize::Medium),
            3 => Some(AsteroidSize::Large),
            _ => None,
        }
    }

    pub fn tier(&self) -> u8 {
        *self as u8
    }

    /// Fraction of the base radius / sprite size
    pub fn scale(&self) -> f32 {
        match self {
            AsteroidSize::Small => 0.50,
            AsteroidSize::Medium => 0.75,
            AsteroidSize::Large => 1.00,
        }
    }

    /// Tier of the fragments, if this size splits at all
    pub fn smaller(&self) -> Option<Self> {
        match self {
            AsteroidSize::Small => None,
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Large => Some(AsteroidSize::Medium),
        }
    }
}

/// A drifting asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub body: Body,
    pub size: AsteroidSize,
    pub sprite: SpriteHandle,
}

impl Asteroid {
    pub fn new(id: u32, position: Vec2, velocity: Vec2, size: AsteroidSize, sprite: &Sprite) -> Self {
        let radius = 0.5 * sprite.width * size.scale();
        Self {
            id,
            body: Body::new(position, velocity, Hitbox::circle(radius)),
            size,
            sprite: sprite.handle,
        }
    }
}

/// A projectile; flies straight and is culled at the arena edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub body: Body,
    pub sprite: SpriteHandle,
}

impl Bullet {
    pub fn new(id: u32, position: Vec2, velocity: Vec2, sprite: &Sprite) -> Self {
        Self {
            id,
            body: Body::new(position, velocity, Hitbox::circle(BULLET_RADIUS)),
            sprite: sprite.handle,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spaceship {
    pub body: Body,
    /// Visual outline, used for the muzzle offset
    pub silhouette: Hitbox,
    pub sprite: SpriteHandle,
    /// Heading, always unit length
    pub direction: Vec2,
    pub acceleration: f32,
    /// Degrees per rotate tick
    pub maneuverability: f32,
    pub max_speed: f32,
    pub bullet_speed: f32,
    pub reload_cooldown_ms: f64,
    /// Earliest timestamp (ms) at which the next shot may fire
    reload_ready_at: Option<f64>,
}

impl Spaceship {
    /// Spawn at rest, pointing up the screen
    pub fn new(position: Vec2, sprite: &Sprite, tuning: &ShipSettings) -> Self {
        Self {
            body: Body::new(position, Vec2::ZERO, Hitbox::circle(0.5 * sprite.width)),
            silhouette: Hitbox::triangle_in_box(sprite.width, sprite.height),
            sprite: sprite.handle,
            direction: unit(0.0, -1.0),
            acceleration: tuning.acceleration,
            maneuverability: tuning.maneuverability,
            max_speed: tuning.max_speed,
            bullet_speed: tuning.bullet_speed,
            reload_cooldown_ms: tuning.reload_cooldown_ms,
            reload_ready_at: None,
        }
    }

    /// Thrust along the heading, clamped to `max_speed`
    pub fn accelerate(&mut self) {
        self.body.velocity += self.direction * self.acceleration;
        let mut clamped = self.body.velocity.clamp_length_max(self.max_speed);
        // Rescaling can land one ulp above the limit
        while clamped.length() > self.max_speed {
            clamped *= 1.0 - f32::EPSILON;
        }
        self.body.velocity = clamped;
    }

    /// Turn by `maneuverability` degrees (clockwise on screen when `clockwise`)
    pub fn rotate(&mut self, clockwise: bool) {
        let sign = if clockwise { 1.0 } else { -1.0 };
        // Keep unit length under repeated rotation
        self.direction = self.direction.rotated(self.maneuverability * sign).unitized();
    }

    /// Still cooling down at `now_ms`
    pub fn is_reloading(&self, now_ms: f64) -> bool {
        self.reload_ready_at.is_some_and(|ready_at| now_ms < ready_at)
    }

    /// Tip of the ship, where bullets appear
    pub fn muzzle(&self) -> Vec2 {
        self.body.position + self.direction * (0.5 * self.silhouette.height())
    }

    /// Queue a bullet unless reloading. Returns whether a shot was fired.
    pub fn fire(&mut self, now_ms: f64, queue: &mut SpawnQueue) -> bool {
        if self.is_reloading(now_ms) {
            return false;
        }
        queue.push(Spawn::Bullet {
            position: self.muzzle(),
            velocity: self.body.velocity + self.direction * self.bullet_speed,
        });
        self.reload_ready_at = Some(now_ms + self.reload_cooldown_ms);
        true
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub settings: Settings,
    pub sprites: SpriteSet,
    pub phase: GamePhase,
    /// Present only during a round (Playing/Paused/Won/Lost)
    pub ship: Option<Spaceship>,
    /// Sorted by id
    pub bullets: Vec<Bullet>,
    /// Sorted by id
    pub asteroids: Vec<Asteroid>,
    /// Simulated ticks since creation
    pub time_ticks: u64,
    /// Pause key state last tick (toggle fires on the press edge)
    pub(crate) pause_held: bool,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Fresh state in the Screensaver phase, with no asteroids placed yet
    pub fn new(settings: Settings, sprites: SpriteSet) -> Self {
        let rng = Pcg32::seed_from_u64(settings.seed);
        Self {
            settings,
            sprites,
            phase: GamePhase::Screensaver,
            ship: None,
            bullets: Vec::new(),
            asteroids: Vec::new(),
            time_ticks: 0,
            pause_held: false,
            rng,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Turn queued descriptors into owned entities. Returns the new bullet ids.
    pub fn drain_spawns(&mut self, queue: &mut SpawnQueue) -> Vec<u32> {
        let mut fired = Vec::new();
        for spawn in queue.drain() {
            let id = self.next_entity_id();
            match spawn {
                Spawn::Bullet { position, velocity } => {
                    self.bullets
                        .push(Bullet::new(id, position, velocity, &self.sprites.bullet));
                    fired.push(id);
                }
                Spawn::Asteroid {
                    position,
                    velocity,
                    size,
                } => {
                    self.asteroids.push(Asteroid::new(
                        id,
                        position,
                        velocity,
                        size,
                        &self.sprites.asteroid,
                    ));
                }
            }
        }
        fired
    }

    /// Drop every entity (phase untouched)
    pub fn clear_entities(&mut self) {
        self.ship = None;
        self.bullets.clear();
        self.asteroids.clear();
    }

    /// Move to `to`, recording the transition
    pub(crate) fn set_phase(&mut self, to: GamePhase, events: &mut Vec<GameEvent>) {
        if self.phase == to {
            return;
        }
        let from = self.phase;
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        events.push(GameEvent::PhaseChanged { from, to });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_sprites() -> SpriteSet {
        SpriteSet {
            ship: Sprite {
                handle: SpriteHandle(1),
                width: 30.0,
                height: 30.0,
            },
            bullet: Sprite {
                handle: SpriteHandle(2),
                width: 5.0,
                height: 5.0,
            },
            asteroid: Sprite {
                handle: SpriteHandle(3),
                width: 75.0,
                height: 75.0,
            },
        }
    }

    fn test_ship() -> Spaceship {
        Spaceship::new(Vec2::new(400.0, 300.0), &test_sprites().ship, &ShipSettings::default())
    }

    #[test]
    fn test_single_acceleration() {
        let mut ship = test_ship();
        ship.accelerate();
        assert_eq!(ship.body.velocity, Vec2::new(0.0, -0.25));
    }

    #[test]
    fn test_speed_clamped_exactly() {
        let mut ship = test_ship();
        for _ in 0..61 {
            ship.accelerate();
        }
        assert_eq!(ship.body.velocity.length(), 15.0);
    }

    #[test]
    fn test_speed_never_exceeds_max_at_any_heading() {
        for turns in 0..120 {
            let mut ship = test_ship();
            for _ in 0..turns {
                ship.rotate(true);
            }
            for _ in 0..100 {
                ship.accelerate();
                assert!(
                    ship.body.velocity.length() <= ship.max_speed,
                    "heading {:?}: |v| = {}",
                    ship.direction,
                    ship.body.velocity.length()
                );
            }
        }
    }

    #[test]
    fn test_rotation_keeps_unit_heading() {
        let mut ship = test_ship();
        for _ in 0..1000 {
            ship.rotate(true);
        }
        assert!((ship.direction.length() - 1.0).abs() < 1e-5);

        // 120 turns of 3 degrees is a full circle
        let mut ship = test_ship();
        for _ in 0..120 {
            ship.rotate(false);
        }
        assert!((ship.direction - Vec2::new(0.0, -1.0)).length() < 1e-3);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut ship = test_ship();
        let mut queue = SpawnQueue::default();

        assert!(ship.fire(1000.0, &mut queue));
        assert!(!ship.fire(1100.0, &mut queue));
        assert!(ship.is_reloading(1199.9));
        assert!(ship.fire(1200.0, &mut queue));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_bullet_spawns_at_muzzle() {
        let mut ship = test_ship();
        ship.body.velocity = Vec2::new(1.0, 0.0);
        let mut queue = SpawnQueue::default();
        ship.fire(0.0, &mut queue);

        match queue.drain().next() {
            Some(Spawn::Bullet { position, velocity }) => {
                assert!((position - Vec2::new(400.0, 285.0)).length() < 1e-3);
                assert!((velocity - Vec2::new(1.0, -8.0)).length() < 1e-5);
            }
            other => panic!("expected a bullet, got {:?}", other),
        }
    }

    #[test]
    fn test_asteroid_radius_follows_tier() {
        let sprite = test_sprites().asteroid;
        let radii: Vec<f32> = [AsteroidSize::Small, AsteroidSize::Medium, AsteroidSize::Large]
            .iter()
            .map(|&size| Asteroid::new(1, Vec2::ZERO, Vec2::ZERO, size, &sprite).body.radius())
            .collect();
        assert_eq!(radii, vec![18.75, 28.125, 37.5]);
    }

    #[test]
    fn test_size_tiers() {
        assert_eq!(AsteroidSize::from_tier(3), Some(AsteroidSize::Large));
        assert_eq!(AsteroidSize::from_tier(0), None);
        assert_eq!(AsteroidSize::Large.smaller(), Some(AsteroidSize::Medium));
        assert_eq!(AsteroidSize::Small.smaller(), None);
        assert_eq!(AsteroidSize::Medium.tier(), 2);
    }

    #[test]
    fn test_arena_wrap() {
        let arena = Arena::new(800.0, 600.0);
        assert_eq!(arena.wrap(Vec2::new(805.0, -5.0)), Vec2::new(5.0, 595.0));
        assert_eq!(arena.wrap(Vec2::new(800.0, 600.0)), Vec2::ZERO);
        let tiny = arena.wrap(Vec2::new(-1e-9, 10.0));
        assert!(tiny.x >= 0.0 && tiny.x < 800.0);
    }

    #[test]
    fn test_arena_validity() {
        assert!(Arena::new(800.0, 600.0).is_valid());
        assert!(!Arena::new(0.0, 0.0).is_valid());
        assert!(!Arena::new(800.0, -1.0).is_valid());
        assert!(!Arena::new(f32::NAN, 600.0).is_valid());
        assert!(!Arena::new(f32::INFINITY, 600.0).is_valid());
    }

    #[test]
    fn test_arena_contains_edges() {
        let arena = Arena::new(800.0, 600.0);
        assert!(arena.contains(Vec2::new(0.0, 600.0)));
        assert!(!arena.contains(Vec2::new(-0.1, 10.0)));
        assert!(!arena.contains(Vec2::new(10.0, 600.5)));
    }

    #[test]
    fn test_drain_spawns_assigns_ids() {
        let mut state = GameState::new(Settings::default(), test_sprites());
        let mut queue = SpawnQueue::default();
        queue.push(Spawn::Asteroid {
            position: Vec2::new(10.0, 10.0),
            velocity: Vec2::X,
            size: AsteroidSize::Medium,
        });
        queue.push(Spawn::Bullet {
            position: Vec2::ZERO,
            velocity: Vec2::Y,
        });

        let fired = state.drain_spawns(&mut queue);
        assert_eq!(fired, vec![2]);
        assert_eq!(state.asteroids[0].id, 1);
        assert_eq!(state.asteroids[0].size, AsteroidSize::Medium);
        assert_eq!(state.bullets[0].body.radius(), BULLET_RADIUS);
        assert!(queue.is_empty());
    }
}
