//! Game state and core simulation types
//!
//! `GameState` is the single owner of everything a session mutates. Hosts
//! hold one and hand it to `tick` by mutable reference.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particles::Particle;
use super::rect::Rect;
use super::spawn;
use crate::consts::*;
use crate::{Rgb, lighten};

/// Undrained events kept by `GameState`; older ones are dropped first
pub const MAX_PENDING_EVENTS: usize = 256;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Fell off the bottom of the screen
    Fell,
    /// Touched a spike
    Enemy,
}

/// Notable things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Landed { platform_top: f32 },
    CoinCollected { total: u32 },
    PlatformSpawned { pos: Vec2, enemy: bool, coin: bool },
    GameOver { cause: GameOverCause },
    Restarted,
}

/// The player (a ball drawn inside its bounding box)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Vertical velocity (positive = falling)
    pub vel_y: f32,
    /// Accumulated scroll distance
    pub score: u64,
    pub coins: u32,
    /// Resolved onto a platform during the last tick
    pub on_platform: bool,
    /// Jump particles (visual only)
    pub particles: Vec<Particle>,
}

impl Default for Player {
    fn default() -> Self {
        let size = Vec2::splat(PLAYER_RADIUS * 2.0);
        // Resting on top of the start platform, horizontally centered
        let center = Vec2::new(
            SCREEN_WIDTH / 2.0,
            SCREEN_HEIGHT - PLATFORM_HEIGHT - PLAYER_RADIUS,
        );
        Self {
            rect: Rect::from_center(center, size),
            vel_y: 0.0,
            score: 0,
            coins: 0,
            on_platform: false,
            particles: Vec::new(),
        }
    }
}

impl Player {
    /// Gravity is applied every tick, grounded or not
    pub fn apply_gravity(&mut self) {
        self.vel_y += GRAVITY;
    }

    /// Move by the current vertical velocity and the horizontal input delta
    pub fn integrate(&mut self, dx: f32) {
        self.rect.pos.y += self.vel_y;
        self.rect.pos.x += dx;
    }

    /// Horizontal screen wrap, preserving the sprite width
    pub fn wrap(&mut self) {
        if self.rect.right() > SCREEN_WIDTH {
            self.rect.pos.x = 0.0;
        }
        if self.rect.left() < 0.0 {
            self.rect.pos.x = SCREEN_WIDTH - self.rect.size.x;
        }
    }

    /// Above the scroll line, return the amount the world should move down
    pub fn scroll_amount(&self) -> Option<f32> {
        if self.rect.top() < SCROLL_LINE {
            let amount = self.vel_y.abs().floor();
            (amount > 0.0).then_some(amount)
        } else {
            None
        }
    }

    /// Top edge has dropped past the bottom of the screen
    pub fn fell_off_screen(&self) -> bool {
        self.rect.top() > SCREEN_HEIGHT
    }
}

/// A platform the player can land on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub color: Rgb,
}

/// Regular platform color
pub const PLATFORM_COLOR: Rgb = [30, 180, 30];
/// Start platform color
pub const START_PLATFORM_COLOR: Rgb = [40, 200, 40];

impl Platform {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, PLATFORM_WIDTH, PLATFORM_HEIGHT),
            color: PLATFORM_COLOR,
        }
    }

    /// The wide platform the player starts on
    pub fn start() -> Self {
        Self {
            rect: Rect::new(
                (SCREEN_WIDTH - START_PLATFORM_WIDTH) / 2.0,
                SCREEN_HEIGHT - PLATFORM_HEIGHT,
                START_PLATFORM_WIDTH,
                PLATFORM_HEIGHT,
            ),
            color: START_PLATFORM_COLOR,
        }
    }

    /// Inner highlight color
    pub fn highlight(&self) -> Rgb {
        lighten(self.color)
    }

    pub fn is_below_screen(&self) -> bool {
        self.rect.top() > SCREEN_HEIGHT
    }
}

/// Spike color
pub const ENEMY_COLOR: Rgb = [255, 0, 0];

/// A spike that patrols horizontally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    /// -1.0 (left) or 1.0 (right)
    pub direction: f32,
    pub speed: f32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, direction: f32) -> Self {
        Self {
            rect: Rect::new(x, y, ENEMY_WIDTH, ENEMY_HEIGHT),
            direction,
            speed: ENEMY_SPEED,
        }
    }

    /// Patrol one tick, reflecting off either screen edge
    pub fn patrol(&mut self) {
        self.rect.pos.x += self.direction * self.speed;
        if self.direction < 0.0 && self.rect.left() <= 0.0 {
            self.rect.pos.x = 0.0;
            self.direction = 1.0;
        } else if self.direction > 0.0 && self.rect.right() >= SCREEN_WIDTH {
            self.rect.pos.x = SCREEN_WIDTH - self.rect.size.x;
            self.direction = -1.0;
        }
    }

    pub fn is_below_screen(&self) -> bool {
        self.rect.top() > SCREEN_HEIGHT
    }
}

/// Coin color
pub const COIN_COLOR: Rgb = [255, 215, 0];

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub center: Vec2,
}

impl Coin {
    pub fn new(center: Vec2) -> Self {
        Self { center }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.center, Vec2::splat(COIN_SIZE))
    }

    pub fn is_below_screen(&self) -> bool {
        self.rect().top() > SCREEN_HEIGHT
    }
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Spawn and particle randomness
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// First cause of the current game over
    pub game_over_cause: Option<GameOverCause>,
    /// Ticks since session start
    pub time_ticks: u64,
    /// Session clock in milliseconds, advanced by `tick`
    pub elapsed_ms: f64,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    /// Hosts drain this every tick with `take_events`
    events: VecDeque<GameEvent>,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_rng(seed, Pcg32::seed_from_u64(seed))
    }

    /// Create a new session drawing from an existing generator
    pub fn with_rng(seed: u64, rng: Pcg32) -> Self {
        let mut state = Self {
            seed,
            rng,
            phase: GamePhase::Playing,
            game_over_cause: None,
            time_ticks: 0,
            elapsed_ms: 0.0,
            player: Player::default(),
            platforms: Vec::new(),
            enemies: Vec::new(),
            coins: Vec::new(),
            events: VecDeque::new(),
        };
        spawn::reset_layout(&mut state);
        state
    }

    /// Replace the session with a fresh one; the RNG stream carries on
    pub fn restart(&mut self) {
        let rng = self.rng.clone();
        *self = Self::with_rng(self.seed, rng);
        self.push_event(GameEvent::Restarted);
        log::info!("Session restarted");
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Enter game over; only the first cause is recorded
    pub fn game_over(&mut self, cause: GameOverCause) {
        if self.is_game_over() {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.game_over_cause = Some(cause);
        self.push_event(GameEvent::GameOver { cause });
        log::info!(
            "Game over ({:?}) after {} ticks: score {}, coins {}",
            cause,
            self.time_ticks,
            self.player.score,
            self.player.coins
        );
    }

    /// Hazards and rewards are only attached once the warm-up has passed
    pub fn warmed_up(&self) -> bool {
        self.elapsed_ms > WARMUP_MS
    }

    /// Move every world entity down by `amount`
    pub fn scroll_world(&mut self, amount: f32) {
        let delta = Vec2::new(0.0, amount);
        for platform in &mut self.platforms {
            platform.rect.pos += delta;
        }
        for enemy in &mut self.enemies {
            enemy.rect.pos += delta;
        }
        for coin in &mut self.coins {
            coin.center += delta;
        }
    }

    /// Queue an event, dropping the oldest once the queue is full
    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Drain the events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_layout() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.platforms.len(), MIN_PLATFORMS);
        assert!(state.enemies.is_empty());
        assert!(state.coins.is_empty());
        assert_eq!(state.player.score, 0);
        assert_eq!(state.player.coins, 0);
    }

    #[test]
    fn test_player_starts_on_start_platform() {
        let player = Player::default();
        let start = Platform::start();
        assert_eq!(player.rect.bottom(), start.rect.top());
        assert_eq!(player.rect.center().x, SCREEN_WIDTH / 2.0);
    }

    #[test]
    fn test_wrap_right_edge() {
        let mut player = Player::default();
        player.rect.pos.x = SCREEN_WIDTH - 10.0;
        player.wrap();
        assert_eq!(player.rect.left(), 0.0);
    }

    #[test]
    fn test_wrap_left_edge() {
        let mut player = Player::default();
        player.rect.pos.x = -3.0;
        player.wrap();
        assert_eq!(player.rect.right(), SCREEN_WIDTH);
    }

    #[test]
    fn test_scroll_amount_requires_height_and_speed() {
        let mut player = Player::default();
        player.vel_y = -7.5;
        assert_eq!(player.scroll_amount(), None);

        player.rect.pos.y = SCROLL_LINE - 1.0;
        assert_eq!(player.scroll_amount(), Some(7.0));

        player.vel_y = 0.0;
        assert_eq!(player.scroll_amount(), None);
    }

    #[test]
    fn test_enemy_reflects_at_left_edge() {
        let mut enemy = Enemy::new(1.0, 100.0, -1.0);
        enemy.patrol();
        assert_eq!(enemy.direction, 1.0);
        assert_eq!(enemy.rect.left(), 0.0);

        enemy.patrol();
        assert!(enemy.rect.left() > 0.0);
    }

    #[test]
    fn test_enemy_reflects_at_right_edge() {
        let mut enemy = Enemy::new(SCREEN_WIDTH - ENEMY_WIDTH - 1.0, 100.0, 1.0);
        enemy.patrol();
        assert_eq!(enemy.direction, -1.0);
        assert_eq!(enemy.rect.right(), SCREEN_WIDTH);
    }

    #[test]
    fn test_platform_highlight() {
        assert_eq!(Platform::new(0.0, 0.0).highlight(), [60, 220, 60]);
        assert_eq!(Platform::start().highlight(), [70, 240, 70]);
    }

    #[test]
    fn test_game_over_keeps_first_cause() {
        let mut state = GameState::new(1);
        state.game_over(GameOverCause::Enemy);
        state.game_over(GameOverCause::Fell);
        assert_eq!(state.game_over_cause, Some(GameOverCause::Enemy));
        let events = state.take_events();
        assert_eq!(
            events,
            vec![GameEvent::GameOver {
                cause: GameOverCause::Enemy
            }]
        );
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_scroll_world_moves_everything_but_player() {
        let mut state = GameState::new(3);
        state.enemies.push(Enemy::new(50.0, 50.0, 1.0));
        state.coins.push(Coin::new(Vec2::new(80.0, 40.0)));
        let player_y = state.player.rect.top();
        let platform_y = state.platforms[0].rect.top();

        state.scroll_world(9.0);

        assert_eq!(state.platforms[0].rect.top(), platform_y + 9.0);
        assert_eq!(state.enemies[0].rect.top(), 59.0);
        assert_eq!(state.coins[0].center.y, 49.0);
        assert_eq!(state.player.rect.top(), player_y);
    }

    #[test]
    fn test_undrained_events_are_capped() {
        let mut state = GameState::new(4);
        for total in 1..=(MAX_PENDING_EVENTS as u32 + 10) {
            state.push_event(GameEvent::CoinCollected { total });
        }
        let events = state.take_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        assert_eq!(events.first(), Some(&GameEvent::CoinCollected { total: 11 }));
        assert_eq!(
            events.last(),
            Some(&GameEvent::CoinCollected {
                total: MAX_PENDING_EVENTS as u32 + 10
            })
        );
    }
}
