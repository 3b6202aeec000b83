//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session by one step. Physics constants
//! are per tick; `dt` only drives the session clock.

use super::autopilot;
use super::collision;
use super::particles;
use super::spawn;
use super::state::{GameEvent, GameOverCause, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Jump (one-shot)
    pub jump: bool,
    /// Restart after game over (one-shot)
    pub restart: bool,
    /// Quit request, acted on by the host
    pub quit: bool,
    /// Idle/demo mode - autopilot plays the game
    pub autopilot: bool,
}

impl TickInput {
    /// Net horizontal movement for this tick; both keys cancel out
    pub fn horizontal_delta(&self) -> f32 {
        let mut dx = 0.0;
        if self.left {
            dx -= MOVE_SPEED;
        }
        if self.right {
            dx += MOVE_SPEED;
        }
        dx
    }
}

/// Jump if the player is standing on (or just above) a platform
///
/// Returns whether the jump happened. Ignored outside `Playing`.
pub fn try_jump(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    if !collision::is_grounded(&state.player.rect, &state.platforms) {
        return false;
    }

    state.player.vel_y = JUMP_STRENGTH;
    let origin = state.player.rect.bottom_center();
    particles::emit_jump_burst(&mut state.player.particles, origin, &mut state.rng);
    state.push_event(GameEvent::Jumped);
    log::debug!("Jump from y={}", origin.y);
    true
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Idle/demo mode replaces movement and jump, keeps the host's other flags
    let mut input = input.clone();
    if input.autopilot && state.phase == GamePhase::Playing {
        let ai = autopilot::decide(state);
        input.left = ai.left;
        input.right = ai.right;
        input.jump = ai.jump;
    }
    let input = &input;

    match state.phase {
        GamePhase::GameOver => {
            if input.restart {
                state.restart();
            }
            return;
        }
        GamePhase::Playing => {
            if input.jump {
                try_jump(state);
            }
        }
    }

    state.time_ticks += 1;
    state.elapsed_ms += f64::from(dt) * 1000.0;

    update_player(state, input);
    update_world(state);

    // Landing
    let landing = collision::resolve_landing(&mut state.player, &state.platforms);
    if let Some(landing) = landing {
        if !state.player.on_platform {
            state.push_event(GameEvent::Landed {
                platform_top: landing.platform_top,
            });
        }
    }
    state.player.on_platform = landing.is_some();

    // Spikes
    if collision::touches_enemy(&state.player.rect, &state.enemies) {
        state.game_over(GameOverCause::Enemy);
    }

    // Coins
    let collected = collision::collect_coins(&state.player.rect, &mut state.coins);
    for _ in 0..collected {
        state.player.coins += 1;
        let total = state.player.coins;
        state.push_event(GameEvent::CoinCollected { total });
        log::debug!("Coin collected ({} total)", total);
    }

    spawn::replenish(state);
}

/// Gravity, movement, wrap, scroll, particles and the fall check
fn update_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    player.apply_gravity();
    player.integrate(input.horizontal_delta());
    player.wrap();

    if let Some(amount) = player.scroll_amount() {
        player.score += amount as u64;
        state.scroll_world(amount);
    }

    particles::update_particles(&mut state.player.particles);

    if state.player.fell_off_screen() {
        state.game_over(GameOverCause::Fell);
    }
}

/// Move and cull platforms, enemies and coins
///
/// Each platform that drops below the screen is replaced by exactly one new
/// platform, spawned after the existing entities have been updated.
fn update_world(state: &mut GameState) {
    let before = state.platforms.len();
    state.platforms.retain(|p| !p.is_below_screen());
    let destroyed = before - state.platforms.len();

    for enemy in &mut state.enemies {
        enemy.patrol();
    }
    state.enemies.retain(|e| !e.is_below_screen());
    state.coins.retain(|c| !c.is_below_screen());

    for _ in 0..destroyed {
        spawn::spawn_platform(state);
    }
}
