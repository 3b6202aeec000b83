//! Procedural platform generation
//!
//! Platforms appear just above the visible top edge. Once the warm-up has
//! passed, each new platform may also carry a spike and/or a coin.

use glam::Vec2;
use rand::Rng;

use super::state::{Coin, Enemy, GameEvent, GameState, Platform};
use crate::consts::*;

/// Spawn one platform above the screen, possibly with an enemy and a coin
pub fn spawn_platform(state: &mut GameState) {
    let x = state.rng.random_range(0..=(SCREEN_WIDTH - PLATFORM_WIDTH) as i32) as f32;
    let y = state.rng.random_range(-50..=0) as f32;
    state.platforms.push(Platform::new(x, y));

    let mut has_enemy = false;
    let mut has_coin = false;
    if state.warmed_up() {
        // Independent rolls: a platform may get both, either or neither
        if state.rng.random_bool(ENEMY_CHANCE) {
            let direction = if state.rng.random_bool(0.5) { 1.0 } else { -1.0 };
            state.enemies.push(Enemy::new(x + 20.0, y - 20.0, direction));
            has_enemy = true;
        }
        if state.rng.random_bool(COIN_CHANCE) {
            let offset = state.rng.random_range(10..=(PLATFORM_WIDTH as i32 - 10)) as f32;
            state.coins.push(Coin::new(Vec2::new(x + offset, y - 30.0)));
            has_coin = true;
        }
    }

    log::debug!(
        "Spawned platform at ({}, {}) enemy={} coin={}",
        x,
        y,
        has_enemy,
        has_coin
    );
    state.push_event(GameEvent::PlatformSpawned {
        pos: Vec2::new(x, y),
        enemy: has_enemy,
        coin: has_coin,
    });
}

/// Spawn platforms until the live count is back at the minimum
pub fn replenish(state: &mut GameState) {
    while state.platforms.len() < MIN_PLATFORMS {
        spawn_platform(state);
    }
}

/// Starting layout: the wide start platform plus a column of regular
/// platforms at fixed spacing with random horizontal positions
pub fn reset_layout(state: &mut GameState) {
    state.platforms.clear();
    state.enemies.clear();
    state.coins.clear();

    let start = Platform::start();
    let base_y = start.rect.top();
    state.platforms.push(start);

    for i in 0..START_PLATFORM_COUNT {
        let x = state.rng.random_range(0..=(SCREEN_WIDTH - PLATFORM_WIDTH) as i32) as f32;
        let y = base_y - (i + 1) as f32 * START_PLATFORM_SPACING;
        state.platforms.push(Platform::new(x, y));
    }

    log::info!("Starting layout generated (seed {})", state.seed);
}
