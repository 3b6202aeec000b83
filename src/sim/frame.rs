//! Render snapshot
//!
//! Everything a render adapter needs for one frame: visible entities with
//! kind, position, size and color, plus the HUD values.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::particles::PARTICLE_COLOR;
use super::rect::Rect;
use super::state::{COIN_COLOR, ENEMY_COLOR, GameState};
use crate::Rgb;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Player tint
pub const PLAYER_COLOR: Rgb = [255, 255, 255];

/// What a draw item represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawKind {
    Player,
    Platform { highlight: Rgb },
    /// Upward-pointing spike
    Enemy,
    Coin,
    Particle { alpha: u8 },
}

/// One visible entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawItem {
    pub kind: DrawKind,
    /// Top-left corner in screen space
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Rgb,
}

impl DrawItem {
    fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A full frame, back to front
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frame {
    pub items: Vec<DrawItem>,
    pub score: u64,
    pub coins: u32,
    pub game_over: bool,
}

impl Frame {
    /// Snapshot the state; particles can be hidden without touching the sim
    pub fn capture(state: &GameState, show_particles: bool) -> Self {
        let mut items = Vec::with_capacity(
            state.platforms.len() + state.enemies.len() + state.coins.len() + 1,
        );

        items.extend(state.platforms.iter().map(|p| DrawItem {
            kind: DrawKind::Platform {
                highlight: p.highlight(),
            },
            pos: p.rect.pos,
            size: p.rect.size,
            color: p.color,
        }));
        items.extend(state.enemies.iter().map(|e| DrawItem {
            kind: DrawKind::Enemy,
            pos: e.rect.pos,
            size: e.rect.size,
            color: ENEMY_COLOR,
        }));
        items.extend(state.coins.iter().map(|c| {
            let rect = c.rect();
            DrawItem {
                kind: DrawKind::Coin,
                pos: rect.pos,
                size: rect.size,
                color: COIN_COLOR,
            }
        }));
        items.push(DrawItem {
            kind: DrawKind::Player,
            pos: state.player.rect.pos,
            size: state.player.rect.size,
            color: PLAYER_COLOR,
        });
        if show_particles {
            items.extend(state.player.particles.iter().map(|p| DrawItem {
                kind: DrawKind::Particle { alpha: p.alpha() },
                pos: p.pos - Vec2::splat(p.radius),
                size: Vec2::splat(p.radius * 2.0),
                color: PARTICLE_COLOR,
            }));
        }

        let screen = Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT);
        items.retain(|item| item.rect().overlaps(&screen));

        Self {
            items,
            score: state.player.score,
            coins: state.player.coins,
            game_over: state.is_game_over(),
        }
    }

    /// Items of one kind, ignoring per-item payload
    pub fn count(&self, kind: fn(&DrawKind) -> bool) -> usize {
        self.items.iter().filter(|item| kind(&item.kind)).count()
    }
}
