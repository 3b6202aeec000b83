//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Physics constants are per tick; the host calls `tick` at a fixed rate
//! - Seeded RNG only
//! - Entities are processed kind by kind in a fixed order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod frame;
pub mod particles;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Landing, collect_coins, is_grounded, resolve_landing, touches_enemy};
pub use frame::{DrawItem, DrawKind, Frame};
pub use particles::Particle;
pub use rect::Rect;
pub use spawn::{replenish, reset_layout, spawn_platform};
pub use state::{Coin, Enemy, GameEvent, GameOverCause, GamePhase, GameState, Platform, Player};
pub use tick::{TickInput, tick, try_jump};
