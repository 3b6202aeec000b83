//! Leap and Avoid - a single-screen vertical platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, scrolling, spawning, collisions)
//! - `renderer`: WebGPU render adapter that draws a `sim::Frame`
//! - `settings`: Player preferences
//! - `headless`: Windowless runner driven by the autopilot

pub mod headless;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
///
/// Units are screen pixels and simulation ticks.
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Player climbing above this line scrolls the world down
    pub const SCROLL_LINE: f32 = SCREEN_HEIGHT / 3.0;

    /// Player physics (per tick)
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_STRENGTH: f32 = -13.0;
    pub const MOVE_SPEED: f32 = 5.0;
    pub const PLAYER_RADIUS: f32 = 12.0;

    /// Platform defaults
    pub const PLATFORM_WIDTH: f32 = 100.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const START_PLATFORM_WIDTH: f32 = 200.0;
    /// Vertical gap between the starting platforms
    pub const START_PLATFORM_SPACING: f32 = 100.0;
    /// Number of regular platforms stacked above the start platform
    pub const START_PLATFORM_COUNT: usize = 5;
    /// Live platform floor restored every tick
    pub const MIN_PLATFORMS: usize = 6;

    /// Landing tolerance below a platform's bottom edge
    pub const LAND_TOLERANCE: f32 = 15.0;
    /// How far the player is nudged down when testing for ground before a jump
    pub const JUMP_PROBE: f32 = 2.0;

    /// Hazards and rewards only spawn after this much session time
    pub const WARMUP_MS: f64 = 2000.0;
    pub const ENEMY_CHANCE: f64 = 0.2;
    pub const COIN_CHANCE: f64 = 0.3;

    /// Spike enemy
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 20.0;
    pub const ENEMY_SPEED: f32 = 1.5;

    /// Coin
    pub const COIN_SIZE: f32 = 20.0;

    /// Jump particles
    pub const JUMP_PARTICLES: usize = 8;
    pub const PARTICLE_LIFE: i32 = 20;
    pub const PARTICLE_GRAVITY: f32 = 0.1;
}

/// RGB color with 8-bit channels
pub type Rgb = [u8; 3];

/// Lighter variant of a color used for platform highlights
#[inline]
pub fn lighten(color: Rgb) -> Rgb {
    [
        color[0].saturating_add(30),
        color[1].saturating_add(40),
        color[2].saturating_add(30),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lighten_clamps() {
        assert_eq!(lighten([30, 180, 30]), [60, 220, 60]);
        assert_eq!(lighten([240, 230, 250]), [255, 255, 255]);
    }
}
