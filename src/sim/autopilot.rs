//! Idle/demo controller
//!
//! Produces the input a simple player would give: jump whenever grounded and
//! steer under the nearest platform worth reaching.

use super::collision::is_grounded;
use super::state::{GameState, Platform};
use super::tick::TickInput;

/// Horizontal distance treated as "close enough"
const STEER_DEADZONE: f32 = 4.0;

/// Pick the platform to steer toward
///
/// Rising or grounded: the closest platform above the player's feet.
/// Falling: the closest platform still below the player's feet.
fn target_platform(state: &GameState, grounded: bool) -> Option<&Platform> {
    let player = &state.player;
    let feet = player.rect.bottom();

    if grounded || player.vel_y < 0.0 {
        state
            .platforms
            .iter()
            .filter(|p| p.rect.bottom() < feet)
            .max_by(|a, b| a.rect.top().total_cmp(&b.rect.top()))
    } else {
        state
            .platforms
            .iter()
            .filter(|p| p.rect.top() >= feet)
            .min_by(|a, b| a.rect.top().total_cmp(&b.rect.top()))
    }
}

/// Decide this tick's input from the current state
pub fn decide(state: &GameState) -> TickInput {
    let grounded = is_grounded(&state.player.rect, &state.platforms);
    let mut input = TickInput {
        jump: grounded,
        ..Default::default()
    };

    if let Some(target) = target_platform(state, grounded) {
        let dx = target.rect.center().x - state.player.rect.center().x;
        input.right = dx > STEER_DEADZONE;
        input.left = dx < -STEER_DEADZONE;
    }

    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Platform;

    #[test]
    fn test_jumps_when_grounded() {
        let state = GameState::new(21);
        let input = decide(&state);
        assert!(input.jump);
        assert!(!input.restart);
    }

    #[test]
    fn test_steers_toward_platform_above() {
        let mut state = GameState::new(22);
        state.platforms.truncate(1);
        state.platforms.push(Platform::new(0.0, 480.0));
        let input = decide(&state);
        assert!(input.left);
        assert!(!input.right);
    }

    #[test]
    fn test_steers_toward_platform_below_when_falling() {
        let mut state = GameState::new(23);
        state.platforms.clear();
        state.platforms.push(Platform::new(300.0, 500.0));
        state.player.rect.pos.y = 300.0;
        state.player.vel_y = 2.0;
        let input = decide(&state);
        assert!(!input.jump);
        assert!(input.right);
    }
}
