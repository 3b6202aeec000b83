//! Property tests for the simulation invariants

use leap_and_avoid::consts::*;
use leap_and_avoid::sim::{Enemy, GamePhase, GameState, Player, TickInput, spawn_platform, tick};
use proptest::prelude::*;

fn arb_input() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, jump)| TickInput {
        left,
        right,
        jump,
        ..Default::default()
    })
}

proptest! {
    #[test]
    fn wrap_right_lands_on_left_edge(x in (SCREEN_WIDTH - PLAYER_RADIUS * 2.0 + 0.01)..800.0f32) {
        let mut player = Player::default();
        player.rect.pos.x = x;
        player.wrap();
        prop_assert_eq!(player.rect.left(), 0.0);
    }

    #[test]
    fn wrap_left_lands_on_right_edge(x in -400.0f32..-0.01) {
        let mut player = Player::default();
        player.rect.pos.x = x;
        player.wrap();
        prop_assert_eq!(player.rect.right(), SCREEN_WIDTH);
    }

    #[test]
    fn enemies_stay_on_screen(
        x in 0.0f32..=(SCREEN_WIDTH - ENEMY_WIDTH),
        right in any::<bool>(),
        steps in 1usize..600,
    ) {
        let mut enemy = Enemy::new(x, 100.0, if right { 1.0 } else { -1.0 });
        for _ in 0..steps {
            enemy.patrol();
            prop_assert!(enemy.rect.left() >= 0.0);
            prop_assert!(enemy.rect.right() <= SCREEN_WIDTH);
        }
    }

    #[test]
    fn nothing_attached_during_warmup(seed in any::<u64>(), elapsed in 0.0f64..=WARMUP_MS) {
        let mut state = GameState::new(seed);
        state.elapsed_ms = elapsed;
        for _ in 0..100 {
            spawn_platform(&mut state);
        }
        prop_assert!(state.enemies.is_empty());
        prop_assert!(state.coins.is_empty());
    }

    #[test]
    fn session_invariants_hold(
        seed in any::<u64>(),
        inputs in prop::collection::vec(arb_input(), 1..400),
    ) {
        let mut state = GameState::new(seed);
        let mut score = 0;
        let mut coins = 0;

        for input in &inputs {
            let was_playing = state.phase == GamePhase::Playing;
            tick(&mut state, input, SIM_DT);

            prop_assert!(state.player.score >= score);
            prop_assert!(state.player.coins >= coins);
            score = state.player.score;
            coins = state.player.coins;

            if was_playing {
                prop_assert!(state.platforms.len() >= MIN_PLATFORMS);
            }
        }
    }
}
