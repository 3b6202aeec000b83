//! Headless session runner
//!
//! Drives the simulation at its fixed rate without a window, with the
//! autopilot providing input. Each game over is recorded and followed by a
//! restart until the tick budget is spent.

use serde::Serialize;

use crate::consts::SIM_DT;
use crate::sim::{GameEvent, GameOverCause, GameState, TickInput, tick};

/// Outcome of one session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRecord {
    pub score: u64,
    pub coins: u32,
    /// Ticks survived
    pub ticks: u64,
    /// `None` when the tick budget ran out mid-session
    pub cause: Option<GameOverCause>,
}

impl RunRecord {
    fn from_state(state: &GameState) -> Self {
        Self {
            score: state.player.score,
            coins: state.player.coins,
            ticks: state.time_ticks,
            cause: state.game_over_cause,
        }
    }
}

/// Everything a headless run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub seed: u64,
    pub total_ticks: u64,
    pub runs: Vec<RunRecord>,
}

impl Summary {
    pub fn best_score(&self) -> u64 {
        self.runs.iter().map(|r| r.score).max().unwrap_or(0)
    }

    pub fn total_coins(&self) -> u32 {
        self.runs.iter().map(|r| r.coins).sum()
    }
}

/// Play `max_ticks` ticks from `seed`
pub fn run(seed: u64, max_ticks: u64) -> Summary {
    let mut state = GameState::new(seed);
    let mut runs = Vec::new();
    let mut input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    for _ in 0..max_ticks {
        input.restart = state.is_game_over();
        tick(&mut state, &input, SIM_DT);

        for event in state.take_events() {
            match event {
                GameEvent::GameOver { .. } => runs.push(RunRecord::from_state(&state)),
                other => log::trace!("{:?}", other),
            }
        }
    }

    if !state.is_game_over() {
        runs.push(RunRecord::from_state(&state));
    }

    let summary = Summary {
        seed,
        total_ticks: max_ticks,
        runs,
    };
    log::info!(
        "Headless run finished: {} session(s), best score {}, {} coin(s)",
        summary.runs.len(),
        summary.best_score(),
        summary.total_coins()
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_is_deterministic() {
        let a = run(2024, 1200);
        let b = run(2024, 1200);
        assert_eq!(a, b);
        assert!(!a.runs.is_empty());
    }

    #[test]
    fn test_every_finished_session_has_a_cause() {
        let summary = run(77, 3000);
        let (last, finished) = summary.runs.split_last().unwrap();
        assert!(finished.iter().all(|r| r.cause.is_some()));
        assert!(last.ticks <= 3000);
    }

    #[test]
    fn test_zero_budget() {
        let summary = run(1, 0);
        assert_eq!(summary.runs.len(), 1);
        assert_eq!(summary.runs[0].ticks, 0);
        assert_eq!(summary.best_score(), 0);
        assert_eq!(summary.total_coins(), 0);
    }

    #[test]
    fn test_summary_totals_span_all_runs() {
        let summary = Summary {
            seed: 0,
            total_ticks: 0,
            runs: vec![
                RunRecord { score: 40, coins: 2, ticks: 100, cause: Some(GameOverCause::Fell) },
                RunRecord { score: 90, coins: 1, ticks: 300, cause: Some(GameOverCause::Enemy) },
                RunRecord { score: 10, coins: 0, ticks: 20, cause: None },
            ],
        };
        assert_eq!(summary.best_score(), 90);
        assert_eq!(summary.total_coins(), 3);
    }
}
