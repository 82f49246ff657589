use std::cmp::Ordering;
use std::fmt;

use itertools::Itertools;
use rand::Rng;
use rayon::prelude::*;
use serde::Serialize;

use crate::cards::{Card, Deck};
use crate::error::{LuckError, LuckResult};
use crate::hand_evaluator::{HandEval, RankedEval};

/// Evaluation bound for one showdown. Preflop all-ins complete the board
/// C(44,5) ways, far past the point where exhaustive enumeration pays off.
pub const DEFAULT_MAX_SAMPLES: usize = 10_000;

/// Win/tie probability over all completions of the board. Loss is implied.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EquityDistribution {
    pub win: f64,
    pub tie: f64,
}

impl EquityDistribution {
    pub fn lose(&self) -> f64 {
        1.0 - self.win - self.tie
    }

    pub fn equity(&self) -> f64 {
        self.win + self.tie / 2.0
    }
}

impl fmt::Display for EquityDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Win {:.1}% | Tie {:.1}% | Lose {:.1}% (equity: {:.1}%)",
            self.win * 100.0,
            self.tie * 100.0,
            self.lose() * 100.0,
            self.equity() * 100.0,
        )
    }
}

/// Estimates hero's equity against a single known opponent hand with the
/// default evaluator and a thread-local random source.
pub fn estimate_equity(
    hero: [Card; 2],
    opp: [Card; 2],
    board: &[Card],
    max_samples: usize,
) -> LuckResult<EquityDistribution> {
    estimate_equity_with(&RankedEval, hero, opp, board, max_samples, &mut rand::thread_rng())
}

/// Core estimator with an injected evaluator and random source. Exhaustive
/// when every board completion fits within `max_samples`; otherwise a
/// uniform sample of exactly `max_samples` distinct completions. Both modes
/// share one tally path. Sampled runs are reproducible given a seeded RNG:
/// all randomness is spent before evaluation fans out across threads.
pub fn estimate_equity_with<E, R>(
    eval: &E,
    hero: [Card; 2],
    opp: [Card; 2],
    board: &[Card],
    max_samples: usize,
    rng: &mut R,
) -> LuckResult<EquityDistribution>
where
    E: HandEval + Sync,
    R: Rng + ?Sized,
{
    if board.len() > 5 {
        return Err(LuckError::BoardTooLong(board.len()));
    }
    let missing = 5 - board.len();

    if missing == 0 {
        let hero_score = eval.evaluate(&hero, board)?;
        let opp_score = eval.evaluate(&opp, board)?;
        return Ok(match hero_score.cmp(&opp_score) {
            Ordering::Greater => EquityDistribution { win: 1.0, tie: 0.0 },
            Ordering::Equal => EquityDistribution { win: 0.0, tie: 1.0 },
            Ordering::Less => EquityDistribution { win: 0.0, tie: 0.0 },
        });
    }

    let mut dead: Vec<Card> = Vec::with_capacity(4 + board.len());
    dead.extend_from_slice(&hero);
    dead.extend_from_slice(&opp);
    dead.extend_from_slice(board);
    let remaining = Deck::new(&dead).cards;

    if missing > remaining.len() {
        return Err(LuckError::InsufficientCards {
            need: missing,
            available: remaining.len(),
        });
    }

    let mut runouts: Vec<Vec<Card>> = remaining.into_iter().combinations(missing).collect();
    if runouts.len() > max_samples {
        let picked = rand::seq::index::sample(rng, runouts.len(), max_samples);
        let sampled: Vec<Vec<Card>> = picked.into_iter().map(|i| runouts[i].clone()).collect();
        runouts = sampled;
    }

    let (wins, ties) = runouts
        .par_iter()
        .map(|runout| {
            let mut full_board = board.to_vec();
            full_board.extend_from_slice(runout);
            let hero_score = eval.evaluate(&hero, &full_board)?;
            let opp_score = eval.evaluate(&opp, &full_board)?;
            Ok::<(u64, u64), LuckError>(match hero_score.cmp(&opp_score) {
                Ordering::Greater => (1u64, 0u64),
                Ordering::Equal => (0, 1),
                Ordering::Less => (0, 0),
            })
        })
        .try_reduce(|| (0, 0), |a, b| Ok((a.0 + b.0, a.1 + b.1)))?;

    let total = runouts.len() as f64;
    Ok(EquityDistribution {
        win: wins as f64 / total,
        tie: ties as f64 / total,
    })
}
