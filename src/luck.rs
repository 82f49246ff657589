//! Luck: realized utility minus the utility implied by all-in equity.

use serde::Serialize;

use crate::equity::EquityDistribution;
use crate::normalize::NormalizedShowdown;

/// Buy-in-weighted utility of a stack size: `buy_in * |stack|^0.9`.
/// Sub-linear so a doubled stack is worth less than twice as much, scaled by
/// the stake so tournaments of different buy-ins are comparable. The
/// absolute value discards the sign of negative stacks; direction is
/// recovered only through the subtraction in [`hand_luck`]. That quirk is
/// part of the transform's contract and is kept as-is.
pub fn adjusted_value(buy_in: f64, stack: f64) -> f64 {
    buy_in * stack.abs().powf(0.9)
}

/// Luck for one showdown, with the inputs carried through for aggregation
/// and reporting.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HandLuck {
    pub luck: f64,
    pub buy_in: f64,
    pub equity: f64,
}

/// Realized utility minus the equity-weighted utility of the three ways the
/// board could have run out: as if the hand were settled by pure chance at
/// the showdown moment with no further betting.
pub fn hand_luck(
    outcome: &NormalizedShowdown,
    dist: &EquityDistribution,
    buy_in: f64,
) -> HandLuck {
    let base = outcome.final_stack - outcome.collected;
    let win_value = adjusted_value(buy_in, base + outcome.total_pot);
    let tie_value = adjusted_value(buy_in, base + outcome.total_pot / 2.0);
    let lose_value = adjusted_value(buy_in, base);

    let all_in_ev = win_value * dist.win + tie_value * dist.tie + lose_value * dist.lose();
    let real_value = adjusted_value(buy_in, outcome.final_stack);

    HandLuck {
        luck: real_value - all_in_ev,
        buy_in,
        equity: dist.equity(),
    }
}
