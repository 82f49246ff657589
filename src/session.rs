//! Per-file pipeline: parsed hands through equity and luck, folded into
//! purely additive session totals.

use rand::Rng;
use serde::Serialize;

use crate::equity::estimate_equity_with;
use crate::error::LuckResult;
use crate::hand_evaluator::RankedEval;
use crate::history::{parse_session, ShowdownRecord};
use crate::luck::hand_luck;
use crate::normalize::StackScale;

/// One analyzed showdown, ready for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct HandReport {
    pub hero: String,
    pub villain: String,
    pub board: String,
    pub final_stack: f64,
    pub collected: f64,
    pub total_pot: f64,
    pub equity: f64,
    pub luck: f64,
    pub buy_in: f64,
}

/// Everything one file contributes to the session.
#[derive(Debug, Clone, Serialize, Default)]
pub struct FileOutcome {
    pub total_luck: f64,
    /// Buy-in of the first eligible hand: the file's representative stake,
    /// not a sum across hands.
    pub buy_in: f64,
    pub hands: Vec<HandReport>,
    pub skipped: usize,
}

/// Runs the full pipeline for one file's hand-history text. Record-level
/// failures skip that showdown and count it; they never abort the file.
pub fn analyze_hands<R: Rng + ?Sized>(
    text: &str,
    max_samples: usize,
    rng: &mut R,
) -> LuckResult<FileOutcome> {
    let parsed = parse_session(text)?;
    let scale = StackScale::new(parsed.scale_chips)?;

    let mut outcome = FileOutcome {
        skipped: parsed.skipped,
        ..FileOutcome::default()
    };

    for record in &parsed.records {
        match analyze_one(record, &scale, max_samples, rng) {
            Ok(report) => {
                if outcome.hands.is_empty() {
                    outcome.buy_in = report.buy_in;
                }
                outcome.total_luck += report.luck;
                outcome.hands.push(report);
            }
            Err(_) => outcome.skipped += 1,
        }
    }

    Ok(outcome)
}

fn analyze_one<R: Rng + ?Sized>(
    record: &ShowdownRecord,
    scale: &StackScale,
    max_samples: usize,
    rng: &mut R,
) -> LuckResult<HandReport> {
    let dist = estimate_equity_with(
        &RankedEval,
        record.hero_hole,
        record.opp_hole,
        &record.board,
        max_samples,
        rng,
    )?;
    let normalized = scale.normalize(record);
    let result = hand_luck(&normalized, &dist, record.buy_in);

    Ok(HandReport {
        hero: cards_str(&record.hero_hole),
        villain: cards_str(&record.opp_hole),
        board: cards_str(&record.board),
        final_stack: normalized.final_stack,
        collected: normalized.collected,
        total_pot: normalized.total_pot,
        equity: result.equity,
        luck: result.luck,
        buy_in: result.buy_in,
    })
}

fn cards_str(cards: &[crate::cards::Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Running totals across files. Purely additive and order-independent:
/// merging two halves equals folding the whole.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SessionTotals {
    pub luck: f64,
    pub buy_in: f64,
}

impl SessionTotals {
    pub fn add(&mut self, outcome: &FileOutcome) {
        self.luck += outcome.total_luck;
        self.buy_in += outcome.buy_in;
    }

    pub fn merge(&mut self, other: SessionTotals) {
        self.luck += other.luck;
        self.buy_in += other.buy_in;
    }
}
