//! Chip normalization: divides every chip amount in a showdown by a single
//! per-file scale so results compare across tournaments of different sizes.

use crate::error::{LuckError, LuckResult};
use crate::history::ShowdownRecord;

/// The per-file divisor: hero's last observed stack in the session. A proxy
/// for the tournament's chip scale, not the true starting stack.
#[derive(Debug, Clone, Copy)]
pub struct StackScale(f64);

impl StackScale {
    pub fn new(chips: u64) -> LuckResult<StackScale> {
        if chips == 0 {
            return Err(LuckError::DegenerateSession);
        }
        Ok(StackScale(chips as f64))
    }

    pub fn factor(&self) -> f64 {
        self.0
    }

    pub fn normalize(&self, record: &ShowdownRecord) -> NormalizedShowdown {
        NormalizedShowdown {
            start_stack: record.start_stack as f64 / self.0,
            final_stack: record.final_stack as f64 / self.0,
            collected: record.collected as f64 / self.0,
            total_pot: record.total_pot as f64 / self.0,
        }
    }
}

/// A showdown's chip amounts in tournament-relative units.
#[derive(Debug, Clone, Copy)]
pub struct NormalizedShowdown {
    pub start_stack: f64,
    pub final_stack: f64,
    pub collected: f64,
    pub total_pot: f64,
}
