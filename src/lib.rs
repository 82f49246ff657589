pub mod batch;
pub mod cards;
pub mod cli;
pub mod display;
pub mod equity;
pub mod error;
pub mod hand_evaluator;
pub mod history;
pub mod luck;
pub mod normalize;
pub mod session;
