use thiserror::Error;

#[derive(Error, Debug)]
pub enum LuckError {
    #[error("Invalid rank: {0}")]
    InvalidRank(char),

    #[error("Invalid suit: {0}")]
    InvalidSuit(char),

    #[error("Invalid card notation: {0}")]
    InvalidCardNotation(String),

    #[error("Invalid board notation: {0}")]
    InvalidBoardNotation(String),

    #[error("Need at least {need} cards, got {got}")]
    NotEnoughCards { need: usize, got: usize },

    #[error("Board needs {need} more cards, only {available} unseen")]
    InsufficientCards { need: usize, available: usize },

    #[error("Hole cards must be exactly 2 cards")]
    InvalidHoleSize,

    #[error("Board cannot exceed 5 cards, got {0}")]
    BoardTooLong(usize),

    #[error("Session stack scale is zero")]
    DegenerateSession,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type LuckResult<T> = Result<T, LuckError>;
