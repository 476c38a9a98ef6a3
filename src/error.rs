//! Error types raised by the game rules.

use thiserror::Error;

/// Why a move was rejected by [`GameRules::apply_move`](crate::GameRules::apply_move)
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    #[error("cell already occupied")]
    Occupied,

    #[error("move captures no pieces")]
    NoCapture,

    #[error("consecutive moves by the same player are not allowed")]
    ConsecutiveMove,

    #[error("coordinates are outside the board")]
    OutOfBounds,

    #[error("board is full")]
    BoardFull,
}

/// Errors produced by the game rules and board parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move at {row},{col}: {reason}")]
    IllegalMove {
        row: usize,
        col: usize,
        reason: IllegalReason,
    },

    #[error("invalid board: {0}")]
    InvalidBoard(String),
}

impl GameError {
    pub(crate) fn illegal(row: usize, col: usize, reason: IllegalReason) -> Self {
        GameError::IllegalMove { row, col, reason }
    }

    /// Returns the rejection reason if this is an illegal-move error
    pub fn illegal_reason(&self) -> Option<IllegalReason> {
        match self {
            GameError::IllegalMove { reason, .. } => Some(*reason),
            GameError::InvalidBoard(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = GameError::illegal(1, 2, IllegalReason::Occupied);
        assert_eq!(err.to_string(), "illegal move at 1,2: cell already occupied");
        assert_eq!(err.illegal_reason(), Some(IllegalReason::Occupied));

        let err = GameError::InvalidBoard("expected 3 rows".to_string());
        assert_eq!(err.illegal_reason(), None);
    }
}
