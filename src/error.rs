use crate::{MAX_SIZE, MIN_SIZE};

/// Why a move was refused by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMoveReason {
    #[error("outside the board")]
    OutOfRange,
    #[error("cell already occupied")]
    Occupied,
}

/// Errors produced by the board, the solver and the round controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The target cell is out of range or already taken. The caller should
    /// ignore the input and ask again.
    #[error("invalid move ({row}, {col}): {reason}")]
    InvalidMove {
        row: usize,
        col: usize,
        reason: InvalidMoveReason,
    },

    /// A search was requested on a full or already won board
    #[error("no legal move, the position is already terminal")]
    NoLegalMove,

    #[error("unsupported board size {0}, expected {min} to {max}", min = MIN_SIZE, max = MAX_SIZE)]
    UnsupportedSize(usize),

    #[error("the board can only be resized before the first move")]
    ResizeInProgress,

    #[error("the round is over, restart to keep playing")]
    GameOver,

    #[error("could not parse board: {0}")]
    Parse(String),
}
