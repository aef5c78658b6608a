//! Errors raised at the edges of the engine.
//!
//! The search itself never fails; every abnormal search condition maps to a
//! value. `EngineError` only covers decoding caller input and writing the
//! diagnostic log.

use thiserror::Error;

use crate::game_state::draughts_types::Square;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A board square held a code outside `0..=4`.
    #[error("invalid piece code {code} on square {square}")]
    InvalidPieceCode { square: Square, code: i32 },

    #[error("board must hold 64 squares, got {0}")]
    InvalidBoardLength(usize),

    /// Board text could not be parsed.
    #[error("invalid board text on line {line}: {reason}")]
    InvalidBoardText { line: usize, reason: String },

    #[error("null pointer passed for {0}")]
    NullPointer(&'static str),

    #[error("diagnostic log write failed: {0}")]
    LogIo(#[from] std::io::Error),
}
