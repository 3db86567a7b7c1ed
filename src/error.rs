//! Error types for the engine boundary
//!
//! Only malformed input is an error. A position without legal moves is
//! reported as `None` by the move-selection entry points.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("board has {len} cells, which is not a perfect square")]
    InvalidLength { len: usize },

    #[error("board size {size}x{size} is outside the supported range 3..=9")]
    UnsupportedSize { size: usize },

    #[error("invalid board character {ch:?}")]
    InvalidMark { ch: char },

    #[error("player to move must be X or O")]
    InvalidTurn,

    #[error("cell {index} is outside a board of {cells} cells")]
    CellOutOfRange { index: usize, cells: usize },

    #[error("cell {index} is already occupied")]
    CellOccupied { index: usize },

    #[error("invalid engine configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
