//! Move-selection engine for N x N line games
//!
//! Boards range from 3x3 to 9x9. A player wins by filling an entire row,
//! column, or one of the two long diagonals; the game is drawn as soon as
//! neither player can complete any line.
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Position representation and parsing
//! - [`rules`]: Win lines, winner and early-draw detection
//! - [`eval`]: Static position evaluation
//! - [`search`]: Zobrist hashing, transposition table, move ordering,
//!   alpha-beta with iterative deepening and the parallel root search
//! - [`policy`]: Easy and medium difficulty tiers
//! - [`config`]: Engine tunables, loadable from TOML
//! - [`engine`]: Main AI engine integrating all components
//!
//! # Quick Start
//!
//! ```
//! use tictac::{AIEngine, Difficulty, Mark, Position};
//!
//! let engine = AIEngine::new();
//! let mut position = Position::empty(3, Mark::X).unwrap();
//!
//! if let Some(cell) = engine.choose_move(&position, Difficulty::Hard) {
//!     position = position.play(cell).unwrap();
//!     let (row, col) = position.row_col(cell);
//!     println!("AI plays at ({row}, {col})");
//! }
//! ```
//!
//! # Search Priority
//!
//! The hard tier tries, in order:
//! 1. A pluggable [`MoveAdvisor`], when one is installed
//! 2. Parallel root search (boards of side 5 and up)
//! 3. Iterative-deepening alpha-beta under a time budget
//! 4. The first legal move
//!
//! A 3x3 board is instead searched exhaustively and is never lost.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod policy;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Mark, Position, MAX_SIZE, MIN_SIZE};
pub use config::{EngineConfig, MediumConfig};
pub use engine::{AIEngine, MoveAdvisor, MoveResult, MoveSource, Strategy, HARD_STRATEGY_CHAIN};
pub use error::{EngineError, Result};
pub use policy::Difficulty;
pub use rules::GameStatus;
