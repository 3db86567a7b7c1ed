//! Evaluation module for line-game positions
//!
//! Line-ownership scoring with a small bonus for the center.

pub mod heuristic;
pub mod patterns;

pub use heuristic::{center_cells, corner_cells, evaluate};
pub use patterns::{line_weight, CENTER_BONUS, WIN_SCORE};
