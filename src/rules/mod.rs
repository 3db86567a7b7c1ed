//! Game rules for N x N line games
//!
//! A player wins by filling a whole row, column, or long diagonal. The game
//! is drawn as soon as no line can be completed by either player.

pub mod win;

// Re-exports for convenient access
pub use win::{
    find_winner, is_draw, is_line_achievable, status, winner, winning_lines, GameStatus, WinLine,
};
