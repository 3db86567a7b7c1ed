//! Board representation for N x N line games

pub mod position;

#[cfg(test)]
mod tests;

// Re-exports
pub use position::Position;

/// Smallest supported board side (3x3)
pub const MIN_SIZE: usize = 3;
/// Largest supported board side (9x9)
pub const MAX_SIZE: usize = 9;
pub const MIN_CELLS: usize = MIN_SIZE * MIN_SIZE; // 9
pub const MAX_CELLS: usize = MAX_SIZE * MAX_SIZE; // 81

/// Cell contents, also used to name the players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    /// Get opponent mark
    #[inline]
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
            Mark::Empty => Mark::Empty,
        }
    }

    /// Parse a single board character. `.`, `-` and `_` are empty cells.
    pub fn from_char(ch: char) -> Option<Mark> {
        match ch {
            'X' | 'x' => Some(Mark::X),
            'O' | 'o' => Some(Mark::O),
            '.' | '-' | '_' => Some(Mark::Empty),
            _ => None,
        }
    }

    #[inline]
    pub fn to_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
            Mark::Empty => '.',
        }
    }

    /// Player to move implied by mark counts: X opens, so X moves whenever
    /// both players have placed the same number of marks.
    pub fn implied_to_move(cells: &[Mark]) -> Mark {
        let x = cells.iter().filter(|&&m| m == Mark::X).count();
        let o = cells.iter().filter(|&&m| m == Mark::O).count();
        if x > o {
            Mark::O
        } else {
            Mark::X
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
