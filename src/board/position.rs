//! Immutable game position: the grid plus the player to move

use std::fmt;

use super::{Mark, MAX_CELLS, MAX_SIZE, MIN_SIZE};
use crate::error::{EngineError, Result};

/// Snapshot of an N x N grid (row-major) and whose turn it is.
///
/// Positions never change after construction. [`Position::play`] returns a
/// new position, so a search can hold any number of them side by side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    cells: Vec<Mark>,
    to_move: Mark,
    size: usize,
}

impl Position {
    /// Build a position from row-major cells.
    ///
    /// # Errors
    ///
    /// * [`EngineError::InvalidLength`] if the cell count is not a perfect square
    /// * [`EngineError::UnsupportedSize`] if the side is outside 3..=9
    /// * [`EngineError::InvalidTurn`] if `to_move` is [`Mark::Empty`]
    pub fn new(cells: Vec<Mark>, to_move: Mark) -> Result<Self> {
        let len = cells.len();
        let size = len.isqrt();
        if size * size != len {
            return Err(EngineError::InvalidLength { len });
        }
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(EngineError::UnsupportedSize { size });
        }
        if to_move == Mark::Empty {
            return Err(EngineError::InvalidTurn);
        }
        Ok(Self {
            cells,
            to_move,
            size,
        })
    }

    /// Empty `size` x `size` board.
    pub fn empty(size: usize, to_move: Mark) -> Result<Self> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(EngineError::UnsupportedSize { size });
        }
        Self::new(vec![Mark::Empty; size * size], to_move)
    }

    /// Parse a board string such as `"XX.OO...."`. Whitespace is ignored.
    pub fn parse(board: &str, to_move: Mark) -> Result<Self> {
        let cells = parse_cells(board)?;
        Self::new(cells, to_move)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Marks needed in a line to win; always the full side length.
    #[inline]
    pub fn win_length(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    #[inline]
    pub fn opponent(&self) -> Mark {
        self.to_move.opponent()
    }

    #[inline]
    pub fn cells(&self) -> &[Mark] {
        &self.cells
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Mark at `index`, or `None` past the end of the board.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    #[inline]
    pub fn is_empty_cell(&self, index: usize) -> bool {
        self.get(index) == Some(Mark::Empty)
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&m| m == Mark::Empty).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&m| m != Mark::Empty)
    }

    /// Empty cell indices in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &m)| m == Mark::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    #[inline]
    pub fn row_col(&self, index: usize) -> (usize, usize) {
        (index / self.size, index % self.size)
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Place the mover's mark at `index` and pass the turn.
    ///
    /// # Errors
    ///
    /// [`EngineError::CellOutOfRange`] or [`EngineError::CellOccupied`].
    pub fn play(&self, index: usize) -> Result<Position> {
        match self.cells.get(index) {
            None => Err(EngineError::CellOutOfRange {
                index,
                cells: self.cells.len(),
            }),
            Some(Mark::Empty) => Ok(self.play_unchecked(index)),
            Some(_) => Err(EngineError::CellOccupied { index }),
        }
    }

    /// `play` for callers that already know `index` is an empty cell.
    pub(crate) fn play_unchecked(&self, index: usize) -> Position {
        debug_assert!(self.is_empty_cell(index));
        let mut cells = self.cells.clone();
        cells[index] = self.to_move;
        Position {
            cells,
            to_move: self.to_move.opponent(),
            size: self.size,
        }
    }

    /// Same grid, different player to move.
    pub fn with_to_move(&self, to_move: Mark) -> Result<Position> {
        if to_move == Mark::Empty {
            return Err(EngineError::InvalidTurn);
        }
        Ok(Position {
            cells: self.cells.clone(),
            to_move,
            size: self.size,
        })
    }
}

impl std::str::FromStr for Position {
    type Err = EngineError;

    /// Parse with the mover implied by mark counts.
    fn from_str(s: &str) -> Result<Self> {
        let cells = parse_cells(s)?;
        let to_move = Mark::implied_to_move(&cells);
        Self::new(cells, to_move)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(self.size).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for &mark in chunk {
                write!(f, "{}", mark.to_char())?;
            }
        }
        Ok(())
    }
}

fn parse_cells(board: &str) -> Result<Vec<Mark>> {
    let mut cells = Vec::with_capacity(MAX_CELLS);
    for ch in board.chars().filter(|c| !c.is_whitespace()) {
        cells.push(Mark::from_char(ch).ok_or(EngineError::InvalidMark { ch })?);
    }
    Ok(cells)
}
