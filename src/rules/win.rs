//! Terminal detection: wins and early (unavoidable) draws
//!
//! A line is a full row, a full column, or one of the two long diagonals.
//! Every line has exactly `size` cells, so a win always fills a whole line.

use std::sync::OnceLock;

use crate::board::{Mark, Position, MAX_SIZE, MIN_SIZE};

/// A completed line and the player who owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinLine {
    pub player: Mark,
    pub cells: Vec<usize>,
}

/// Outcome of a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Won(WinLine),
    Draw,
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// All winning lines for a `size` x `size` board.
///
/// Built once per process for every supported size and shared read-only.
///
/// # Panics
///
/// Panics if `size` is outside 3..=9; [`Position`] never carries such a size.
pub fn winning_lines(size: usize) -> &'static [Vec<usize>] {
    static LINES: OnceLock<Vec<Vec<Vec<usize>>>> = OnceLock::new();
    let all = LINES.get_or_init(|| (0..=MAX_SIZE).map(build_lines).collect());
    assert!((MIN_SIZE..=MAX_SIZE).contains(&size), "unsupported size {size}");
    &all[size]
}

fn build_lines(size: usize) -> Vec<Vec<usize>> {
    if size < MIN_SIZE {
        return Vec::new();
    }
    let mut lines = Vec::with_capacity(2 * size + 2);
    for r in 0..size {
        lines.push((0..size).map(|c| r * size + c).collect());
    }
    for c in 0..size {
        lines.push((0..size).map(|r| r * size + c).collect());
    }
    lines.push((0..size).map(|i| i * size + i).collect());
    lines.push((0..size).map(|i| i * size + (size - 1 - i)).collect());
    lines
}

/// Find a line fully occupied by one player.
pub fn find_winner(position: &Position) -> Option<WinLine> {
    let cells = position.cells();
    for line in winning_lines(position.size()) {
        let first = cells[line[0]];
        if first != Mark::Empty && line.iter().all(|&i| cells[i] == first) {
            return Some(WinLine {
                player: first,
                cells: line.clone(),
            });
        }
    }
    None
}

/// Winner only, without allocating the line.
#[inline]
pub fn winner(position: &Position) -> Option<Mark> {
    let cells = position.cells();
    winning_lines(position.size()).iter().find_map(|line| {
        let first = cells[line[0]];
        (first != Mark::Empty && line.iter().all(|&i| cells[i] == first)).then_some(first)
    })
}

/// Whether `player` could still complete `line`.
///
/// The line must hold no opponent mark, and its empty cells plus the player's
/// marks must reach the win length. With win length equal to the side this
/// reduces to "no opponent mark in the line".
pub fn is_line_achievable(position: &Position, line: &[usize], player: Mark) -> bool {
    let opponent = player.opponent();
    let mut own = 0;
    let mut empty = 0;
    for &i in line {
        match position.cells()[i] {
            Mark::Empty => empty += 1,
            m if m == opponent => return false,
            _ => own += 1,
        }
    }
    own + empty >= position.win_length()
}

/// Draw: nobody has won and no line is still achievable by either player.
///
/// This fires before the board is full whenever every line is already
/// blocked. An empty board is never a draw.
pub fn is_draw(position: &Position) -> bool {
    if winner(position).is_some() {
        return false;
    }
    !winning_lines(position.size()).iter().any(|line| {
        is_line_achievable(position, line, Mark::X) || is_line_achievable(position, line, Mark::O)
    })
}

/// Full terminal classification of a position.
pub fn status(position: &Position) -> GameStatus {
    if let Some(line) = find_winner(position) {
        GameStatus::Won(line)
    } else if is_draw(position) {
        GameStatus::Draw
    } else {
        GameStatus::Ongoing
    }
}
