//! Alpha-Beta search with iterative deepening and transposition table
//!
//! This module implements the core search algorithm of the engine: negamax
//! with alpha-beta pruning, memoized through a [`TranspositionTable`], driven
//! by iterative deepening under a wall-clock budget.
//!
//! # Features
//!
//! - Negamax scores: always from the perspective of the player to move
//! - Terminal check before move generation at every node
//! - Center-first move ordering for earlier cutoffs
//! - Depth ceiling adapted to board size and remaining empty cells
//! - Time checked only between whole depth levels
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tictac::board::{Mark, Position};
//! use tictac::search::{Searcher, ZobristTable};
//!
//! let mut searcher = Searcher::new(Arc::new(ZobristTable::new()));
//! let position = Position::parse("XX.OO....", Mark::X).unwrap();
//!
//! let result = searcher.find_best_move(&position, 9);
//! assert_eq!(result.best_move, Some(2));
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::board::Position;
use crate::eval::{evaluate, WIN_SCORE};
use crate::rules::{is_draw, winner};

use super::ordering::order_moves;
use super::{EntryType, TranspositionTable, ZobristTable};

/// Infinity score for alpha-beta bounds
pub const INF: i32 = i32::MAX;

/// Deepest search any board can ask for (every cell of a 3x3 board).
pub const MAX_DEPTH: u8 = 9;

/// Overflow-safe negation.
///
/// `i32::MIN` has no positive counterpart; it maps to `i32::MAX`.
#[inline]
pub fn negate(score: i32) -> i32 {
    score.checked_neg().unwrap_or(i32::MAX)
}

/// Score of a decided game found with `remaining` plies left to search.
///
/// Decisions found closer to the root have more depth remaining and so a
/// larger magnitude: quicker wins are preferred, quicker losses avoided.
#[inline]
pub fn terminal_score(remaining: u8) -> i32 {
    WIN_SCORE + i32::from(remaining)
}

/// Whether `score` reports a decided game rather than a heuristic value.
#[inline]
pub fn is_decisive(score: i32) -> bool {
    score >= WIN_SCORE || score <= -WIN_SCORE
}

/// Depth ceiling for a board of `size` with `empty` cells left.
///
/// Exhaustive search is affordable on 3x3 only. Beyond that the ceiling
/// falls as the side grows and as more cells are open. It never rises with
/// either, and it is at least 1.
pub fn adaptive_max_depth(size: usize, empty: usize) -> u8 {
    match size {
        0..=3 => MAX_DEPTH,
        4 => match empty {
            13.. => 6,
            9..=12 => 7,
            _ => 8,
        },
        5 => match empty {
            21.. => 4,
            13..=20 => 5,
            _ => 6,
        },
        6 => match empty {
            31.. => 3,
            21..=30 => 4,
            _ => 5,
        },
        7 => match empty {
            31.. => 3,
            _ => 4,
        },
        _ => match empty {
            41.. => 2,
            _ => 3,
        },
    }
}

/// Depth ceiling for `position`: the adaptive limit, capped by the number of
/// legal moves and by an optional caller limit. At least 1 when moves exist.
pub fn depth_ceiling(position: &Position, cap: Option<u8>) -> u8 {
    let empty = position.empty_count();
    if empty == 0 {
        return 0;
    }
    let moves = u8::try_from(empty).unwrap_or(u8::MAX);
    let mut ceiling = adaptive_max_depth(position.size(), empty).min(moves);
    if let Some(cap) = cap {
        ceiling = ceiling.min(cap);
    }
    ceiling.max(1)
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<usize>,
    /// Score of the best move for the player to move
    pub score: i32,
    /// Depth of the last completed search
    pub depth: u8,
    /// Total nodes searched
    pub nodes: u64,
}

impl SearchResult {
    fn none() -> Self {
        Self {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
        }
    }
}

/// Single-threaded negamax searcher.
///
/// Holds no position state between calls; the Zobrist table is shared
/// read-only, and every transposition table is supplied by the caller or
/// created fresh per invocation.
pub struct Searcher {
    zobrist: Arc<ZobristTable>,
    nodes: u64,
}

impl Searcher {
    #[must_use]
    pub fn new(zobrist: Arc<ZobristTable>) -> Self {
        Self { zobrist, nodes: 0 }
    }

    /// Nodes visited since this searcher was created.
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Recursive alpha-beta search with negamax formulation.
    ///
    /// Returns the value of `position` for its player to move, searched
    /// `depth` plies deep. Depth-exhausted leaves are scored statically.
    pub fn negamax(
        &mut self,
        position: &Position,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        tt: &mut TranspositionTable,
    ) -> i32 {
        self.nodes += 1;

        let hash = self.zobrist.hash(position);
        if let Some(score) = tt.probe(hash, depth, alpha, beta) {
            return score;
        }

        // Terminal check precedes move generation
        if let Some(mark) = winner(position) {
            let score = terminal_score(depth);
            return if mark == position.to_move() { score } else { -score };
        }
        if is_draw(position) {
            return 0;
        }

        let moves = position.legal_moves();
        if moves.is_empty() {
            return 0;
        }
        if depth == 0 {
            return evaluate(position, position.to_move());
        }

        let original_alpha = alpha;
        let mut best_score = i32::MIN;

        for mv in order_moves(position.size(), &moves) {
            let child = position.play_unchecked(mv);
            let score = negate(self.negamax(&child, depth - 1, negate(beta), negate(alpha), tt));

            if score > best_score {
                best_score = score;
            }
            alpha = alpha.max(best_score);
            if alpha >= beta {
                break;
            }
        }

        let entry_type = if best_score <= original_alpha {
            EntryType::UpperBound
        } else if best_score >= beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        };
        tt.store(hash, depth, best_score, entry_type);

        best_score
    }

    /// Root-level search that also reports the move behind the score.
    ///
    /// The root is never answered from the table, so a move is reported
    /// whenever the position has one and is not already won. Returns no move
    /// for `depth == 0`.
    pub fn search(
        &mut self,
        position: &Position,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        tt: &mut TranspositionTable,
    ) -> SearchResult {
        let start_nodes = self.nodes;
        let moves = position.legal_moves();

        if depth == 0 || moves.is_empty() || winner(position).is_some() {
            let score = self.negamax(position, depth, alpha, beta, tt);
            return SearchResult {
                best_move: None,
                score,
                depth,
                nodes: self.nodes - start_nodes,
            };
        }

        self.nodes += 1;
        let hash = self.zobrist.hash(position);
        let original_alpha = alpha;
        let mut best_move = None;
        let mut best_score = i32::MIN;

        for mv in order_moves(position.size(), &moves) {
            let child = position.play_unchecked(mv);
            let score = negate(self.negamax(&child, depth - 1, negate(beta), negate(alpha), tt));

            if best_move.is_none() || score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(best_score);
            if alpha >= beta {
                break;
            }
        }

        let entry_type = if best_score <= original_alpha {
            EntryType::UpperBound
        } else if best_score >= beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        };
        tt.store(hash, depth, best_score, entry_type);

        SearchResult {
            best_move,
            score: best_score,
            depth,
            nodes: self.nodes - start_nodes,
        }
    }

    /// Full-window search to a fixed depth with a fresh table.
    pub fn find_best_move(&mut self, position: &Position, depth: u8) -> SearchResult {
        let mut tt = TranspositionTable::new();
        self.search(position, depth, -INF, INF, &mut tt)
    }

    /// Iterative deepening under a time budget.
    ///
    /// Searches depth 1, 2, ... up to [`depth_ceiling`] with one table for the
    /// whole run. The clock is read only after a depth completes, so a level
    /// that starts before the deadline always finishes. Returns the move of
    /// the deepest completed level, or the first legal move if no level
    /// produced one.
    pub fn search_iterative(
        &mut self,
        position: &Position,
        time_budget: Duration,
        max_depth: Option<u8>,
    ) -> SearchResult {
        let start = Instant::now();
        let start_nodes = self.nodes;
        let ceiling = depth_ceiling(position, max_depth);
        let mut tt = TranspositionTable::new();
        let mut best = SearchResult::none();

        for depth in 1..=ceiling {
            let result = self.search(position, depth, -INF, INF, &mut tt);
            log::debug!(
                "depth {depth}/{ceiling}: move {:?} score {} nodes {} ({:?})",
                result.best_move,
                result.score,
                result.nodes,
                start.elapsed()
            );
            best = result;

            if start.elapsed() >= time_budget {
                if depth < ceiling {
                    log::debug!("time budget {time_budget:?} spent after depth {depth}");
                }
                break;
            }
        }

        if best.best_move.is_none() {
            best.best_move = position.legal_moves().first().copied();
        }
        best.nodes = self.nodes - start_nodes;
        log::trace!("table: {:?}", tt.stats());
        best
    }
}
