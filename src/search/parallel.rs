//! Root-split parallel search
//!
//! Every legal root move gets its own thread, [`Searcher`] and
//! [`TranspositionTable`]; nothing is shared inside the recursive search
//! except the read-only Zobrist table. Each task writes exactly one score
//! into a mutex-guarded result list and wakes the collector.
//!
//! The collector waits until every task has reported or the time budget
//! runs out, whichever comes first. Tasks still running at the deadline are
//! not interrupted; their results land in the list after it has been read
//! and are ignored.

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use crate::board::Position;

use super::alphabeta::{depth_ceiling, negate, Searcher, INF};
use super::ordering::order_moves;
use super::{TranspositionTable, ZobristTable};

type Results = (Mutex<Vec<(usize, i32)>>, Condvar);

/// Scores gathered by a parallel root search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelOutcome {
    /// Highest-scoring move (earliest in move order on ties)
    pub best_move: usize,
    /// Its score for the player to move
    pub score: i32,
    /// Every `(move, score)` that arrived before the deadline, in move order
    pub scores: Vec<(usize, i32)>,
    /// Tasks started
    pub dispatched: usize,
}

/// Parallel evaluator of root moves.
pub struct ParallelSearcher {
    zobrist: Arc<ZobristTable>,
}

impl ParallelSearcher {
    #[must_use]
    pub fn new(zobrist: Arc<ZobristTable>) -> Self {
        Self { zobrist }
    }

    /// Depth each child is searched to: one less than the root ceiling.
    pub fn child_depth(position: &Position) -> u8 {
        depth_ceiling(position, None).saturating_sub(1)
    }

    /// Evaluate every root move concurrently within `budget`.
    ///
    /// Returns `None` when no result arrived in time, or when the results
    /// that did arrive all carry the same score and so single out no move.
    /// A zero budget starts no tasks at all.
    pub fn search(&self, position: &Position, budget: Duration) -> Option<ParallelOutcome> {
        let moves = order_moves(position.size(), &position.legal_moves());
        if moves.is_empty() {
            return None;
        }
        if budget.is_zero() {
            log::debug!("no parallel budget, skipping {} root moves", moves.len());
            return None;
        }

        let deadline = Instant::now() + budget;
        let depth = Self::child_depth(position);
        let shared: Arc<Results> = Arc::new((Mutex::new(Vec::with_capacity(moves.len())), Condvar::new()));
        let mut dispatched = 0usize;

        for &mv in &moves {
            let child = position.play_unchecked(mv);
            let zobrist = Arc::clone(&self.zobrist);
            let shared = Arc::clone(&shared);

            let spawned = thread::Builder::new()
                .name(format!("root-move-{mv}"))
                .spawn(move || {
                    let mut searcher = Searcher::new(zobrist);
                    let mut tt = TranspositionTable::new();
                    let score = negate(searcher.negamax(&child, depth, -INF, INF, &mut tt));

                    let (lock, cvar) = &*shared;
                    lock.lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push((mv, score));
                    cvar.notify_all();
                });

            match spawned {
                Ok(_) => dispatched += 1,
                Err(e) => log::warn!("could not start search task for move {mv}: {e}"),
            }
        }

        let collected = {
            let (lock, cvar) = &*shared;
            let mut results = lock.lock().unwrap_or_else(PoisonError::into_inner);
            while results.len() < dispatched {
                let now = Instant::now();
                if now >= deadline {
                    log::debug!(
                        "parallel budget {budget:?} spent with {}/{dispatched} moves scored",
                        results.len()
                    );
                    break;
                }
                let (guard, _) = cvar
                    .wait_timeout(results, deadline - now)
                    .unwrap_or_else(PoisonError::into_inner);
                results = guard;
            }
            results.clone()
        };

        pick_best(&moves, &collected, dispatched)
    }
}

/// Choose the best collected score, breaking ties by move order.
fn pick_best(
    moves: &[usize],
    collected: &[(usize, i32)],
    dispatched: usize,
) -> Option<ParallelOutcome> {
    let by_move: HashMap<usize, i32> = collected.iter().copied().collect();
    let scores: Vec<(usize, i32)> = moves
        .iter()
        .filter_map(|mv| by_move.get(mv).map(|&s| (*mv, s)))
        .collect();

    let (first_move, first_score) = *scores.first()?;
    if scores.len() > 1 && scores.iter().all(|&(_, s)| s == first_score) {
        return None;
    }

    let mut best = (first_move, first_score);
    for &(mv, score) in &scores[1..] {
        if score > best.1 {
            best = (mv, score);
        }
    }

    Some(ParallelOutcome {
        best_move: best.0,
        score: best.1,
        scores,
        dispatched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Mark;

    #[test]
    fn test_pick_best_prefers_move_order_on_ties() {
        let moves = [12, 6, 8, 0];
        let collected = [(0, 5), (8, 9), (6, 9), (12, 1)];
        let outcome = pick_best(&moves, &collected, 4).unwrap();
        assert_eq!(outcome.best_move, 6);
        assert_eq!(outcome.score, 9);
        assert_eq!(outcome.scores, vec![(12, 1), (6, 9), (8, 9), (0, 5)]);
    }

    #[test]
    fn test_pick_best_empty_is_failure() {
        assert_eq!(pick_best(&[1, 2], &[], 2), None);
    }

    #[test]
    fn test_pick_best_all_equal_is_failure() {
        assert_eq!(pick_best(&[1, 2, 3], &[(1, 0), (2, 0), (3, 0)], 3), None);
    }

    #[test]
    fn test_pick_best_single_result() {
        let outcome = pick_best(&[1, 2, 3], &[(3, -4)], 3).unwrap();
        assert_eq!(outcome.best_move, 3);
        assert_eq!(outcome.dispatched, 3);
    }

    #[test]
    fn test_parallel_finds_winning_move() {
        // Row 0 completes at 4 for X on a 5x5 board
        let pos = Position::parse(
            "XXXX. OOOO. ..... ..... .....",
            Mark::X,
        )
        .unwrap();
        let searcher = ParallelSearcher::new(Arc::new(ZobristTable::new()));
        let outcome = searcher.search(&pos, Duration::from_secs(30)).unwrap();
        assert_eq!(outcome.best_move, 4);
        assert_eq!(outcome.dispatched, 17);
        assert_eq!(outcome.scores.len(), 17);
    }

    #[test]
    fn test_parallel_no_moves() {
        let pos = Position::parse("XOXXOOOXX", Mark::O).unwrap();
        let searcher = ParallelSearcher::new(Arc::new(ZobristTable::new()));
        assert_eq!(searcher.search(&pos, Duration::from_millis(10)), None);
    }

    #[test]
    fn test_parallel_zero_budget_fails() {
        let pos = Position::empty(9, Mark::X).unwrap();
        let searcher = ParallelSearcher::new(Arc::new(ZobristTable::new()));
        assert_eq!(searcher.search(&pos, Duration::ZERO), None);
    }

    #[test]
    fn test_parallel_deadline_keeps_partial_results() {
        // 24 open cells: each task searches 3 plies below its root move,
        // far more than a millisecond of work in total.
        let pos = Position::parse(
            "XO.... .XO... ..XO.. ...OX. ....OX OX....",
            Mark::X,
        )
        .unwrap();
        let searcher = ParallelSearcher::new(Arc::new(ZobristTable::with_seed(5)));

        if let Some(outcome) = searcher.search(&pos, Duration::from_millis(1)) {
            assert!(pos.is_empty_cell(outcome.best_move));
            assert!(outcome.scores.len() <= outcome.dispatched);
            assert!(outcome.dispatched <= pos.empty_count());
            assert!(outcome.scores.iter().all(|&(mv, _)| pos.is_empty_cell(mv)));
            assert!(outcome.scores.contains(&(outcome.best_move, outcome.score)));
        }
    }

    #[test]
    fn test_child_depth() {
        let pos = Position::empty(5, Mark::X).unwrap();
        assert_eq!(ParallelSearcher::child_depth(&pos), 3);
    }
}
