//! Search module for the move-selection engine
//!
//! Contains:
//! - Zobrist hashing for position identification
//! - Transposition table for caching search results
//! - Move ordering for better pruning
//! - Alpha-Beta search with iterative deepening
//! - Root-split parallel search

pub mod alphabeta;
pub mod ordering;
pub mod parallel;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{
    adaptive_max_depth, depth_ceiling, is_decisive, negate, terminal_score, SearchResult,
    Searcher, INF, MAX_DEPTH,
};
pub use ordering::{move_priority, order_moves};
pub use parallel::{ParallelOutcome, ParallelSearcher};
pub use tt::{EntryType, TTEntry, TTStats, TranspositionTable};
pub use zobrist::ZobristTable;
