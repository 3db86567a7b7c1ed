//! Transposition Table for caching search results
//!
//! Maps a Zobrist hash to the best score found for that position and the
//! depth it was searched to. A table lives for one search invocation (one
//! iterative-deepening run, or one parallel task) and is then dropped.
//!
//! # Example
//!
//! ```
//! use tictac::search::{EntryType, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new();
//! let hash = 0x1234_5678_9ABC_DEF0;
//!
//! tt.store(hash, 5, 100, EntryType::Exact);
//! assert_eq!(tt.probe(hash, 5, -1000, 1000), Some(100));
//! // A shallower entry is never trusted for a deeper request
//! assert_eq!(tt.probe(hash, 6, -1000, 1000), None);
//! ```

use std::collections::HashMap;

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the search completed inside the window
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

/// Transposition table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Remaining depth the score was searched to
    pub depth: u8,
    /// Score from the perspective of the player to move
    pub score: i32,
    /// How to read `score`
    pub entry_type: EntryType,
}

/// Per-invocation transposition table.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, TTEntry>,
    probes: u64,
    hits: u64,
}

impl TranspositionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe the table for a position.
    ///
    /// Returns the stored score only when the entry was searched at least as
    /// deep as `depth` and its bound decides the `(alpha, beta)` window.
    pub fn probe(&mut self, hash: u64, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        self.probes += 1;
        let entry = self.entries.get(&hash)?;
        if entry.depth < depth {
            return None;
        }
        let usable = match entry.entry_type {
            EntryType::Exact => true,
            EntryType::LowerBound => entry.score >= beta,
            EntryType::UpperBound => entry.score <= alpha,
        };
        if usable {
            self.hits += 1;
            Some(entry.score)
        } else {
            None
        }
    }

    /// Raw entry lookup, regardless of depth.
    #[must_use]
    pub fn get(&self, hash: u64) -> Option<&TTEntry> {
        self.entries.get(&hash)
    }

    /// Store a result, overwriting whatever was recorded for `hash`.
    pub fn store(&mut self, hash: u64, depth: u8, score: i32, entry_type: EntryType) {
        self.entries.insert(
            hash,
            TTEntry {
                depth,
                score,
                entry_type,
            },
        );
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.probes = 0;
        self.hits = 0;
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        TTStats {
            entries: self.entries.len(),
            probes: self.probes,
            hits: self.hits,
        }
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    /// Number of positions stored
    pub entries: usize,
    /// Total probes
    pub probes: u64,
    /// Probes that returned a usable score
    pub hits: u64,
}

impl TTStats {
    pub fn hit_rate(&self) -> f64 {
        if self.probes == 0 {
            0.0
        } else {
            self.hits as f64 / self.probes as f64 * 100.0
        }
    }
}
