//! Main AI Engine integrating all search components
//!
//! This module provides the engine the rest of an application talks to. It
//! maps a difficulty tier to a move-selection policy and, for the hard tier,
//! runs a chain of strategies in fixed priority order:
//!
//! 1. **Advisor**: an optional pluggable (e.g. learned) move source
//! 2. **Parallel root search**: one task per root move, larger boards only
//! 3. **Iterative deepening**: single-threaded search under a time budget
//! 4. **First legal move**: last resort
//!
//! The first strategy to produce a move wins. A 3x3 board skips the chain
//! and is searched exhaustively.
//!
//! # Example
//!
//! ```
//! use tictac::{AIEngine, Difficulty, Mark, Position};
//!
//! let engine = AIEngine::new();
//! let position = Position::parse("XX.OO....", Mark::X).unwrap();
//!
//! let result = engine.choose_move_with_stats(&position, Difficulty::Hard);
//! assert_eq!(result.best_move, Some(2));
//! println!("Source: {:?}, time: {}ms", result.source, result.time_ms);
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::board::{Position, MIN_SIZE};
use crate::config::EngineConfig;
use crate::policy::{easy_move, medium_move, Difficulty};
use crate::search::{
    is_decisive, ParallelSearcher, SearchResult, Searcher, TranspositionTable, ZobristTable,
    MAX_DEPTH,
};

/// Pluggable move source tried first by the hard tier.
///
/// Implementations may decline any position by returning `None`; that is
/// not an error, the engine simply moves on to the next strategy. A
/// suggestion that is not an empty cell is discarded.
pub trait MoveAdvisor: Send + Sync {
    fn name(&self) -> &str;
    fn suggest(&self, position: &Position) -> Option<usize>;
}

/// Hard-tier strategies, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Advisor,
    ParallelRoot,
    IterativeDeepening,
    FirstLegal,
}

pub const HARD_STRATEGY_CHAIN: [Strategy; 4] = [
    Strategy::Advisor,
    Strategy::ParallelRoot,
    Strategy::IterativeDeepening,
    Strategy::FirstLegal,
];

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Advisor => "advisor",
            Strategy::ParallelRoot => "parallel root search",
            Strategy::IterativeDeepening => "iterative deepening",
            Strategy::FirstLegal => "first legal move",
        };
        f.write_str(name)
    }
}

/// What produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    /// Uniform random choice (easy tier, or hard-tier fallback on 3x3)
    Random,
    /// Medium-tier heuristic policy
    Heuristic,
    /// Exhaustive search of a 3x3 board
    FullSearch,
    /// One of the hard-tier strategies
    Strategy(Strategy),
    /// The position had no legal move
    NoMove,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Chosen cell, or `None` when the position has no legal move
    pub best_move: Option<usize>,
    /// Search score of the move for the player to move (0 when not searched)
    pub score: i32,
    /// Policy or strategy that chose the move
    pub source: MoveSource,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn unsearched(mv: Option<usize>, source: MoveSource, start: Instant) -> Self {
        Self {
            best_move: mv,
            score: 0,
            source,
            time_ms: elapsed_ms(start),
            nodes: 0,
        }
    }

    #[inline]
    fn from_search(result: SearchResult, source: MoveSource, start: Instant) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            source,
            time_ms: elapsed_ms(start),
            nodes: result.nodes,
        }
    }

    #[inline]
    fn no_move(start: Instant) -> Self {
        Self::unsearched(None, MoveSource::NoMove, start)
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Move-selection engine.
///
/// Holds only immutable state between calls: its configuration, the Zobrist
/// table and the optional advisor. Every search builds its own transposition
/// table, so one engine can serve many threads at once.
///
/// # Preconditions
///
/// Callers are expected to check for a finished game before asking for a
/// move. On a full board every entry point returns `None`; on a board that
/// is already won the engine still picks an empty cell.
pub struct AIEngine {
    config: EngineConfig,
    zobrist: Arc<ZobristTable>,
    advisor: Option<Box<dyn MoveAdvisor>>,
}

impl AIEngine {
    /// Create an engine with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with a custom configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let zobrist = match config.zobrist_seed {
            Some(seed) => ZobristTable::with_seed(seed),
            None => ZobristTable::new(),
        };
        Self {
            config,
            zobrist: Arc::new(zobrist),
            advisor: None,
        }
    }

    /// Install the advisor tried first by the hard tier.
    #[must_use]
    pub fn with_advisor(mut self, advisor: Box<dyn MoveAdvisor>) -> Self {
        self.advisor = Some(advisor);
        self
    }

    pub fn set_advisor(&mut self, advisor: Option<Box<dyn MoveAdvisor>>) {
        self.advisor = advisor;
    }

    /// Set the hard tier's iterative-deepening budget.
    pub fn set_time_budget(&mut self, budget: Duration) {
        self.config.hard_time_budget_ms = u64::try_from(budget.as_millis()).unwrap_or(u64::MAX);
    }

    /// Enable or disable the parallel root search.
    pub fn set_parallel(&mut self, enabled: bool) {
        self.config.parallel_enabled = enabled;
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn zobrist(&self) -> &Arc<ZobristTable> {
        &self.zobrist
    }

    /// Choose a move for `position` at the given difficulty.
    ///
    /// Returns `None` only when the position has no legal move.
    #[must_use]
    pub fn choose_move(&self, position: &Position, difficulty: Difficulty) -> Option<usize> {
        self.choose_move_with_stats(position, difficulty).best_move
    }

    /// [`choose_move`](Self::choose_move) with a caller-supplied random source.
    pub fn choose_move_with_rng<R: Rng + ?Sized>(
        &self,
        position: &Position,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Option<usize> {
        self.choose_move_with_stats_rng(position, difficulty, rng).best_move
    }

    /// Choose a move and report how it was found.
    #[must_use]
    pub fn choose_move_with_stats(&self, position: &Position, difficulty: Difficulty) -> MoveResult {
        self.choose_move_with_stats_rng(position, difficulty, &mut rand::rng())
    }

    fn choose_move_with_stats_rng<R: Rng + ?Sized>(
        &self,
        position: &Position,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> MoveResult {
        let start = Instant::now();

        if position.legal_moves().is_empty() {
            return MoveResult::no_move(start);
        }

        let result = match difficulty {
            Difficulty::Easy => {
                MoveResult::unsearched(easy_move(position, rng), MoveSource::Random, start)
            }
            Difficulty::Medium => MoveResult::unsearched(
                medium_move(position, &self.config.medium, rng),
                MoveSource::Heuristic,
                start,
            ),
            Difficulty::Hard => self.hard_move(position, rng, start),
        };

        log::debug!(
            "{difficulty} move {:?} via {:?} in {}ms ({} nodes)",
            result.best_move,
            result.source,
            result.time_ms,
            result.nodes
        );
        result
    }

    /// Hard tier: exhaustive on 3x3, otherwise the strategy chain.
    fn hard_move<R: Rng + ?Sized>(&self, position: &Position, rng: &mut R, start: Instant) -> MoveResult {
        if position.size() == MIN_SIZE {
            let result = self.find_best_move(position, MAX_DEPTH);
            if result.best_move.is_some() {
                return MoveResult::from_search(result, MoveSource::FullSearch, start);
            }
            return MoveResult::unsearched(easy_move(position, rng), MoveSource::Random, start);
        }

        for strategy in HARD_STRATEGY_CHAIN {
            if let Some(result) = self.try_strategy(strategy, position, start) {
                return result;
            }
            log::debug!("{strategy} produced no move, trying next strategy");
        }
        MoveResult::no_move(start)
    }

    fn try_strategy(&self, strategy: Strategy, position: &Position, start: Instant) -> Option<MoveResult> {
        let source = MoveSource::Strategy(strategy);
        match strategy {
            Strategy::Advisor => {
                let advisor = self.advisor.as_ref()?;
                let mv = advisor.suggest(position)?;
                if !position.is_empty_cell(mv) {
                    log::warn!("advisor {} suggested illegal cell {mv}", advisor.name());
                    return None;
                }
                Some(MoveResult::unsearched(Some(mv), source, start))
            }
            Strategy::ParallelRoot => {
                if !self.config.parallel_enabled || position.size() < self.config.parallel_min_size {
                    return None;
                }
                let searcher = ParallelSearcher::new(Arc::clone(&self.zobrist));
                let outcome = searcher.search(position, self.config.parallel_time_budget())?;
                log::debug!(
                    "parallel root search scored {}/{} moves",
                    outcome.scores.len(),
                    outcome.dispatched
                );
                Some(MoveResult {
                    best_move: Some(outcome.best_move),
                    score: outcome.score,
                    source,
                    time_ms: elapsed_ms(start),
                    nodes: 0,
                })
            }
            Strategy::IterativeDeepening => {
                let result = self.search_with_limits(position, self.config.hard_time_budget(), None);
                result.best_move?;
                if is_decisive(result.score) {
                    log::debug!("search reached a decided game at depth {}", result.depth);
                }
                Some(MoveResult::from_search(result, source, start))
            }
            Strategy::FirstLegal => {
                let mv = position.legal_moves().first().copied()?;
                Some(MoveResult::unsearched(Some(mv), source, start))
            }
        }
    }

    /// Iterative-deepening search under `time_budget`.
    #[must_use]
    pub fn search_best_move(&self, position: &Position, time_budget: Duration) -> Option<usize> {
        self.search_with_limits(position, time_budget, None).best_move
    }

    /// Iterative deepening with an optional depth cap.
    #[must_use]
    pub fn search_with_limits(
        &self,
        position: &Position,
        time_budget: Duration,
        max_depth: Option<u8>,
    ) -> SearchResult {
        if position.legal_moves().is_empty() {
            return SearchResult {
                best_move: None,
                score: 0,
                depth: 0,
                nodes: 0,
            };
        }
        let mut searcher = Searcher::new(Arc::clone(&self.zobrist));
        searcher.search_iterative(position, time_budget, max_depth)
    }

    /// Fixed-depth search with a fresh transposition table.
    #[must_use]
    pub fn find_best_move(&self, position: &Position, depth: u8) -> SearchResult {
        let mut searcher = Searcher::new(Arc::clone(&self.zobrist));
        searcher.find_best_move(position, depth)
    }

    /// Low-level alpha-beta search with a caller-owned table.
    ///
    /// The table must only ever be used with this engine's Zobrist keys.
    pub fn search(
        &self,
        position: &Position,
        depth: u8,
        alpha: i32,
        beta: i32,
        tt: &mut TranspositionTable,
    ) -> SearchResult {
        let mut searcher = Searcher::new(Arc::clone(&self.zobrist));
        searcher.search(position, depth, alpha, beta, tt)
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Mark;
    use crate::config::MediumConfig;
    use crate::search::INF;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct FixedAdvisor(Option<usize>);

    impl MoveAdvisor for FixedAdvisor {
        fn name(&self) -> &str {
            "fixed"
        }

        fn suggest(&self, _position: &Position) -> Option<usize> {
            self.0
        }
    }

    fn quick_engine() -> AIEngine {
        AIEngine::with_config(EngineConfig {
            hard_time_budget_ms: 50,
            parallel_time_budget_ms: 2_000,
            zobrist_seed: Some(17),
            ..EngineConfig::default()
        })
    }

    #[test]
    fn test_engine_creation() {
        let engine = AIEngine::new();
        assert_eq!(engine.config(), &EngineConfig::default());
        let _ = AIEngine::default();
    }

    #[test]
    fn test_engine_setters() {
        let mut engine = AIEngine::new();
        engine.set_time_budget(Duration::from_millis(1200));
        engine.set_parallel(false);
        assert_eq!(engine.config().hard_time_budget_ms, 1200);
        assert!(!engine.config().parallel_enabled);
    }

    #[test]
    fn test_engine_no_move_on_full_board() {
        let engine = quick_engine();
        let pos = Position::parse("XOXXOOOXX", Mark::O).unwrap();
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let result = engine.choose_move_with_stats(&pos, difficulty);
            assert_eq!(result.best_move, None);
            assert_eq!(result.source, MoveSource::NoMove);
        }
        assert_eq!(engine.search_best_move(&pos, Duration::from_millis(10)), None);
    }

    #[test]
    fn test_hard_3x3_uses_full_search() {
        let engine = quick_engine();
        let pos = Position::empty(3, Mark::X).unwrap();
        let result = engine.choose_move_with_stats(&pos, Difficulty::Hard);
        assert_eq!(result.source, MoveSource::FullSearch);
        assert_eq!(result.best_move, Some(4));
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_hard_3x3_random_on_won_board() {
        // The search reports no move on a finished game; a random empty cell
        // is returned instead.
        let engine = quick_engine();
        let pos = Position::parse("XXXOO....", Mark::O).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let result = engine.choose_move_with_stats_rng(&pos, Difficulty::Hard, &mut rng);
        assert_eq!(result.source, MoveSource::Random);
        assert!(pos.is_empty_cell(result.best_move.unwrap()));
    }

    #[test]
    fn test_advisor_takes_priority() {
        let engine = quick_engine().with_advisor(Box::new(FixedAdvisor(Some(0))));
        let pos = Position::empty(4, Mark::X).unwrap();
        let result = engine.choose_move_with_stats(&pos, Difficulty::Hard);
        assert_eq!(result.best_move, Some(0));
        assert_eq!(result.source, MoveSource::Strategy(Strategy::Advisor));
    }

    #[test]
    fn test_declining_advisor_falls_through() {
        let engine = quick_engine().with_advisor(Box::new(FixedAdvisor(None)));
        let pos = Position::empty(4, Mark::X).unwrap();
        let result = engine.choose_move_with_stats(&pos, Difficulty::Hard);
        assert_eq!(
            result.source,
            MoveSource::Strategy(Strategy::IterativeDeepening)
        );
        assert!(pos.is_empty_cell(result.best_move.unwrap()));
    }

    #[test]
    fn test_illegal_advisor_suggestion_rejected() {
        let engine = quick_engine().with_advisor(Box::new(FixedAdvisor(Some(5))));
        let pos = Position::parse("..... X.... ..... ..... .....", Mark::O).unwrap();
        let result = engine.choose_move_with_stats(&pos, Difficulty::Hard);
        assert_ne!(result.best_move, Some(5));
        assert_ne!(result.source, MoveSource::Strategy(Strategy::Advisor));
    }

    #[test]
    fn test_parallel_used_on_large_boards() {
        let engine = quick_engine();
        // X completes column 4 at cell 24
        let pos = Position::parse(
            "OOOOX ....X ....X ....X .....",
            Mark::X,
        )
        .unwrap();
        let result = engine.choose_move_with_stats(&pos, Difficulty::Hard);
        assert_eq!(result.best_move, Some(24));
        assert_eq!(result.source, MoveSource::Strategy(Strategy::ParallelRoot));
    }

    #[test]
    fn test_parallel_disabled_uses_iterative_deepening() {
        let mut engine = quick_engine();
        engine.set_parallel(false);
        let pos = Position::empty(5, Mark::X).unwrap();
        let result = engine.choose_move_with_stats(&pos, Difficulty::Hard);
        assert_eq!(
            result.source,
            MoveSource::Strategy(Strategy::IterativeDeepening)
        );
        assert!(pos.is_empty_cell(result.best_move.unwrap()));
    }

    #[test]
    fn test_spent_parallel_budget_falls_through() {
        let engine = AIEngine::with_config(EngineConfig {
            hard_time_budget_ms: 50,
            parallel_time_budget_ms: 0,
            zobrist_seed: Some(17),
            ..EngineConfig::default()
        });
        let pos = Position::empty(7, Mark::X).unwrap();
        assert!(engine
            .try_strategy(Strategy::ParallelRoot, &pos, Instant::now())
            .is_none());

        let result = engine.choose_move_with_stats(&pos, Difficulty::Hard);
        assert_eq!(
            result.source,
            MoveSource::Strategy(Strategy::IterativeDeepening)
        );
        assert!(pos.is_empty_cell(result.best_move.unwrap()));
    }

    #[test]
    fn test_medium_with_unvalidated_config() {
        let engine = AIEngine::with_config(EngineConfig {
            medium: MediumConfig {
                random_move_chance: 1.5,
                block_chance: f64::NAN,
                ..MediumConfig::default()
            },
            ..EngineConfig::default()
        });
        let pos = Position::empty(3, Mark::X).unwrap();
        let mv = engine.choose_move(&pos, Difficulty::Medium).unwrap();
        assert!(pos.is_empty_cell(mv));
    }

    #[test]
    fn test_first_legal_strategy() {
        let engine = quick_engine();
        let pos = Position::parse("XXXOO....", Mark::O).unwrap();
        let result = engine
            .try_strategy(Strategy::FirstLegal, &pos, Instant::now())
            .unwrap();
        assert_eq!(result.best_move, Some(5));
    }

    #[test]
    fn test_easy_and_medium_sources() {
        let engine = AIEngine::with_config(EngineConfig {
            medium: MediumConfig {
                random_move_chance: 0.0,
                ..MediumConfig::default()
            },
            ..EngineConfig::default()
        });
        let pos = Position::parse("XX.OO....", Mark::X).unwrap();
        let mut rng = StdRng::seed_from_u64(8);

        let easy = engine.choose_move_with_stats_rng(&pos, Difficulty::Easy, &mut rng);
        assert_eq!(easy.source, MoveSource::Random);

        let medium = engine.choose_move_with_stats_rng(&pos, Difficulty::Medium, &mut rng);
        assert_eq!(medium.source, MoveSource::Heuristic);
        assert_eq!(medium.best_move, Some(2));
    }

    #[test]
    fn test_low_level_search() {
        let engine = quick_engine();
        let pos = Position::parse("OX..OX...", Mark::X).unwrap();
        let mut tt = TranspositionTable::new();
        let result = engine.search(&pos, 7, -INF, INF, &mut tt);
        assert_eq!(result.best_move, Some(8));
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_search_with_limits_depth_cap() {
        let engine = quick_engine();
        let pos = Position::empty(6, Mark::X).unwrap();
        let result = engine.search_with_limits(&pos, Duration::from_secs(30), Some(1));
        assert_eq!(result.depth, 1);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(Strategy::FirstLegal.to_string(), "first legal move");
        assert_eq!(HARD_STRATEGY_CHAIN[0], Strategy::Advisor);
        assert_eq!(HARD_STRATEGY_CHAIN[3], Strategy::FirstLegal);
    }
}
