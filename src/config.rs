//! Engine configuration
//!
//! Every tuning knob of the engine lives here: time budgets, the parallel
//! search switch, the Zobrist seed and the medium tier's probabilities.
//! Defaults match the engine's reference behavior; a TOML file may override
//! any subset of them.
//!
//! ```
//! use tictac::config::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str(
//!     r#"
//!     hard_time_budget_ms = 1500
//!
//!     [medium]
//!     random_move_chance = 0.0
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.hard_time_budget_ms, 1500);
//! assert_eq!(config.medium.random_move_chance, 0.0);
//! assert!(config.parallel_enabled);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{EngineError, Result};
use crate::policy::Difficulty;

/// Tunables of the medium difficulty tier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediumConfig {
    /// Chance of playing a uniformly random move instead of thinking
    pub random_move_chance: f64,
    /// Chance of blocking an opponent's immediate win
    pub block_chance: f64,
    /// Relative preference for center cells
    pub center_weight: u32,
    /// Relative preference for corner cells
    pub corner_weight: u32,
    /// Relative preference for every other cell
    pub edge_weight: u32,
}

impl Default for MediumConfig {
    fn default() -> Self {
        Self {
            random_move_chance: 0.25,
            block_chance: 0.8,
            center_weight: 5,
            corner_weight: 3,
            edge_weight: 1,
        }
    }
}

/// Engine-wide configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Budget of the hard tier's iterative-deepening search, in milliseconds
    pub hard_time_budget_ms: u64,
    /// Shared budget of the parallel root search, in milliseconds
    pub parallel_time_budget_ms: u64,
    /// Whether the hard tier tries the parallel root search
    pub parallel_enabled: bool,
    /// Smallest board side that uses the parallel root search
    pub parallel_min_size: usize,
    /// Fixed Zobrist seed; random per engine when absent
    pub zobrist_seed: Option<u64>,
    /// Tier used when the caller names none
    pub default_difficulty: Difficulty,
    pub medium: MediumConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hard_time_budget_ms: 5_000,
            parallel_time_budget_ms: 3_000,
            parallel_enabled: true,
            parallel_min_size: 5,
            zobrist_seed: None,
            default_difficulty: Difficulty::Hard,
            medium: MediumConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(text).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()
    }

    /// Load a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Clamp probabilities into `[0, 1]` and reject unusable settings.
    pub fn validate(mut self) -> Result<Self> {
        let medium = &mut self.medium;
        if medium.random_move_chance.is_nan() || medium.block_chance.is_nan() {
            return Err(EngineError::Config("probabilities must be numbers".into()));
        }
        medium.random_move_chance = medium.random_move_chance.clamp(0.0, 1.0);
        medium.block_chance = medium.block_chance.clamp(0.0, 1.0);
        if medium.center_weight == 0 && medium.corner_weight == 0 && medium.edge_weight == 0 {
            return Err(EngineError::Config(
                "at least one medium cell weight must be non-zero".into(),
            ));
        }
        if !(3..=9).contains(&self.parallel_min_size) {
            log::warn!(
                "parallel_min_size {} outside 3..=9; parallel search {}",
                self.parallel_min_size,
                if self.parallel_min_size > 9 { "never runs" } else { "runs on every size" }
            );
        }
        Ok(self)
    }

    #[inline]
    pub fn hard_time_budget(&self) -> Duration {
        Duration::from_millis(self.hard_time_budget_ms)
    }

    #[inline]
    pub fn parallel_time_budget(&self) -> Duration {
        Duration::from_millis(self.parallel_time_budget_ms)
    }
}
