//! Difficulty tiers
//!
//! Easy and medium are cheap, randomized policies that never search. The
//! hard tier needs the searcher and lives in [`crate::engine`].

use std::fmt;
use std::str::FromStr;

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Deserialize;

use crate::board::{Mark, Position};
use crate::config::MediumConfig;
use crate::error::EngineError;
use crate::eval::{center_cells, corner_cells};
use crate::rules::winning_lines;

/// Difficulty tier requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[serde(alias = "normal")]
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "normal" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(EngineError::Config(format!("unknown difficulty {other:?}"))),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Uniformly random legal move.
pub fn easy_move<R: Rng + ?Sized>(position: &Position, rng: &mut R) -> Option<usize> {
    position.legal_moves().choose(rng).copied()
}

/// First empty cell that completes a line for `player`.
pub fn find_winning_move(position: &Position, player: Mark) -> Option<usize> {
    let cells = position.cells();
    for line in winning_lines(position.size()) {
        let mut gap = None;
        let mut complete = true;
        for &i in line {
            match cells[i] {
                m if m == player => {}
                Mark::Empty if gap.is_none() => gap = Some(i),
                _ => {
                    complete = false;
                    break;
                }
            }
        }
        if complete && gap.is_some() {
            return gap;
        }
    }
    None
}

/// Beatable heuristic play.
///
/// In order: a random move with `random_move_chance`; an immediate win;
/// a block of the opponent's immediate win with `block_chance`; a cell
/// drawn from the center / corner / other categories by weight; and
/// finally any random legal move.
pub fn medium_move<R: Rng + ?Sized>(
    position: &Position,
    config: &MediumConfig,
    rng: &mut R,
) -> Option<usize> {
    if position.legal_moves().is_empty() {
        return None;
    }
    if rng.random_bool(chance(config.random_move_chance)) {
        return easy_move(position, rng);
    }
    if let Some(win) = find_winning_move(position, position.to_move()) {
        return Some(win);
    }
    if let Some(block) = find_winning_move(position, position.opponent()) {
        if rng.random_bool(chance(config.block_chance)) {
            return Some(block);
        }
    }
    preferred_cell(position, config, rng).or_else(|| easy_move(position, rng))
}

/// Clamp a configured probability into `[0, 1]`; NaN means never.
///
/// Configs built in code never pass through
/// [`EngineConfig::validate`](crate::config::EngineConfig::validate), and
/// `random_bool` panics outside that range.
fn chance(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Weighted pick among cell categories that still have empty cells.
fn preferred_cell<R: Rng + ?Sized>(
    position: &Position,
    config: &MediumConfig,
    rng: &mut R,
) -> Option<usize> {
    let size = position.size();
    let centers = center_cells(size);
    let corners = corner_cells(size);

    let free = |cells: &[usize]| -> Vec<usize> {
        cells.iter().copied().filter(|&i| position.is_empty_cell(i)).collect()
    };
    let free_centers = free(&centers);
    let free_corners = free(&corners);
    let free_others: Vec<usize> = position
        .legal_moves()
        .into_iter()
        .filter(|i| !centers.contains(i) && !corners.contains(i))
        .collect();

    let categories: Vec<(Vec<usize>, u32)> = [
        (free_centers, config.center_weight),
        (free_corners, config.corner_weight),
        (free_others, config.edge_weight),
    ]
    .into_iter()
    .filter(|(cells, weight)| !cells.is_empty() && *weight > 0)
    .collect();

    let dist = WeightedIndex::new(categories.iter().map(|(_, w)| *w)).ok()?;
    let (cells, _) = &categories[dist.sample(rng)];
    cells.choose(rng).copied()
}
