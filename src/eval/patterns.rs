//! Score constants for line evaluation
//!
//! Heuristic values stay several orders of magnitude below [`WIN_SCORE`], so
//! a static evaluation can never be mistaken for a decided game.

/// Base score of a decided game. Search adds the remaining depth so that
/// quicker wins (and slower losses) are preferred.
pub const WIN_SCORE: i32 = 100_000_000;

/// Bonus per center cell held.
pub const CENTER_BONUS: i32 = 3;

/// Weight of a line holding `count` marks of a single player.
///
/// Grows as `4^count`: one mark is worth 4, eight marks (one short of a
/// 9x9 win) 65_536. With at most 20 lines per board the total stays
/// below 1.4M, far from [`WIN_SCORE`].
#[inline]
pub const fn line_weight(count: usize) -> i32 {
    if count == 0 {
        0
    } else {
        1 << (2 * count)
    }
}
