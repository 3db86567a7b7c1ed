//! Move ordering for alpha-beta pruning
//!
//! Central cells take part in more lines, so they are tried first. Cells on
//! either long diagonal get a flat bonus. Ordering only affects how much of
//! the tree gets pruned, never the value the search returns.

/// Priority per unit of (doubled) Manhattan distance closer to the center
const DISTANCE_SCALE: i32 = 10;

/// Flat bonus for a cell on the main or anti diagonal
const DIAGONAL_BONUS: i32 = 25;

/// Ordering priority of `index` on a `size` x `size` board.
///
/// Distances are measured in doubled coordinates so that even-sized boards,
/// whose center falls between cells, still have an exact center.
#[inline]
pub fn move_priority(size: usize, index: usize) -> i32 {
    let (row, col) = ((index / size) as i32, (index % size) as i32);
    let last = size as i32 - 1;
    let dist = (2 * row - last).abs() + (2 * col - last).abs();
    let max_dist = 2 * last;

    let mut priority = (max_dist - dist) * DISTANCE_SCALE;
    if row == col || row + col == last {
        priority += DIAGONAL_BONUS;
    }
    priority
}

/// Sort moves by descending priority. Equal priorities keep input order.
pub fn order_moves(size: usize, moves: &[usize]) -> Vec<usize> {
    let mut ordered = moves.to_vec();
    // sort_by_key is stable
    ordered.sort_by_key(|&m| std::cmp::Reverse(move_priority(size, m)));
    ordered
}
