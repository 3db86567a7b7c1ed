//! Static evaluation of non-terminal positions
//!
//! Used at depth-exhausted leaves of the search and by the medium tier.
//! Terminal positions are scored by the search itself, never here.

use crate::board::{Mark, Position};
use crate::rules::winning_lines;

use super::patterns::{line_weight, CENTER_BONUS};

/// Evaluate the board from the perspective of `player`.
///
/// Every line held by only one player adds [`line_weight`] of its mark
/// count to that player's side; lines with both marks are dead and score
/// nothing. Center cells add [`CENTER_BONUS`].
///
/// The result is antisymmetric, as negamax requires:
/// `evaluate(p, X) == -evaluate(p, O)`.
#[must_use]
pub fn evaluate(position: &Position, player: Mark) -> i32 {
    let opponent = player.opponent();
    let cells = position.cells();
    let mut score = 0;

    for line in winning_lines(position.size()) {
        let mut mine = 0;
        let mut theirs = 0;
        for &i in line {
            match cells[i] {
                m if m == player => mine += 1,
                m if m == opponent => theirs += 1,
                _ => {}
            }
        }
        if theirs == 0 {
            score += line_weight(mine);
        } else if mine == 0 {
            score -= line_weight(theirs);
        }
    }

    for i in center_cells(position.size()) {
        match cells[i] {
            m if m == player => score += CENTER_BONUS,
            m if m == opponent => score -= CENTER_BONUS,
            _ => {}
        }
    }

    score
}

/// Center cell indices: one for odd sizes, the middle four for even sizes.
pub fn center_cells(size: usize) -> Vec<usize> {
    let mid = size / 2;
    if size % 2 == 1 {
        vec![mid * size + mid]
    } else {
        vec![
            (mid - 1) * size + (mid - 1),
            (mid - 1) * size + mid,
            mid * size + (mid - 1),
            mid * size + mid,
        ]
    }
}

/// The four corner indices.
pub fn corner_cells(size: usize) -> [usize; 4] {
    [0, size - 1, size * (size - 1), size * size - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_empty_board_is_zero() {
        for size in 3..=9 {
            let pos = Position::empty(size, Mark::X).unwrap();
            assert_eq!(evaluate(&pos, Mark::X), 0);
        }
    }

    #[test_case("X........" ; "corner")]
    #[test_case("....X...." ; "center")]
    #[test_case("XO..X...." ; "mixed")]
    #[test_case("X.O.X..O." ; "crowded")]
    fn test_antisymmetric(board: &str) {
        let pos = Position::parse(board, Mark::O).unwrap();
        assert_eq!(evaluate(&pos, Mark::X), -evaluate(&pos, Mark::O));
    }

    #[test]
    fn test_center_beats_edge() {
        let center = Position::parse("....X....", Mark::O).unwrap();
        let edge = Position::parse(".X.......", Mark::O).unwrap();
        assert!(evaluate(&center, Mark::X) > evaluate(&edge, Mark::X));
    }

    #[test]
    fn test_more_marks_score_higher() {
        let one = Position::parse("X........", Mark::O).unwrap();
        let two = Position::parse("XX.......", Mark::O).unwrap();
        assert!(evaluate(&two, Mark::X) > evaluate(&one, Mark::X));
    }

    #[test]
    fn test_blocked_line_scores_nothing() {
        // Top row holds both marks: dead line
        let pos = Position::parse("XO.......", Mark::X).unwrap();
        let lines = winning_lines(3);
        let top = &lines[0];
        assert!(top.contains(&0) && top.contains(&1));
        // X at 0 still owns column 0 and the main diagonal, O owns column 1
        assert_eq!(evaluate(&pos, Mark::X), 2 * line_weight(1) - line_weight(1));
    }

    #[test_case(3, vec![4])]
    #[test_case(4, vec![5, 6, 9, 10])]
    #[test_case(5, vec![12])]
    #[test_case(6, vec![14, 15, 20, 21])]
    fn test_center_cells(size: usize, expected: Vec<usize>) {
        assert_eq!(center_cells(size), expected);
    }

    #[test]
    fn test_corner_cells() {
        assert_eq!(corner_cells(3), [0, 2, 6, 8]);
        assert_eq!(corner_cells(4), [0, 3, 12, 15]);
    }
}
