use super::*;
use crate::error::EngineError;
use test_case::test_case;

#[test]
fn test_mark_opponent() {
    assert_eq!(Mark::X.opponent(), Mark::O);
    assert_eq!(Mark::O.opponent(), Mark::X);
    assert_eq!(Mark::Empty.opponent(), Mark::Empty);
}

#[test]
fn test_mark_chars() {
    assert_eq!(Mark::from_char('x'), Some(Mark::X));
    assert_eq!(Mark::from_char('O'), Some(Mark::O));
    assert_eq!(Mark::from_char('_'), Some(Mark::Empty));
    assert_eq!(Mark::from_char('7'), None);
    assert_eq!(Mark::X.to_char(), 'X');
    assert_eq!(Mark::Empty.to_char(), '.');
}

#[test_case(3)]
#[test_case(4)]
#[test_case(5)]
#[test_case(9)]
fn test_empty_position(size: usize) {
    let pos = Position::empty(size, Mark::X).unwrap();
    assert_eq!(pos.size(), size);
    assert_eq!(pos.win_length(), size);
    assert_eq!(pos.cell_count(), size * size);
    assert_eq!(pos.empty_count(), size * size);
    assert_eq!(pos.legal_moves().len(), size * size);
    assert_eq!(pos.to_move(), Mark::X);
    assert_eq!(pos.opponent(), Mark::O);
}

#[test_case(8, EngineError::InvalidLength { len: 8 } ; "not square")]
#[test_case(80, EngineError::InvalidLength { len: 80 } ; "one short of 9x9")]
#[test_case(82, EngineError::InvalidLength { len: 82 } ; "one past 9x9")]
#[test_case(4, EngineError::UnsupportedSize { size: 2 } ; "too small")]
#[test_case(100, EngineError::UnsupportedSize { size: 10 } ; "too large")]
#[test_case(0, EngineError::UnsupportedSize { size: 0 } ; "no cells")]
fn test_rejects_bad_length(len: usize, expected: EngineError) {
    let err = Position::new(vec![Mark::Empty; len], Mark::X).unwrap_err();
    assert_eq!(err, expected);
}

#[test]
fn test_rejects_empty_mover() {
    let err = Position::new(vec![Mark::Empty; 9], Mark::Empty).unwrap_err();
    assert_eq!(err, EngineError::InvalidTurn);
}

#[test]
fn test_play_is_persistent() {
    let pos = Position::empty(3, Mark::X).unwrap();
    let next = pos.play(4).unwrap();

    // Original is untouched
    assert_eq!(pos.get(4), Some(Mark::Empty));
    assert_eq!(pos.to_move(), Mark::X);

    assert_eq!(next.get(4), Some(Mark::X));
    assert_eq!(next.to_move(), Mark::O);
    assert_eq!(next.empty_count(), 8);
}

#[test]
fn test_play_rejects_illegal() {
    let pos = Position::empty(3, Mark::X).unwrap().play(0).unwrap();
    assert_eq!(pos.play(0).unwrap_err(), EngineError::CellOccupied { index: 0 });
    assert_eq!(
        pos.play(9).unwrap_err(),
        EngineError::CellOutOfRange { index: 9, cells: 9 }
    );
}

#[test]
fn test_parse_and_display() {
    let pos = Position::parse("XX. OO. ...", Mark::X).unwrap();
    assert_eq!(pos.get(0), Some(Mark::X));
    assert_eq!(pos.get(3), Some(Mark::O));
    assert_eq!(pos.legal_moves(), vec![2, 5, 6, 7, 8]);
    assert_eq!(pos.to_string(), "XX.\nOO.\n...");
}

#[test]
fn test_parse_rejects_unknown_char() {
    let err = Position::parse("XX?OO....", Mark::X).unwrap_err();
    assert_eq!(err, EngineError::InvalidMark { ch: '?' });
}

#[test]
fn test_from_str_infers_mover() {
    let pos: Position = "X........".parse().unwrap();
    assert_eq!(pos.to_move(), Mark::O);
    let pos: Position = "XO.......".parse().unwrap();
    assert_eq!(pos.to_move(), Mark::X);
}

#[test]
fn test_row_col_conversion() {
    let pos = Position::empty(5, Mark::X).unwrap();
    assert_eq!(pos.row_col(12), (2, 2));
    assert_eq!(pos.index(2, 2), 12);
    assert_eq!(pos.index(4, 0), 20);
}

#[test]
fn test_with_to_move() {
    let pos = Position::empty(4, Mark::X).unwrap();
    let swapped = pos.with_to_move(Mark::O).unwrap();
    assert_eq!(swapped.to_move(), Mark::O);
    assert_eq!(swapped.cells(), pos.cells());
    assert!(pos.with_to_move(Mark::Empty).is_err());
}
