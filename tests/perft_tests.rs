use checkers_engine::movegen::perft;
use checkers_engine::Position;

#[test]
fn test_perft_startpos_depth_1() {
    assert_eq!(perft(&Position::starting_position(), 1), 7);
}

#[test]
fn test_perft_startpos_depth_2() {
    assert_eq!(perft(&Position::starting_position(), 2), 49);
}

#[test]
fn test_perft_startpos_depth_3() {
    assert_eq!(perft(&Position::starting_position(), 3), 302);
}

#[test]
fn test_perft_startpos_depth_4() {
    assert_eq!(perft(&Position::starting_position(), 4), 1469);
}

#[test]
fn test_perft_startpos_depth_5() {
    assert_eq!(perft(&Position::starting_position(), 5), 7361);
}

#[test]
fn test_perft_startpos_depth_6() {
    assert_eq!(perft(&Position::starting_position(), 6), 36768);
}

#[test]
fn test_perft_startpos_depth_7() {
    assert_eq!(perft(&Position::starting_position(), 7), 179740);
}

#[test]
fn test_perft_startpos_depth_8() {
    assert_eq!(perft(&Position::starting_position(), 8), 845931);
}

#[test]
fn test_perft_mirrored_startpos_matches() {
    // The rotated board with colors exchanged is the same game
    let pos = Position::starting_position().mirrored();
    assert_eq!(perft(&pos, 5), 7361);
}
