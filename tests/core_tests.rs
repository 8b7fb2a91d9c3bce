use checkers_engine::movegen;
use checkers_engine::{Direction, Move, Position, Side};

#[test]
fn test_opening_sequence_keeps_invariants() {
    // Play a fixed short opening and watch the basics hold
    let mut pos = Position::starting_position();
    let line = [
        Move::new(14, Direction::ForwardRight, false, false),
        Move::new(3, Direction::BackwardLeft, false, false),
        Move::new(20, Direction::ForwardRight, false, false),
        Move::new(29, Direction::BackwardLeft, false, false),
    ];

    let mut side = Side::Red;
    for mv in line {
        assert!(movegen::is_legal(&pos, mv), "{mv} should be legal");
        assert_eq!(pos.side_to_move(), side);
        pos = pos.apply(mv);
        side = side.opposite();
        assert_eq!(pos.occupied_all().count(), 24);
    }
}

#[test]
fn test_fingerprints_distinguish_positions_along_a_game() {
    let mut pos = Position::starting_position();
    let mut seen = std::collections::HashSet::new();
    for _ in 0..12 {
        assert!(seen.insert(pos.fingerprint()), "fingerprint repeated");
        let moves = movegen::legal_moves(&pos);
        if moves.is_empty() {
            break;
        }
        let mut mv = moves[0];
        pos = pos.apply(mv);
        while mv.continues_capture() {
            mv = movegen::jumps_from(&pos, mv.dest())[0];
            pos = pos.apply(mv);
        }
    }
}

#[test]
fn test_mirrored_game_stays_mirrored() {
    let image_of = |mv: Move| {
        Move::new(
            checkers_engine::core::rotate_square(mv.src()),
            mv.direction().opposite(),
            mv.is_jump(),
            mv.continues_capture(),
        )
    };

    let mut pos = Position::starting_position();
    for _ in 0..12 {
        let moves = movegen::legal_moves(&pos);
        if moves.is_empty() {
            break;
        }
        let mut mv = moves[0];
        // Play the whole turn hop by hop on both boards
        loop {
            let mirrored_next = pos.mirrored().apply(image_of(mv));
            pos = pos.apply(mv);
            assert_eq!(mirrored_next, pos.mirrored());
            if !mv.continues_capture() {
                break;
            }
            mv = movegen::jumps_from(&pos, mv.dest())[0];
        }
    }
}
