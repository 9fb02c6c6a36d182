use pawns_core::logic::board::{Position, Side};
use pawns_core::logic::generator::MoveGenerator;
use pawns_core::logic::rules::{can_move, is_game_over, validate_move, winner, MoveKind};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn check_invariants(pos: &Position) {
    let human = pos.pawns(Side::Human);
    let machine = pos.pawns(Side::Machine);
    assert!(human.iter().all(|p| !machine.contains(p)), "overlap in\n{pos}");
    assert!(human
        .iter()
        .chain(machine)
        .all(|p| p.in_bounds(pos.size())));
    match pos.to_move() {
        Side::None => {
            assert!(!can_move(pos, Side::Human) && !can_move(pos, Side::Machine));
        }
        side => assert!(can_move(pos, side), "{side} to move without a move"),
    }
    assert_eq!(is_game_over(pos), is_game_over(pos));
}

fn play_out(size: usize, opener: Side, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let generator = MoveGenerator::new();
    let mut pos = Position::new(opener, size).unwrap();
    check_invariants(&pos);

    for _ in 0..4 * size * size {
        if is_game_over(&pos) {
            break;
        }
        let side = pos.to_move();
        let successors = generator.successors(&pos);
        let Some((mv, next)) = successors.choose(&mut rng) else {
            panic!("{side} to move but no successors in\n{pos}");
        };
        let kind = validate_move(&pos, side, mv.from, mv.to).unwrap();
        let opponent = side.opponent();
        match kind {
            MoveKind::Capture => {
                assert_eq!(pos.slot(mv.to), opponent);
                assert!(!next.pawns(opponent).contains(&mv.to));
                assert_eq!(
                    next.pawns(opponent).len() + 1,
                    pos.pawns(opponent).len()
                );
            }
            MoveKind::Step | MoveKind::DoubleStep => {
                assert_eq!(pos.slot(mv.to), Side::None);
                assert_eq!(mv.from.col, mv.to.col);
                let rows = if kind == MoveKind::Step { 1 } else { 2 };
                assert_eq!(
                    mv.to.row as isize - mv.from.row as isize,
                    rows * side.forward()
                );
                assert_eq!(next.pawns(opponent), pos.pawns(opponent));
            }
        }
        assert_eq!(next.slot(mv.to), side);
        assert_eq!(next.slot(mv.from), Side::None);
        check_invariants(next);
        pos = next.clone();
    }

    assert!(is_game_over(&pos), "game did not finish:\n{pos}");
    if winner(&pos) == Side::None {
        assert!(!can_move(&pos, Side::Human) && !can_move(&pos, Side::Machine));
    }
}

#[test]
fn test_random_games_keep_invariants() {
    for seed in 0..40 {
        play_out(8, Side::Human, seed);
        play_out(8, Side::Machine, seed);
    }
}

#[test]
fn test_random_games_on_small_and_odd_boards() {
    for seed in 0..40 {
        play_out(4, Side::Human, seed);
        play_out(5, Side::Machine, seed);
        play_out(7, Side::Human, seed);
    }
}
