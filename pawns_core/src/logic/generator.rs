use crate::engine::Move;
use crate::logic::board::{Position, Side};
use crate::logic::rules::{candidate_targets, validate_move};

/// Enumerates legal moves and the positions they lead to.
///
/// Pawns are visited in list order and each pawn's targets in the order of
/// [`candidate_targets`], so the output order is stable for a given position.
pub struct MoveGenerator;

impl MoveGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// All legal moves of `side`.
    #[must_use]
    pub fn generate_moves(&self, position: &Position, side: Side) -> Vec<Move> {
        let mut moves = Vec::with_capacity(4 * position.pawns(side).len());
        for &from in position.pawns(side) {
            for to in candidate_targets(position, side, from).into_iter().flatten() {
                if validate_move(position, side, from, to).is_ok() {
                    moves.push(Move { from, to });
                }
            }
        }
        moves
    }

    /// Every move of the side to move paired with its successor position.
    ///
    /// Each successor already has its side to move resolved, including
    /// forced passes.
    #[must_use]
    pub fn successors(&self, position: &Position) -> Vec<(Move, Position)> {
        let side = position.to_move();
        self.generate_moves(position, side)
            .into_iter()
            .filter_map(|mv| {
                position
                    .apply_move(side, mv.from, mv.to)
                    .ok()
                    .map(|next| (mv, next))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::pawn::Pawn;

    #[test]
    fn test_initial_moves() {
        let pos = Position::new(Side::Human, 8).unwrap();
        let generator = MoveGenerator::new();
        let moves = generator.generate_moves(&pos, Side::Human);
        assert_eq!(moves.len(), 16);
        assert_eq!(
            moves[0],
            Move {
                from: Pawn::new(1, 1),
                to: Pawn::new(1, 2)
            }
        );
        assert_eq!(
            moves[1],
            Move {
                from: Pawn::new(1, 1),
                to: Pawn::new(1, 3)
            }
        );
        // machine pawns are listed from column 8 down
        let machine = generator.generate_moves(&pos, Side::Machine);
        assert_eq!(machine.len(), 16);
        assert_eq!(machine[0].from, Pawn::new(8, 8));
    }

    #[test]
    fn test_capture_order_follows_forward_direction() {
        let pos = Position::from_parts(
            8,
            Side::Human,
            Side::Machine,
            vec![Pawn::new(3, 4), Pawn::new(5, 4), Pawn::new(4, 4)],
            vec![Pawn::new(4, 5)],
        )
        .unwrap();
        let moves = MoveGenerator::new().generate_moves(&pos, Side::Machine);
        // for the machine "col - forward" is the higher column
        let targets: Vec<Pawn> = moves.iter().map(|m| m.to).collect();
        assert_eq!(targets, vec![Pawn::new(5, 4), Pawn::new(3, 4)]);
    }

    #[test]
    fn test_successors_resolve_turn() {
        let pos = Position::new(Side::Human, 8).unwrap();
        let successors = MoveGenerator::new().successors(&pos);
        assert_eq!(successors.len(), 16);
        for (mv, next) in &successors {
            assert_eq!(next.to_move(), Side::Machine);
            assert_eq!(next.slot(mv.to), Side::Human);
            assert_eq!(next.slot(mv.from), Side::None);
        }
    }

    #[test]
    fn test_no_successors_when_stuck() {
        let pos = Position::from_parts(
            8,
            Side::Human,
            Side::Human,
            vec![Pawn::new(1, 4)],
            vec![Pawn::new(1, 5)],
        )
        .unwrap();
        let generator = MoveGenerator::new();
        assert!(generator.successors(&pos).is_empty());
        assert!(generator.generate_moves(&pos, Side::Human).is_empty());
    }
}
