use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{Position, Side};
use crate::logic::pawn::Pawn;
use crate::logic::rules::winner;
use std::sync::Arc;

/// Five-term heuristic, higher is better for the machine.
///
/// Every term pits the two sides against each other and multiplies the
/// unfavourable side by `opponent_weight`: human material, advancement and
/// wins weigh heavier, as do endangered and isolated machine pawns.
pub struct HeuristicEvaluator {
    config: Arc<EngineConfig>,
}

#[allow(clippy::cast_precision_loss)]
fn count(n: usize) -> f64 {
    n as f64
}

/// Whether `attacker`, owned by `owner`, covers `target` diagonally.
fn can_beat(attacker: Pawn, owner: Side, target: Pawn, size: usize) -> bool {
    let forward = owner.forward();
    attacker.offset(-1, forward, size) == Some(target)
        || attacker.offset(1, forward, size) == Some(target)
}

impl HeuristicEvaluator {
    #[must_use]
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    fn weight(&self) -> f64 {
        self.config.opponent_weight
    }

    /// Machine pawns minus weighted human pawns.
    #[must_use]
    pub fn material(&self, position: &Position) -> f64 {
        count(position.pawns(Side::Machine).len())
            - self.weight() * count(position.pawns(Side::Human).len())
    }

    /// Rows travelled from the home rank, summed per side.
    #[must_use]
    pub fn advancement(&self, position: &Position) -> f64 {
        let travelled = |side: Side| -> f64 {
            let home = position.home_row(side);
            count(
                position
                    .pawns(side)
                    .iter()
                    .map(|p| p.row.abs_diff(home))
                    .sum(),
            )
        };
        travelled(Side::Machine) - self.weight() * travelled(Side::Human)
    }

    /// A pawn is in danger if an opponent pawn could take it and no friendly
    /// pawn could take back on its slot.
    #[must_use]
    pub fn in_danger(position: &Position, side: Side, pawn: Pawn) -> bool {
        let size = position.size();
        let enemy = side.opponent();
        let threatened = position
            .pawns(enemy)
            .iter()
            .any(|&a| can_beat(a, enemy, pawn, size));
        let covered = position
            .pawns(side)
            .iter()
            .any(|&f| can_beat(f, side, pawn, size));
        threatened && !covered
    }

    /// Endangered human pawns minus weighted endangered machine pawns.
    #[must_use]
    pub fn threat(&self, position: &Position) -> f64 {
        let endangered = |side: Side| {
            count(
                position
                    .pawns(side)
                    .iter()
                    .filter(|&&p| Self::in_danger(position, side, p))
                    .count(),
            )
        };
        endangered(Side::Human) - self.weight() * endangered(Side::Machine)
    }

    /// Isolated human pawns minus weighted isolated machine pawns.
    #[must_use]
    pub fn isolation(&self, position: &Position) -> f64 {
        let isolated = |side: Side| {
            let pawns = position.pawns(side);
            count(
                pawns
                    .iter()
                    .filter(|p| !pawns.iter().any(|q| p.is_next_to(*q)))
                    .count(),
            )
        };
        isolated(Side::Human) - self.weight() * isolated(Side::Machine)
    }

    /// Bonus for a decided position, shrinking with the ply it occurs at.
    #[must_use]
    pub fn victory(&self, position: &Position, ply: u32) -> f64 {
        let bonus = f64::from(self.config.victory_score / ply.max(1));
        match winner(position) {
            Side::Machine => bonus,
            Side::Human => -self.weight() * bonus,
            Side::None => 0.0,
        }
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&self, position: &Position, ply: u32) -> f64 {
        self.material(position)
            + self.advancement(position)
            + self.threat(position)
            + self.isolation(position)
            + self.victory(position, ply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator() -> HeuristicEvaluator {
        HeuristicEvaluator::new(Arc::new(EngineConfig::default()))
    }

    fn duel() -> Position {
        Position::from_parts(
            8,
            Side::Human,
            Side::Human,
            vec![Pawn::new(4, 4)],
            vec![Pawn::new(5, 5)],
        )
        .unwrap()
    }

    #[test]
    fn test_initial_position() {
        let pos = Position::new(Side::Human, 8).unwrap();
        let eval = evaluator();
        assert!((eval.material(&pos) - (8.0 - 12.0)).abs() < f64::EPSILON);
        assert!(eval.advancement(&pos).abs() < f64::EPSILON);
        assert!(eval.threat(&pos).abs() < f64::EPSILON);
        assert!(eval.isolation(&pos).abs() < f64::EPSILON);
        assert!((eval.evaluate(&pos, 1) + 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duel_terms() {
        let pos = duel();
        let eval = evaluator();
        assert!((eval.material(&pos) + 0.5).abs() < f64::EPSILON);
        // machine 3 rows down, human 3 rows up
        assert!((eval.advancement(&pos) + 1.5).abs() < f64::EPSILON);
        // each pawn attacks the other, neither is covered
        assert!(HeuristicEvaluator::in_danger(&pos, Side::Human, Pawn::new(4, 4)));
        assert!(HeuristicEvaluator::in_danger(&pos, Side::Machine, Pawn::new(5, 5)));
        assert!((eval.threat(&pos) + 0.5).abs() < f64::EPSILON);
        assert!((eval.isolation(&pos) + 0.5).abs() < f64::EPSILON);
        assert!(eval.victory(&pos, 1).abs() < f64::EPSILON);
        assert!((eval.evaluate(&pos, 1) + 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_covered_pawn_is_safe() {
        let pos = Position::from_parts(
            8,
            Side::Human,
            Side::Human,
            vec![Pawn::new(4, 4), Pawn::new(3, 3)],
            vec![Pawn::new(5, 5)],
        )
        .unwrap();
        assert!(!HeuristicEvaluator::in_danger(&pos, Side::Human, Pawn::new(4, 4)));
        assert!(HeuristicEvaluator::in_danger(&pos, Side::Machine, Pawn::new(5, 5)));
    }

    #[test]
    fn test_victory_shrinks_with_ply() {
        let eval = evaluator();
        let machine_won = Position::from_parts(
            8,
            Side::Human,
            Side::Human,
            vec![Pawn::new(4, 4)],
            vec![Pawn::new(5, 1)],
        )
        .unwrap();
        assert!((eval.victory(&machine_won, 1) - 5000.0).abs() < f64::EPSILON);
        assert!((eval.victory(&machine_won, 2) - 2500.0).abs() < f64::EPSILON);
        // integer division before weighting
        assert!((eval.victory(&machine_won, 3) - 1666.0).abs() < f64::EPSILON);

        let human_won = Position::from_parts(
            8,
            Side::Human,
            Side::Human,
            vec![Pawn::new(4, 8)],
            vec![Pawn::new(5, 5)],
        )
        .unwrap();
        assert!((eval.victory(&human_won, 1) + 7500.0).abs() < f64::EPSILON);
        assert!(eval.victory(&human_won, 1) < eval.victory(&human_won, 2));
    }
}
