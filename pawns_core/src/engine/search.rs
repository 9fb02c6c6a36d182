use crate::engine::config::EngineConfig;
use crate::engine::eval::HeuristicEvaluator;
use crate::engine::{Evaluator, Move, SearchStats, Searcher};
use crate::logic::board::{Position, Side};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::{self, GameError};
use std::sync::Arc;
use std::time::Instant;

/// Exhaustive minimax over every line up to the requested depth.
///
/// No pruning and no move ordering: each node's score is its own heuristic
/// value plus the best (machine to move) or worst (otherwise) child score.
pub struct MinimaxEngine {
    evaluator: HeuristicEvaluator,
    generator: MoveGenerator,
    nodes_searched: u64,
}

impl MinimaxEngine {
    #[must_use]
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: HeuristicEvaluator::new(config),
            generator: MoveGenerator::new(),
            nodes_searched: 0,
        }
    }

    /// Plays the machine's move and returns the resulting position along
    /// with the move chosen.
    ///
    /// If the machine has no legal move the board is returned as is, with
    /// the turn passed on, and the move is `None`.
    pub fn compute_machine_move(
        &mut self,
        position: &Position,
        depth: u8,
    ) -> Result<(Position, Option<Move>), GameError> {
        rules::check_turn(position, Side::Machine)?;
        if depth == 0 {
            return Err(GameError::InvalidLevel(depth));
        }
        Ok(match self.search(position, depth) {
            Some((mv, next, stats)) => {
                log::info!(
                    "machine plays {mv} (score {}, {} nodes)",
                    stats.score,
                    stats.nodes
                );
                (next, Some(mv))
            }
            None => {
                log::info!("machine has no legal move and passes");
                (position.with_turn_passed(Side::Machine), None)
            }
        })
    }

    /// Score of the subtree under `position`, which sits `ply` half-moves
    /// below the root.
    fn minimax(&mut self, position: &Position, ply: u32, depth: u32) -> f64 {
        self.nodes_searched += 1;
        let own = self.evaluator.evaluate(position, ply);
        if ply >= depth || rules::is_game_over(position) {
            return own;
        }

        let children = self.generator.successors(position);
        if children.is_empty() {
            return own;
        }

        let maximize = position.to_move() == Side::Machine;
        let mut best = if maximize {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        for (_, child) in &children {
            let score = self.minimax(child, ply + 1, depth);
            if (maximize && score > best) || (!maximize && score < best) {
                best = score;
            }
        }
        own + best
    }
}

impl Searcher for MinimaxEngine {
    fn search(&mut self, position: &Position, depth: u8) -> Option<(Move, Position, SearchStats)> {
        self.nodes_searched = 0;
        let start = Instant::now();
        let max_depth = u32::from(depth);

        let mut best: Option<(Move, Position, f64)> = None;
        for (mv, child) in self.generator.successors(position) {
            let score = self.minimax(&child, 1, max_depth);
            log::trace!("candidate {mv}: {score}");
            // ties keep the first candidate
            if best.as_ref().map_or(true, |(_, _, s)| score > *s) {
                best = Some((mv, child, score));
            }
        }

        let (mv, next, score) = best?;
        let stats = SearchStats {
            depth,
            nodes: self.nodes_searched,
            score,
            time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        log::debug!(
            "search depth={} nodes={} score={} time={}ms best={}",
            stats.depth,
            stats.nodes,
            stats.score,
            stats.time_ms,
            mv
        );
        Some((mv, next, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::pawn::Pawn;

    fn engine() -> MinimaxEngine {
        MinimaxEngine::new(Arc::new(EngineConfig::default()))
    }

    #[test]
    fn test_node_count_is_full_width() {
        let pos = Position::new(Side::Machine, 8).unwrap();
        let mut engine = engine();

        let (_, _, stats) = engine.search(&pos, 1).unwrap();
        assert_eq!(stats.nodes, 16);

        let (_, _, stats) = engine.search(&pos, 2).unwrap();
        assert_eq!(stats.nodes, 16 + 16 * 16);
    }

    #[test]
    fn test_ties_keep_first_enumerated_move() {
        // both captures lead to mirror-image positions with equal scores
        let pos = Position::from_parts(
            8,
            Side::Human,
            Side::Machine,
            vec![Pawn::new(3, 3), Pawn::new(5, 3)],
            vec![Pawn::new(4, 4)],
        )
        .unwrap();
        let (mv, _, _) = engine().search(&pos, 1).unwrap();
        assert_eq!(mv.from, Pawn::new(4, 4));
        assert_eq!(mv.to, Pawn::new(5, 3));
    }

    #[test]
    fn test_no_move_means_pass() {
        let pos = Position::from_parts(
            8,
            Side::Human,
            Side::Machine,
            vec![Pawn::new(1, 4), Pawn::new(6, 2)],
            vec![Pawn::new(1, 5)],
        )
        .unwrap();
        let mut engine = engine();
        assert!(engine.search(&pos, 2).is_none());

        let (next, mv) = engine.compute_machine_move(&pos, 2).unwrap();
        assert_eq!(mv, None);
        assert_eq!(next.pawns(Side::Human), pos.pawns(Side::Human));
        assert_eq!(next.pawns(Side::Machine), pos.pawns(Side::Machine));
        assert_eq!(next.to_move(), Side::Human);
    }

    #[test]
    fn test_compute_machine_move_preconditions() {
        let mut engine = engine();
        let human_turn = Position::new(Side::Human, 8).unwrap();
        assert_eq!(
            engine.compute_machine_move(&human_turn, 2),
            Err(GameError::NotYourTurn {
                expected: Side::Machine,
                actual: Side::Human
            })
        );

        let machine_turn = Position::new(Side::Machine, 8).unwrap();
        assert_eq!(
            engine.compute_machine_move(&machine_turn, 0),
            Err(GameError::InvalidLevel(0))
        );

        let finished = Position::from_parts(
            8,
            Side::Human,
            Side::Machine,
            vec![Pawn::new(2, 8)],
            vec![Pawn::new(5, 5)],
        )
        .unwrap();
        assert_eq!(
            engine.compute_machine_move(&finished, 2),
            Err(GameError::GameOver)
        );
    }

    #[test]
    fn test_machine_move_advances_turn() {
        let pos = Position::new(Side::Machine, 8).unwrap();
        let (next, mv) = engine().compute_machine_move(&pos, 2).unwrap();
        assert_eq!(next.to_move(), Side::Human);
        assert!(mv.is_some_and(|mv| next.slot(mv.to) == Side::Machine));
        assert_eq!(next.pawns(Side::Machine).len(), 8);
        assert_eq!(
            next.pawns(Side::Machine)
                .iter()
                .filter(|p| p.row != 8)
                .count(),
            1
        );
    }
}
