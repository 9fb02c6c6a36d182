use crate::logic::board::Position;
use crate::logic::pawn::Pawn;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod eval;
pub mod search;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Pawn,
    pub to: Pawn,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
    /// Score of the chosen move, from the machine's point of view.
    pub score: f64,
    pub time_ms: u64,
}

/// Scores a position from the machine's point of view.
///
/// `ply` is the number of half-moves between the search root and
/// `position`; it is at least 1 for every scored node.
pub trait Evaluator {
    fn evaluate(&self, position: &Position, ply: u32) -> f64;
}

pub trait Searcher {
    /// Picks the machine's move on `position`, looking `depth` plies ahead.
    ///
    /// Returns `None` if the side to move has no legal move.
    fn search(&mut self, position: &Position, depth: u8) -> Option<(Move, Position, SearchStats)>;
}
