use crate::engine::config::EngineConfig;
use crate::engine::search::MinimaxEngine;
use crate::engine::Move;
use crate::logic::board::{Position, Side};
use crate::logic::pawn::Pawn;
use crate::logic::rules::{self, GameError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won(Side),
    Draw,
}

/// A live game between the human and the machine.
pub struct GameState {
    position: Position,
    level: u8,
    engine: MinimaxEngine,
    last_move: Option<Move>,
}

impl GameState {
    /// Starts a game. When the machine opens, the caller is expected to ask
    /// for [`GameState::machine_move`] next.
    pub fn new(opener: Side, size: usize, config: Arc<EngineConfig>) -> Result<Self, GameError> {
        if config.level == 0 {
            return Err(GameError::InvalidLevel(config.level));
        }
        Ok(Self {
            position: Position::new(opener, size)?,
            level: config.level,
            engine: MinimaxEngine::new(config),
            last_move: None,
        })
    }

    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    #[must_use]
    pub const fn level(&self) -> u8 {
        self.level
    }

    pub fn set_level(&mut self, level: u8) -> Result<(), GameError> {
        if level == 0 {
            return Err(GameError::InvalidLevel(level));
        }
        self.level = level;
        Ok(())
    }

    #[must_use]
    pub const fn opener(&self) -> Side {
        self.position.opener()
    }

    /// The side that moves next.
    #[must_use]
    pub const fn next(&self) -> Side {
        self.position.to_move()
    }

    #[must_use]
    pub const fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        rules::is_game_over(&self.position)
    }

    #[must_use]
    pub fn winner(&self) -> Side {
        rules::winner(&self.position)
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        if !self.is_game_over() {
            return GameStatus::Playing;
        }
        match self.winner() {
            Side::None => GameStatus::Draw,
            side => GameStatus::Won(side),
        }
    }

    pub fn slot(&self, col: usize, row: usize) -> Result<Side, GameError> {
        self.position.slot_owner(col, row)
    }

    /// Executes a human move. Returns `Ok(false)` if the move is illegal.
    pub fn make_move(
        &mut self,
        col_from: usize,
        row_from: usize,
        col_to: usize,
        row_to: usize,
    ) -> Result<bool, GameError> {
        match self
            .position
            .apply_human_move(col_from, row_from, col_to, row_to)?
        {
            Some(next) => {
                self.last_move = Some(Move {
                    from: Pawn::new(col_from, row_from),
                    to: Pawn::new(col_to, row_to),
                });
                self.position = next;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Lets the machine think and play. `Ok(None)` means it had to pass.
    pub fn machine_move(&mut self) -> Result<Option<Move>, GameError> {
        let (next, mv) = self
            .engine
            .compute_machine_move(&self.position, self.level)?;
        self.position = next;
        if mv.is_some() {
            self.last_move = mv;
        }
        Ok(mv)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.position, f)
    }
}
