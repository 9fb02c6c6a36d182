use crate::logic::board::{Position, Side, MIN_SIZE};
use crate::logic::pawn::Pawn;
use thiserror::Error;

/// Caller misuse: the operation was rejected before any rule was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("coordinate ({col},{row}) is off the board: (1,...,{size}) expected")]
    OutOfBounds { col: usize, row: usize, size: usize },
    #[error("the game is over")]
    GameOver,
    #[error("it is the {actual}'s turn, not the {expected}'s")]
    NotYourTurn { expected: Side, actual: Side },
    #[error("board size {0} is too small, at least {} expected", MIN_SIZE)]
    BoardTooSmall(usize),
    #[error("invalid level {0}, a positive search depth expected")]
    InvalidLevel(u8),
    #[error("invalid pawn layout: {0}")]
    InvalidLayout(&'static str),
    #[error("only the human or the machine can open a game")]
    NoSuchSide,
}

/// Why a move was refused. Illegal moves are a normal part of play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no pawn of the moving side on the source slot")]
    NoPawnAtSource,
    #[error("the target slot is occupied")]
    TargetOccupied,
    #[error("no opponent pawn to capture on the target slot")]
    NothingToCapture,
    #[error("pawns cannot move that way")]
    InvalidMovePattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Step,
    DoubleStep,
    Capture,
}

/// Validates raw 1-based coordinates against the board size.
pub const fn checked_pawn(col: usize, row: usize, size: usize) -> Result<Pawn, GameError> {
    let pawn = Pawn::new(col, row);
    if pawn.in_bounds(size) {
        Ok(pawn)
    } else {
        Err(GameError::OutOfBounds { col, row, size })
    }
}

/// Checks whether `side` may move `from` -> `to` on `position`.
///
/// The side to move stored in the position is not consulted; callers that
/// care about turn order go through [`check_turn`] first.
pub fn validate_move(
    position: &Position,
    side: Side,
    from: Pawn,
    to: Pawn,
) -> Result<MoveKind, MoveError> {
    if !position.pawns(side).contains(&from) {
        return Err(MoveError::NoPawnAtSource);
    }
    let size = position.size();
    let forward = side.forward();
    let empty = position.slot(to) == Side::None;

    if from.offset(0, forward, size) == Some(to) {
        return if empty {
            Ok(MoveKind::Step)
        } else {
            Err(MoveError::TargetOccupied)
        };
    }
    // Only the target has to be free, the slot jumped over is not inspected.
    if from.row == position.home_row(side) && from.offset(0, 2 * forward, size) == Some(to) {
        return if empty {
            Ok(MoveKind::DoubleStep)
        } else {
            Err(MoveError::TargetOccupied)
        };
    }
    if from.offset(-1, forward, size) == Some(to) || from.offset(1, forward, size) == Some(to) {
        let owner = position.slot(to);
        return if owner == side {
            Err(MoveError::TargetOccupied)
        } else if owner == side.opponent() {
            Ok(MoveKind::Capture)
        } else {
            Err(MoveError::NothingToCapture)
        };
    }
    Err(MoveError::InvalidMovePattern)
}

/// The (at most four) slots a pawn could move to, in enumeration order:
/// capture toward `col - forward`, single step, double step, capture toward
/// `col + forward`.
#[must_use]
pub fn candidate_targets(position: &Position, side: Side, from: Pawn) -> [Option<Pawn>; 4] {
    let size = position.size();
    let forward = side.forward();
    [
        from.offset(-forward, forward, size),
        from.offset(0, forward, size),
        from.offset(0, 2 * forward, size),
        from.offset(forward, forward, size),
    ]
}

#[must_use]
pub fn can_pawn_move(position: &Position, side: Side, from: Pawn) -> bool {
    candidate_targets(position, side, from)
        .into_iter()
        .flatten()
        .any(|to| validate_move(position, side, from, to).is_ok())
}

/// True if at least one pawn of `side` has a legal destination.
#[must_use]
pub fn can_move(position: &Position, side: Side) -> bool {
    position
        .pawns(side)
        .iter()
        .any(|&p| can_pawn_move(position, side, p))
}

/// Who moves after `mover` has moved (or passed).
///
/// Normally the opponent; the mover again if the opponent is stuck;
/// `Side::None` if both are stuck.
#[must_use]
pub fn next_to_move(position: &Position, mover: Side) -> Side {
    let next = mover.opponent();
    if can_move(position, next) {
        next
    } else if can_move(position, mover) {
        mover
    } else {
        Side::None
    }
}

fn reached_goal(position: &Position, side: Side) -> bool {
    let goal = position.goal_row(side);
    position.pawns(side).iter().any(|p| p.row == goal)
}

#[must_use]
pub fn is_game_over(position: &Position) -> bool {
    if !can_move(position, Side::Human) && !can_move(position, Side::Machine) {
        return true;
    }
    if position.pawns(Side::Human).is_empty() || position.pawns(Side::Machine).is_empty() {
        return true;
    }
    reached_goal(position, Side::Human) || reached_goal(position, Side::Machine)
}

/// The winning side, or `Side::None` for a draw or an unfinished game.
///
/// An empty pawn list is checked before a pawn on its goal rank, the human
/// before the machine.
#[must_use]
pub fn winner(position: &Position) -> Side {
    if position.pawns(Side::Human).is_empty() {
        return Side::Machine;
    }
    if position.pawns(Side::Machine).is_empty() {
        return Side::Human;
    }
    if reached_goal(position, Side::Human) {
        return Side::Human;
    }
    if reached_goal(position, Side::Machine) {
        return Side::Machine;
    }
    Side::None
}

/// Rejects a request to move for `side` when the game is over or it is not
/// that side's turn.
pub fn check_turn(position: &Position, side: Side) -> Result<(), GameError> {
    if is_game_over(position) {
        return Err(GameError::GameOver);
    }
    if position.to_move() != side {
        return Err(GameError::NotYourTurn {
            expected: side,
            actual: position.to_move(),
        });
    }
    Ok(())
}
