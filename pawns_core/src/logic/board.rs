use crate::logic::pawn::Pawn;
use crate::logic::rules::{self, GameError, MoveError, MoveKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of columns and rows of a standard board.
pub const DEFAULT_SIZE: usize = 8;
/// Smallest board that still leaves room between the two starting ranks.
pub const MIN_SIZE: usize = 4;

/// One of the two players, or the empty sentinel.
///
/// `None` is a real value: it marks an empty slot, a drawn game, and the side
/// to move once neither player can move any more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Starts on row 1 and advances upward.
    Human,
    /// Starts on the top row and advances downward.
    Machine,
    None,
}

impl Side {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Human => Self::Machine,
            Self::Machine => Self::Human,
            Self::None => Self::None,
        }
    }

    /// Row delta of a single step forward.
    #[must_use]
    pub const fn forward(self) -> isize {
        match self {
            Self::Human => 1,
            Self::Machine => -1,
            Self::None => 0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Human => "human",
            Self::Machine => "machine",
            Self::None => "nobody",
        })
    }
}

/// Piece color. White always opens the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[must_use]
    pub fn of(side: Side, opener: Side) -> Option<Self> {
        match side {
            Side::None => None,
            s if s == opener => Some(Self::White),
            _ => Some(Self::Black),
        }
    }

    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::White => 'W',
            Self::Black => 'B',
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

/// A board snapshot.
///
/// Positions are never changed once other holders may see them: every move
/// produces a fresh successor, so sibling branches of a search tree never
/// alias each other. Pawn lists keep their insertion order, which fixes the
/// order in which moves are enumerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PositionParts")]
pub struct Position {
    size: usize,
    opener: Side,
    to_move: Side,
    human: Vec<Pawn>,
    machine: Vec<Pawn>,
}

/// Unchecked serialized form; every decoded position goes through
/// [`Position::from_parts`].
#[derive(Deserialize)]
struct PositionParts {
    size: usize,
    opener: Side,
    to_move: Side,
    human: Vec<Pawn>,
    machine: Vec<Pawn>,
}

impl TryFrom<PositionParts> for Position {
    type Error = GameError;

    fn try_from(parts: PositionParts) -> Result<Self, Self::Error> {
        Self::from_parts(
            parts.size,
            parts.opener,
            parts.to_move,
            parts.human,
            parts.machine,
        )
    }
}

impl Position {
    /// Starting position: the human fills row 1, the machine fills the top
    /// row, and the opener moves first.
    pub fn new(opener: Side, size: usize) -> Result<Self, GameError> {
        if size < MIN_SIZE {
            return Err(GameError::BoardTooSmall(size));
        }
        if opener == Side::None {
            return Err(GameError::NoSuchSide);
        }
        let human = (1..=size).map(|col| Pawn::new(col, 1)).collect();
        let machine = (1..=size).rev().map(|col| Pawn::new(col, size)).collect();
        Ok(Self {
            size,
            opener,
            to_move: opener,
            human,
            machine,
        })
    }

    /// Builds an arbitrary position, e.g. a puzzle or a test fixture.
    ///
    /// `to_move` is taken as given; only the layout is checked.
    pub fn from_parts(
        size: usize,
        opener: Side,
        to_move: Side,
        human: Vec<Pawn>,
        machine: Vec<Pawn>,
    ) -> Result<Self, GameError> {
        if size < MIN_SIZE {
            return Err(GameError::BoardTooSmall(size));
        }
        if opener == Side::None {
            return Err(GameError::NoSuchSide);
        }
        if let Some(p) = human.iter().chain(&machine).find(|p| !p.in_bounds(size)) {
            return Err(GameError::OutOfBounds {
                col: p.col,
                row: p.row,
                size,
            });
        }
        if has_duplicates(&human) || has_duplicates(&machine) {
            return Err(GameError::InvalidLayout("two pawns share a slot"));
        }
        if human.iter().any(|p| machine.contains(p)) {
            return Err(GameError::InvalidLayout("a slot is owned by both sides"));
        }
        Ok(Self {
            size,
            opener,
            to_move,
            human,
            machine,
        })
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub const fn opener(&self) -> Side {
        self.opener
    }

    /// The side that moves next, or `Side::None` once neither can move.
    #[must_use]
    pub const fn to_move(&self) -> Side {
        self.to_move
    }

    #[must_use]
    pub fn pawns(&self, side: Side) -> &[Pawn] {
        match side {
            Side::Human => &self.human,
            Side::Machine => &self.machine,
            Side::None => &[],
        }
    }

    fn pawns_mut(&mut self, side: Side) -> Option<&mut Vec<Pawn>> {
        match side {
            Side::Human => Some(&mut self.human),
            Side::Machine => Some(&mut self.machine),
            Side::None => None,
        }
    }

    /// Owner of the slot under `pawn`.
    #[must_use]
    pub fn slot(&self, pawn: Pawn) -> Side {
        if self.human.contains(&pawn) {
            Side::Human
        } else if self.machine.contains(&pawn) {
            Side::Machine
        } else {
            Side::None
        }
    }

    /// Owner of the slot at `(col, row)`; rejects coordinates off the board.
    pub fn slot_owner(&self, col: usize, row: usize) -> Result<Side, GameError> {
        rules::checked_pawn(col, row, self.size).map(|p| self.slot(p))
    }

    /// The rank a side starts on. Double steps are only allowed from here.
    #[must_use]
    pub const fn home_row(&self, side: Side) -> usize {
        match side {
            Side::Human => 1,
            Side::Machine | Side::None => self.size,
        }
    }

    /// The rank a side has to reach to win.
    #[must_use]
    pub const fn goal_row(&self, side: Side) -> usize {
        match side {
            Side::Human => self.size,
            Side::Machine | Side::None => 1,
        }
    }

    /// Successor after `side` moves `from` -> `to`; `self` stays untouched.
    pub fn apply_move(&self, side: Side, from: Pawn, to: Pawn) -> Result<Self, MoveError> {
        let kind = rules::validate_move(self, side, from, to)?;
        let mut next = self.clone();
        if kind == MoveKind::Capture {
            if let Some(victims) = next.pawns_mut(side.opponent()) {
                victims.retain(|p| *p != to);
            }
        }
        if let Some(pawn) = next
            .pawns_mut(side)
            .and_then(|pawns| pawns.iter_mut().find(|p| **p == from))
        {
            *pawn = to;
        }
        next.to_move = rules::next_to_move(&next, side);
        Ok(next)
    }

    /// A human move given as raw coordinates.
    ///
    /// Misuse (game over, wrong turn, coordinates off the board) is an error.
    /// An illegal move is an ordinary outcome and yields `Ok(None)`.
    pub fn apply_human_move(
        &self,
        col_from: usize,
        row_from: usize,
        col_to: usize,
        row_to: usize,
    ) -> Result<Option<Self>, GameError> {
        rules::check_turn(self, Side::Human)?;
        let from = rules::checked_pawn(col_from, row_from, self.size)?;
        let to = rules::checked_pawn(col_to, row_to, self.size)?;
        match self.apply_move(Side::Human, from, to) {
            Ok(next) => Ok(Some(next)),
            Err(reason) => {
                log::debug!("rejected human move {from} -> {to}: {reason}");
                Ok(None)
            }
        }
    }

    /// Same board with the turn resolved as if `side` had just passed.
    #[must_use]
    pub fn with_turn_passed(&self, side: Side) -> Self {
        let mut next = self.clone();
        next.to_move = rules::next_to_move(self, side);
        next
    }
}

fn has_duplicates(pawns: &[Pawn]) -> bool {
    pawns
        .iter()
        .enumerate()
        .any(|(i, p)| pawns[..i].contains(p))
}

impl fmt::Display for Position {
    /// Highest row first, one glyph per slot, columns separated by a space.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=self.size).rev() {
            for col in 1..=self.size {
                let glyph = Color::of(self.slot(Pawn::new(col, row)), self.opener)
                    .map_or(' ', Color::glyph);
                write!(f, "{glyph}")?;
                if col < self.size {
                    f.write_str(" ")?;
                }
            }
            if row > 1 {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}
