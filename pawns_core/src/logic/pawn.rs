use serde::{Deserialize, Serialize};
use std::fmt;

/// A pawn is nothing more than the slot it stands on.
///
/// Columns and rows are 1-based: `(1, 1)` is the bottom-left slot and
/// `(size, size)` the top-right one. Two pawns are equal iff both
/// coordinates match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pawn {
    pub col: usize,
    pub row: usize,
}

impl Pawn {
    #[must_use]
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Whether both coordinates lie in `1..=size`.
    #[must_use]
    pub const fn in_bounds(self, size: usize) -> bool {
        self.col >= 1 && self.col <= size && self.row >= 1 && self.row <= size
    }

    /// The slot `dc` columns and `dr` rows away, if it is still on the board.
    #[must_use]
    pub fn offset(self, dc: isize, dr: isize, size: usize) -> Option<Self> {
        let col = self.col.checked_add_signed(dc)?;
        let row = self.row.checked_add_signed(dr)?;
        let target = Self::new(col, row);
        target.in_bounds(size).then_some(target)
    }

    /// True if `other` is one of the eight surrounding slots.
    #[must_use]
    pub const fn is_next_to(self, other: Self) -> bool {
        if self.col == other.col && self.row == other.row {
            return false;
        }
        self.col.abs_diff(other.col) <= 1 && self.row.abs_diff(other.row) <= 1
    }
}

impl fmt::Display for Pawn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}
