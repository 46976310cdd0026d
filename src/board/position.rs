//! Board coordinates.

use serde::{Deserialize, Serialize};

/// A `(row, column)` coordinate on a square board.
///
/// The linear encoding `row * size + column` is a bijection between
/// coordinates and `[0, size²)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row, counted from the top.
    pub row: usize,
    /// Column, counted from the left.
    pub column: usize,
}

impl Position {
    /// Create a position.
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Decode a linear position on a board of the given size.
    #[inline]
    pub const fn from_linear(linear: usize, size: usize) -> Self {
        Self {
            row: linear / size,
            column: linear % size,
        }
    }

    /// Encode as a linear position on a board of the given size.
    #[inline]
    pub const fn to_linear(self, size: usize) -> usize {
        self.row * size + self.column
    }

    /// Whether both coordinates lie in `[0, size)`.
    #[inline]
    pub const fn is_within(self, size: usize) -> bool {
        self.row < size && self.column < size
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(row {}, col {})", self.row, self.column)
    }
}
