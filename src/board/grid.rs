//! Coin Grid
//!
//! A square board of coins with a key hidden under one tile. Cells are
//! stored flat, indexed by linear position; row/column is only a view.

use serde::Serialize;
use thiserror::Error;

use super::position::Position;
use crate::core::bits::{bit_width, bitstring};
use crate::core::rng::DeterministicRng;

/// Smallest legal board edge.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest legal board edge (16M cells).
pub const MAX_BOARD_SIZE: usize = 4096;

/// Coin face shown for tails-up cells.
const TAILS_SYMBOL: &str = "T";
/// Coin face shown for heads-up cells.
const HEADS_SYMBOL: &str = "-";
/// Marker shown under the tile that hides the key.
const KEY_SYMBOL: &str = "Key";
/// Left margin of every rendered line.
const INDENT: &str = "    ";

/// Grid errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Board edge is not a power of two in the legal range.
    #[error("board size {0} is not a power of 2 between 2 and 4096")]
    InvalidSize(usize),

    /// Linear position outside `[0, size²)`.
    #[error("position {position} is out of range for a board of {cells} cells")]
    OutOfRange {
        /// Requested linear position.
        position: usize,
        /// Number of cells on the board.
        cells: usize,
    },

    /// Coordinate outside `[0, size) x [0, size)`.
    #[error("coordinate {position} is out of range for a {size}x{size} board")]
    CoordinateOutOfRange {
        /// Requested coordinate.
        position: Position,
        /// Board edge length.
        size: usize,
    },
}

/// Square board of coins with one hidden key.
///
/// `true` cells are tails-up. All cells start heads-up with the key at 0.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grid {
    size: usize,
    cells: Vec<bool>,
    key: usize,
}

impl Grid {
    /// Create an all-heads board with the key at linear position 0.
    pub fn new(size: usize) -> Result<Self, GridError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) || !size.is_power_of_two() {
            return Err(GridError::InvalidSize(size));
        }
        Ok(Self {
            size,
            cells: vec![false; size * size],
            key: 0,
        })
    }

    /// Toss every coin independently and hide the key under a uniformly
    /// chosen tile.
    pub fn randomize(&mut self, rng: &mut DeterministicRng) -> &mut Self {
        for cell in self.cells.iter_mut() {
            *cell = rng.next_coin();
        }
        self.key = rng.next_index(self.cells.len());
        self
    }

    /// Board edge length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (`size²`).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Bits needed to print any linear position of this board.
    #[inline]
    pub fn bit_width(&self) -> usize {
        bit_width(self.size)
    }

    /// Linear position of the key.
    #[inline]
    pub fn key_linear_position(&self) -> usize {
        self.key
    }

    /// Coordinate of the key.
    pub fn key_position(&self) -> Position {
        Position::from_linear(self.key, self.size)
    }

    /// Move the key under the given tile.
    pub fn place_key(&mut self, linear: usize) -> Result<(), GridError> {
        self.check_range(linear)?;
        self.key = linear;
        Ok(())
    }

    /// Whether the coin at `linear` shows tails.
    pub fn is_tails(&self, linear: usize) -> Result<bool, GridError> {
        self.check_range(linear)?;
        Ok(self.cells[linear])
    }

    /// Linear positions of all tails-up coins, ascending.
    pub fn tails_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, &tails)| tails.then_some(i))
            .collect()
    }

    /// Decode a linear position into a coordinate.
    pub fn position_of(&self, linear: usize) -> Result<Position, GridError> {
        self.check_range(linear)?;
        Ok(Position::from_linear(linear, self.size))
    }

    /// Encode a coordinate as a linear position.
    pub fn linear_of(&self, position: Position) -> Result<usize, GridError> {
        if !position.is_within(self.size) {
            return Err(GridError::CoordinateOutOfRange {
                position,
                size: self.size,
            });
        }
        Ok(position.to_linear(self.size))
    }

    /// Positional parity: XOR of the linear positions of all tails-up coins.
    ///
    /// An all-heads board has checksum 0. Accumulation order is irrelevant.
    pub fn checksum(&self) -> usize {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &tails)| tails)
            .fold(0, |acc, (i, _)| acc ^ i)
    }

    /// Turn over the coin at `linear`.
    pub fn flip(&mut self, linear: usize) -> Result<(), GridError> {
        self.check_range(linear)?;
        self.cells[linear] = !self.cells[linear];
        Ok(())
    }

    /// Format a value as a bit string as wide as this board's positions.
    pub fn bitstring(&self, value: usize) -> String {
        bitstring(value, self.bit_width())
    }

    /// Human-readable layout.
    ///
    /// Each row is shown as four lines: position in binary, position in
    /// decimal, coin face and key marker, followed by a blank line.
    pub fn render(&self) -> String {
        let width = self.bit_width().max(KEY_SYMBOL.len());
        let mut layout = String::new();

        for row in 0..self.size {
            let mut bits = String::from(INDENT);
            let mut abs = String::from(INDENT);
            let mut coins = String::from(INDENT);
            let mut keys = String::from(INDENT);

            for column in 0..self.size {
                let linear = Position::new(row, column).to_linear(self.size);
                let coin = if self.cells[linear] {
                    TAILS_SYMBOL
                } else {
                    HEADS_SYMBOL
                };
                let key = if linear == self.key { KEY_SYMBOL } else { "" };

                bits.push_str(&format!(" {:>width$} ", self.bitstring(linear)));
                abs.push_str(&format!(" {:>width$} ", linear));
                coins.push_str(&format!(" {:>width$} ", coin));
                keys.push_str(&format!(" {:>width$} ", key));
            }

            for line in [bits, abs, coins, keys] {
                layout.push_str(line.trim_end());
                layout.push('\n');
            }
            layout.push('\n');
        }
        layout
    }

    fn check_range(&self, linear: usize) -> Result<(), GridError> {
        if linear >= self.cells.len() {
            return Err(GridError::OutOfRange {
                position: linear,
                cells: self.cells.len(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid_with_tails(size: usize, tails: &[usize], key: usize) -> Grid {
        let mut grid = Grid::new(size).unwrap();
        for &p in tails {
            grid.flip(p).unwrap();
        }
        grid.place_key(key).unwrap();
        grid
    }

    #[test]
    fn test_new_valid_sizes() {
        for size in [2, 4, 16, MAX_BOARD_SIZE] {
            let grid = Grid::new(size).unwrap();
            assert_eq!(grid.cell_count(), size * size);
            assert_eq!(grid.key_linear_position(), 0);
            assert_eq!(grid.checksum(), 0);
        }
    }

    #[test]
    fn test_new_invalid_sizes() {
        for size in [0, 1, 3, 6, 12, MAX_BOARD_SIZE * 2] {
            assert_eq!(Grid::new(size), Err(GridError::InvalidSize(size)));
        }
    }

    #[test]
    fn test_flip_out_of_range() {
        let mut grid = Grid::new(4).unwrap();
        assert_eq!(
            grid.flip(16),
            Err(GridError::OutOfRange { position: 16, cells: 16 })
        );
        assert!(grid.place_key(16).is_err());
        assert!(grid.is_tails(99).is_err());
        assert!(grid.linear_of(Position::new(0, 4)).is_err());
    }

    #[test]
    fn test_linear_of_huge_coordinate() {
        let grid = Grid::new(4).unwrap();
        for position in [Position::new(usize::MAX, 0), Position::new(0, usize::MAX)] {
            assert_eq!(
                grid.linear_of(position),
                Err(GridError::CoordinateOutOfRange { position, size: 4 })
            );
        }
    }

    #[test]
    fn test_checksum_known_board() {
        let grid = grid_with_tails(4, &[2, 5], 9);
        assert_eq!(grid.checksum(), 7);
        assert_eq!(grid.tails_positions(), vec![2, 5]);
    }

    #[test]
    fn test_double_flip_restores() {
        let mut rng = DeterministicRng::new(77);
        let mut grid = Grid::new(8).unwrap();
        grid.randomize(&mut rng);
        let before = grid.clone();

        grid.flip(42).unwrap();
        grid.flip(42).unwrap();

        assert_eq!(grid, before);
        assert_eq!(grid.checksum(), before.checksum());
    }

    #[test]
    fn test_clone_independence() {
        let mut rng = DeterministicRng::new(3);
        let mut original = Grid::new(8).unwrap();
        original.randomize(&mut rng);
        let snapshot = original.tails_positions();
        let key = original.key_linear_position();

        let mut copy = original.clone();
        copy.flip(0).unwrap();
        copy.place_key((key + 1) % copy.cell_count()).unwrap();

        assert_eq!(original.tails_positions(), snapshot);
        assert_eq!(original.key_linear_position(), key);
        assert_ne!(copy, original);
    }

    #[test]
    fn test_randomize_reproducible() {
        let mut a = Grid::new(8).unwrap();
        let mut b = Grid::new(8).unwrap();
        a.randomize(&mut DeterministicRng::new(2024));
        b.randomize(&mut DeterministicRng::new(2024));
        assert_eq!(a, b);

        let mut c = Grid::new(8).unwrap();
        c.randomize(&mut DeterministicRng::new(2025));
        assert_ne!(a, c);
    }

    #[test]
    fn test_randomize_moves_key_everywhere() {
        let mut rng = DeterministicRng::new(11);
        let mut grid = Grid::new(2).unwrap();
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[grid.randomize(&mut rng).key_linear_position()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_key_position_view() {
        let grid = grid_with_tails(8, &[], 13);
        assert_eq!(grid.key_position(), Position::new(1, 5));
        assert_eq!(grid.position_of(13).unwrap(), Position::new(1, 5));
        assert_eq!(grid.linear_of(Position::new(1, 5)).unwrap(), 13);
    }

    #[test]
    fn test_render_layout() {
        let grid = grid_with_tails(2, &[1], 3);
        let rendered = grid.render();
        let lines: Vec<&str> = rendered.lines().collect();

        // Two rows, four lines each plus a blank separator
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "      00   01");
        assert_eq!(lines[1], "       0    1");
        assert_eq!(lines[2], "       -    T");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "");
        assert_eq!(lines[7], "       -    -");
        assert_eq!(lines[8], "          Key");
        assert_eq!(rendered.matches(KEY_SYMBOL).count(), 1);
    }

    #[test]
    fn test_render_shows_every_position() {
        let grid = Grid::new(4).unwrap();
        let rendered = grid.to_string();
        for linear in 0..16 {
            assert!(rendered.contains(&grid.bitstring(linear)));
        }
    }

    proptest! {
        #[test]
        fn prop_flip_xors_checksum(
            seed in any::<u64>(),
            exp in 1u32..=5,
            raw in any::<usize>(),
        ) {
            let size = 1usize << exp;
            let mut grid = Grid::new(size).unwrap();
            grid.randomize(&mut DeterministicRng::new(seed));
            let p = raw % grid.cell_count();
            let before = grid.checksum();

            grid.flip(p).unwrap();
            prop_assert_eq!(grid.checksum(), before ^ p);
        }

        #[test]
        fn prop_checksum_stays_in_range(seed in any::<u64>(), exp in 1u32..=6) {
            let mut grid = Grid::new(1usize << exp).unwrap();
            grid.randomize(&mut DeterministicRng::new(seed));
            prop_assert!(grid.checksum() < grid.cell_count());
        }
    }
}
