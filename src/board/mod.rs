//! Coin board: coordinates and the grid of coins hiding the key.

pub mod grid;
pub mod position;

pub use grid::{Grid, GridError, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
pub use position::Position;
