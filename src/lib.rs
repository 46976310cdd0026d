//! # Coin Key Puzzle
//!
//! Encoder and verifier for the chessboard puzzle where a key hides under
//! one of `size²` coins and a single flip must reveal where.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    COIN KEY PUZZLE                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                                │
//! │  ├── rng.rs      - Seeded Xorshift128+ PRNG                  │
//! │  └── bits.rs     - Fixed-width binary formatting             │
//! │                                                              │
//! │  board/          - The board                                 │
//! │  ├── position.rs - (row, column) <-> linear position         │
//! │  └── grid.rs     - Coins, key, checksum, rendering           │
//! │                                                              │
//! │  puzzle/         - The protocol                              │
//! │  ├── protocol.rs - Encode / verify                           │
//! │  └── trial.rs    - Prepared -> Encoded -> Verified           │
//! │                                                              │
//! │  driver/         - Console glue (not part of the core)       │
//! │  ├── config.rs   - Environment configuration                 │
//! │  └── batch.rs    - Narrated trial and silent batch           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Correctness
//!
//! The checksum is the XOR of the linear positions of all tails-up coins.
//! Flipping the coin at `checksum ^ key` makes the checksum equal the key,
//! for every board and every key:
//!
//! ```
//! use coin_key::{board::Grid, core::DeterministicRng, puzzle};
//!
//! let mut grid = Grid::new(8).unwrap();
//! grid.randomize(&mut DeterministicRng::new(7));
//!
//! let encoding = puzzle::encode(&grid).unwrap();
//! assert_eq!(puzzle::verify(&encoding.grid), grid.key_linear_position());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod board;
pub mod core;
pub mod driver;
pub mod puzzle;

// Re-export commonly used types
pub use crate::board::{Grid, GridError, Position};
pub use crate::core::rng::DeterministicRng;
pub use crate::puzzle::{encode, verify, Encoding, PuzzleError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
