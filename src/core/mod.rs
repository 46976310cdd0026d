//! Core primitives.
//!
//! Seeded randomness and bit formatting shared by the board and the driver.

pub mod bits;
pub mod rng;

// Re-export core types
pub use bits::{bit_width, bitstring};
pub use rng::{derive_trial_seed, DeterministicRng};
