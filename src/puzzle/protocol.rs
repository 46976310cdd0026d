//! Encode / Verify
//!
//! The encoder knows the key and flips exactly one coin. The verifier sees
//! only the flipped board and reads the key off its checksum.
//!
//! Flipping the coin at `p` changes the checksum by exactly `XOR p`, whether
//! that coin was heads or tails. The encoder picks `p = checksum ^ key`, so
//! the new checksum is `checksum ^ checksum ^ key = key`.

use thiserror::Error;

use crate::board::{Grid, GridError};

/// Result of the encoder's move.
#[derive(Clone, Debug)]
pub struct Encoding {
    /// Board after the single flip. The only thing the verifier gets.
    pub grid: Grid,
    /// Linear position that was flipped. Diagnostics only.
    pub flip: usize,
}

/// Puzzle errors.
#[derive(Debug, Clone, Error)]
pub enum PuzzleError {
    /// Board construction or access failed.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// The verifier recovered a position other than the key.
    ///
    /// Never expected for a valid board; signals a defect.
    #[error(
        "verification failed: flipped board checksum={revealed_bits}, but key is at {key_bits}\n\
         Original board:\n{original}\nFlipped board:\n{flipped}"
    )]
    VerificationMismatch {
        /// Position the verifier recovered.
        revealed: usize,
        /// Actual key position.
        key: usize,
        /// `revealed` as a bit string.
        revealed_bits: String,
        /// `key` as a bit string.
        key_bits: String,
        /// Rendering of the board before the flip.
        original: String,
        /// Rendering of the board after the flip.
        flipped: String,
    },
}

/// Position the encoder must flip: `checksum ^ key`.
///
/// Always within `[0, size²)` since both operands are.
#[inline]
pub fn flip_position(grid: &Grid) -> usize {
    grid.checksum() ^ grid.key_linear_position()
}

/// Encoder: flip the one coin that makes the checksum equal the key.
///
/// Works on a clone; `grid` is left as the warden prepared it.
pub fn encode(grid: &Grid) -> Result<Encoding, PuzzleError> {
    let flip = flip_position(grid);
    let mut flipped = grid.clone();
    flipped.flip(flip)?;
    Ok(Encoding { grid: flipped, flip })
}

/// Verifier: the key position revealed by the board.
#[inline]
pub fn verify(encoded: &Grid) -> usize {
    encoded.checksum()
}

/// Run the encoder and verifier and check the verifier found the key.
pub fn check(grid: &Grid) -> Result<Encoding, PuzzleError> {
    let encoding = encode(grid)?;
    let revealed = verify(&encoding.grid);
    let key = grid.key_linear_position();
    if revealed != key {
        return Err(mismatch(grid, &encoding.grid, revealed));
    }
    Ok(encoding)
}

/// Build the fatal report for a verifier that missed the key.
pub(crate) fn mismatch(original: &Grid, flipped: &Grid, revealed: usize) -> PuzzleError {
    let key = original.key_linear_position();
    PuzzleError::VerificationMismatch {
        revealed,
        key,
        revealed_bits: flipped.bitstring(revealed),
        key_bits: flipped.bitstring(key),
        original: original.render(),
        flipped: flipped.render(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
