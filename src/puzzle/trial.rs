//! Single-shot puzzle trial.
//!
//! `PreparedTrial` -> `EncodedTrial` -> `VerifiedTrial`. Each transition
//! consumes the previous state, so a trial can never run backwards or twice.

use serde::Serialize;

use super::protocol::{encode, mismatch, verify, PuzzleError};
use crate::board::Grid;
use crate::core::rng::DeterministicRng;

/// Warden has randomized the board and hidden the key.
#[derive(Clone, Debug)]
pub struct PreparedTrial {
    original: Grid,
}

/// Encoder has flipped one coin.
#[derive(Clone, Debug)]
pub struct EncodedTrial {
    original: Grid,
    flipped: Grid,
    flip: usize,
}

/// Verifier has recovered the key from the flipped board.
#[derive(Clone, Debug)]
pub struct VerifiedTrial {
    original: Grid,
    flipped: Grid,
    flip: usize,
    revealed: usize,
}

impl PreparedTrial {
    /// Randomize a fresh board of the given size.
    pub fn random(size: usize, rng: &mut DeterministicRng) -> Result<Self, PuzzleError> {
        let mut grid = Grid::new(size)?;
        grid.randomize(rng);
        Ok(Self { original: grid })
    }

    /// Start from an already prepared board.
    pub fn from_grid(grid: Grid) -> Self {
        Self { original: grid }
    }

    /// The board as the warden left it.
    pub fn grid(&self) -> &Grid {
        &self.original
    }

    /// Let the encoder make its single flip.
    pub fn encode(self) -> Result<EncodedTrial, PuzzleError> {
        let encoding = encode(&self.original)?;
        Ok(EncodedTrial {
            original: self.original,
            flipped: encoding.grid,
            flip: encoding.flip,
        })
    }
}

impl EncodedTrial {
    /// The board the verifier walks in to.
    pub fn flipped(&self) -> &Grid {
        &self.flipped
    }

    /// Position the encoder flipped.
    pub fn flip(&self) -> usize {
        self.flip
    }

    /// Let the verifier read the checksum and compare it with the key.
    pub fn verify(self) -> Result<VerifiedTrial, PuzzleError> {
        let revealed = verify(&self.flipped);
        if revealed != self.original.key_linear_position() {
            return Err(mismatch(&self.original, &self.flipped, revealed));
        }
        Ok(VerifiedTrial {
            original: self.original,
            flipped: self.flipped,
            flip: self.flip,
            revealed,
        })
    }
}

impl VerifiedTrial {
    /// Board before the flip.
    pub fn original(&self) -> &Grid {
        &self.original
    }

    /// Board after the flip.
    pub fn flipped(&self) -> &Grid {
        &self.flipped
    }

    /// Position the encoder flipped.
    pub fn flip(&self) -> usize {
        self.flip
    }

    /// Position the verifier recovered; equal to the key.
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Serializable summary of the whole trial.
    pub fn record(&self) -> TrialRecord {
        TrialRecord {
            size: self.original.size(),
            original_checksum: self.original.checksum(),
            key: self.original.key_linear_position(),
            flip: self.flip,
            revealed: self.revealed,
            original: self.original.clone(),
            flipped: self.flipped.clone(),
        }
    }
}

/// Everything observed during one trial.
#[derive(Clone, Debug, Serialize)]
pub struct TrialRecord {
    /// Board edge length.
    pub size: usize,
    /// Checksum of the board before the flip.
    pub original_checksum: usize,
    /// Key linear position.
    pub key: usize,
    /// Linear position the encoder flipped.
    pub flip: usize,
    /// Linear position the verifier recovered.
    pub revealed: usize,
    /// Board before the flip.
    pub original: Grid,
    /// Board after the flip.
    pub flipped: Grid,
}

/// Run one trial on a fresh random board.
pub fn run_trial(size: usize, rng: &mut DeterministicRng) -> Result<VerifiedTrial, PuzzleError> {
    PreparedTrial::random(size, rng)?.encode()?.verify()
}
