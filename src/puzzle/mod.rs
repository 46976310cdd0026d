//! Puzzle Protocol
//!
//! Encoder and verifier over a [`Grid`](crate::board::Grid).
//!
//! ## Flow
//!
//! ```text
//! ┌──────────┐  encode: flip checksum^key  ┌─────────┐  verify: checksum  ┌──────────┐
//! │ Prepared │ ──────────────────────────▶ │ Encoded │ ─────────────────▶ │ Verified │
//! └──────────┘                             └─────────┘                    └──────────┘
//! ```

pub mod protocol;
pub mod trial;

pub use protocol::{check, encode, flip_position, verify, Encoding, PuzzleError};
pub use trial::{run_trial, EncodedTrial, PreparedTrial, TrialRecord, VerifiedTrial};
