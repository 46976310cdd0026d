//! Batch Driver
//!
//! One narrated trial, then a large silent batch. Every trial gets its own
//! board and its own RNG stream derived from the batch seed.

use std::io::Write;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use super::config::{DriverConfig, OutputFormat};
use crate::core::rng::DeterministicRng;
use crate::puzzle::{run_trial, PuzzleError, VerifiedTrial};

/// Driver errors.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// A trial failed. Always fatal.
    #[error("trial {trial} (seed {seed}) failed")]
    Trial {
        /// Index of the failing trial within the batch.
        trial: u64,
        /// Seed that rebuilds the failing board.
        seed: u64,
        /// Underlying puzzle error.
        #[source]
        source: PuzzleError,
    },

    /// Writing the report failed.
    #[error("output error")]
    Io(#[from] std::io::Error),

    /// Encoding the JSON report failed.
    #[error("json error")]
    Json(#[from] serde_json::Error),
}

/// Outcome of a completed batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Board edge length.
    pub board_size: usize,
    /// Trials run, all verified.
    pub trials: u64,
    /// Batch seed; replays the whole batch.
    pub seed: u64,
    /// Wall time spent in the batch.
    pub elapsed_ms: u128,
}

/// Run the narrated trial and the batch, writing reports to `out`.
pub fn run<W: Write>(config: &DriverConfig, out: &mut W) -> Result<BatchSummary, DriverError> {
    let seed = match config.seed {
        Some(seed) => seed,
        None => DeterministicRng::from_entropy().1,
    };
    info!("Board: {}x{}, batch seed {}", config.board_size, config.board_size, seed);

    // Trial indices for the batch start at 1; index 0 is the narrated trial.
    let mut rng = DeterministicRng::for_trial(seed, 0);
    let verified = run_trial(config.board_size, &mut rng).map_err(|source| DriverError::Trial {
        trial: 0,
        seed,
        source,
    })?;
    report_trial(&verified, config.output, out)?;

    if config.output == OutputFormat::Text {
        writeln!(out, "Trying {} puzzles...", config.trials)?;
    }
    let summary = run_batch(config, seed)?;

    match config.output {
        OutputFormat::Text => writeln!(
            out,
            "No errors were seen in {} puzzles. The encoding holds.",
            summary.trials
        )?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&summary)?)?,
    }
    Ok(summary)
}

/// Run `config.trials` silent trials, stopping at the first failure.
pub fn run_batch(config: &DriverConfig, seed: u64) -> Result<BatchSummary, DriverError> {
    let started = Instant::now();

    for trial in 1..=config.trials {
        let mut rng = DeterministicRng::for_trial(seed, trial);
        let verified = run_trial(config.board_size, &mut rng)
            .map_err(|source| DriverError::Trial { trial, seed, source })?;
        debug!(
            "Trial {}: key {} flip {}",
            trial,
            verified.revealed(),
            verified.flip()
        );

        if config.progress_every > 0 && trial % config.progress_every == 0 {
            info!("{} / {} puzzles verified", trial, config.trials);
        }
    }

    let summary = BatchSummary {
        board_size: config.board_size,
        trials: config.trials,
        seed,
        elapsed_ms: started.elapsed().as_millis(),
    };
    info!("Batch done: {} trials in {} ms", summary.trials, summary.elapsed_ms);
    Ok(summary)
}

/// Write the narrated account of one trial.
pub fn report_trial<W: Write>(
    verified: &VerifiedTrial,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), DriverError> {
    if format == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(&verified.record())?)?;
        return Ok(());
    }

    let original = verified.original();
    let flipped = verified.flipped();
    let checksum = original.checksum();
    let key = original.key_linear_position();
    let flip = verified.flip();

    write!(out, "The warden has prepared this board:\n{}", original)?;
    writeln!(out, "Encoder computes the checksum : {}", original.bitstring(checksum))?;
    writeln!(out, "The key is at position       : {} (abs:{})", original.bitstring(key), key)?;
    writeln!(out, "The difference               : {}", original.bitstring(flip))?;
    writeln!(out, "Encoder flips the difference coin (abs:{}) and leaves the room.", flip)?;

    write!(
        out,
        "Verifier enters and sees the modified board (but not the key):\n{}",
        flipped
    )?;
    writeln!(
        out,
        "Verifier computes the checksum: {} (abs:{})",
        flipped.bitstring(verified.revealed()),
        verified.revealed()
    )?;
    writeln!(out, "That tile hides the key.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(output: OutputFormat) -> DriverConfig {
        DriverConfig {
            board_size: 4,
            trials: 250,
            seed: Some(9),
            progress_every: 100,
            output,
        }
    }

    #[test]
    fn test_run_text_report() {
        let mut out = Vec::new();
        let summary = run(&small_config(OutputFormat::Text), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(summary.trials, 250);
        assert_eq!(summary.seed, 9);
        assert!(text.contains("The warden has prepared this board:"));
        assert!(text.contains("Verifier computes the checksum"));
        assert!(text.contains("Trying 250 puzzles..."));
        assert!(text.contains("No errors were seen in 250 puzzles"));
        assert_eq!(text.matches("Key").count(), 2);
    }

    #[test]
    fn test_run_json_report() {
        let mut out = Vec::new();
        run(&small_config(OutputFormat::Json), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let last = text.lines().last().unwrap();
        let summary: serde_json::Value = serde_json::from_str(last).unwrap();
        assert_eq!(summary["trials"], 250);
        assert_eq!(summary["board_size"], 4);
        assert!(text.contains("\"revealed\""));
    }

    #[test]
    fn test_invalid_board_size_is_fatal() {
        let config = DriverConfig {
            board_size: 12,
            ..small_config(OutputFormat::Text)
        };
        let err = run(&config, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            DriverError::Trial { trial: 0, seed: 9, .. }
        ));
    }

    #[test]
    fn test_error_chain_names_cause_once() {
        let config = DriverConfig {
            board_size: 12,
            ..small_config(OutputFormat::Text)
        };
        let err = anyhow::Error::from(run(&config, &mut Vec::new()).unwrap_err());
        let message = format!("{:#}", err);

        assert!(message.starts_with("trial 0 (seed 9) failed: "));
        assert_eq!(message.matches("board size 12").count(), 1);
    }

    #[test]
    fn test_batch_is_reproducible() {
        let config = small_config(OutputFormat::Text);
        let a = run_batch(&config, 123).unwrap();
        let b = run_batch(&config, 123).unwrap();
        assert_eq!(a.trials, b.trials);
        assert_eq!(a.seed, b.seed);
    }

    #[test]
    fn test_zero_trials() {
        let config = DriverConfig {
            trials: 0,
            ..small_config(OutputFormat::Text)
        };
        assert_eq!(run_batch(&config, 1).unwrap().trials, 0);
    }
}
