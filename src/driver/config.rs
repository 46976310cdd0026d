//! Driver configuration.

use thiserror::Error;

/// How the verbose trial is printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Narrated boards for a human reader.
    #[default]
    Text,
    /// One JSON document per report.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::Invalid {
                var: "PUZZLE_OUTPUT",
                value: s.to_string(),
            }),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Environment variable could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    Invalid {
        /// Variable name.
        var: &'static str,
        /// Raw value found.
        value: String,
    },
}

/// Batch driver configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    /// Board edge length. Power of two, at least 2.
    pub board_size: usize,
    /// Number of silent trials in the batch run.
    pub trials: u64,
    /// Batch seed. If None, drawn from wall-clock entropy.
    pub seed: Option<u64>,
    /// Log progress every this many trials (0 disables).
    pub progress_every: u64,
    /// Format of the verbose trial and the final summary.
    pub output: OutputFormat,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            board_size: 8,
            trials: 1_000_000,
            seed: None,
            progress_every: 100_000,
            output: OutputFormat::Text,
        }
    }
}

impl DriverConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Create config from an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            board_size: parse_var(&lookup, "PUZZLE_BOARD_SIZE")?.unwrap_or(defaults.board_size),
            trials: parse_var(&lookup, "PUZZLE_TRIALS")?.unwrap_or(defaults.trials),
            seed: parse_var(&lookup, "PUZZLE_SEED")?,
            progress_every: parse_var(&lookup, "PUZZLE_PROGRESS_EVERY")?
                .unwrap_or(defaults.progress_every),
            output: parse_var(&lookup, "PUZZLE_OUTPUT")?.unwrap_or(defaults.output),
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}
