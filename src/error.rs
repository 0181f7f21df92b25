//! Error types for trialhist.
//!
//! This module provides a unified error type for building and running a
//! trial-history process, using the `thiserror` crate for ergonomic error
//! handling. Configuration problems are reported at construction time;
//! the remaining variants cover broken invariants and persistence.

use thiserror::Error;

/// The main error type for trialhist operations.
#[derive(Error, Debug)]
pub enum TrialHistError {
    /// Fewer than two choices were requested
    #[error("Invalid number of choices: {0} (need at least 2)")]
    InvalidNumChoices(usize),

    /// A probability parameter lies outside the open interval (0, 1)
    #[error("Invalid probability for {name}: {value} (must lie in (0, 1))")]
    InvalidProbability {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// Periodic switching with a zero block duration
    #[error("Invalid block duration: {0} (must be positive)")]
    InvalidBlockDuration(u64),

    /// Both or neither of `block_dur` / `blk_ch_prob` were supplied
    #[error("Exactly one of block_dur or blk_ch_prob must be given")]
    AmbiguousSwitchPolicy,

    /// Topology name not recognised
    #[error("Unknown transition topology: {0:?} (expected \"CW\" or \"RepAlt\")")]
    UnknownTopology(String),

    /// The trial source's choice set does not match the configuration
    #[error("Choice set mismatch: {0}")]
    ChoiceSetMismatch(String),

    /// A ground truth outside [1, n_ch]
    #[error("Ground truth out of range: {ground_truth} not in [1, {n_ch}]")]
    GroundTruthOutOfRange {
        /// The offending ground truth
        ground_truth: usize,
        /// Number of choices
        n_ch: usize,
    },

    /// A weight vector could not be sampled from
    #[error("Invalid sampling weights: {0}")]
    InvalidWeights(String),

    /// A transition matrix row is not a probability distribution
    #[error("Row {row} of block {block} is not stochastic (sum = {sum})")]
    NotRowStochastic {
        /// Block index
        block: usize,
        /// Row index (0-based)
        row: usize,
        /// Observed row sum
        sum: f64,
    },

    /// Error reported by the wrapped trial source
    #[error("Trial source error: {0}")]
    Source(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Binary serialization error occurred
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// JSON serialization error occurred
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for trialhist operations.
pub type Result<T> = std::result::Result<T, TrialHistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TrialHistError::InvalidNumChoices(1);
        assert_eq!(
            err.to_string(),
            "Invalid number of choices: 1 (need at least 2)"
        );

        let err = TrialHistError::GroundTruthOutOfRange {
            ground_truth: 4,
            n_ch: 3,
        };
        assert_eq!(err.to_string(), "Ground truth out of range: 4 not in [1, 3]");

        let err = TrialHistError::UnknownTopology("ccw".into());
        assert_eq!(
            err.to_string(),
            "Unknown transition topology: \"ccw\" (expected \"CW\" or \"RepAlt\")"
        );
    }

    #[test]
    fn test_io_conversion() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }

        assert!(matches!(fails(), Err(TrialHistError::Io(_))));
    }
}
