//! Trialhist - Block-Structured Trial-History Processes
//!
//! Trialhist generates the ground-truth sequence of a simulated
//! decision-making task whose statistics show **block-structured serial
//! dependence**: the probability that the correct response repeats, or moves
//! to a neighbouring choice, changes over blocks of trials. This mimics the
//! sequential-effects paradigms used in behavioural neuroscience.
//!
//! # Architecture
//!
//! - **TransitionMatrix**: two row-stochastic `n_ch × n_ch` slices, one per
//!   block type, built from a favoured-transition probability and a topology
//! - **TrialHistory**: wraps a [`TrialSource`], flips the block according to
//!   a [`SwitchPolicy`] and samples each new ground truth from the row
//!   selected by the block and the previous ground truth
//! - **TrialSource / RandomSource**: the interface to the wrapped task and
//!   the generator it owns
//!
//! # Examples
//!
//! ## Transition matrices
//!
//! ```
//! use trialhist::{BlockType, Topology, TransitionMatrix};
//!
//! let tm = TransitionMatrix::build(3, 0.9, Topology::Cw).unwrap();
//! tm.check_row_stochastic(1e-9).unwrap();
//!
//! // Block 0 favours the cyclic successor, block 1 the predecessor
//! assert_eq!(tm.slice(BlockType::Zero)[0][1], 0.9);
//! assert_eq!(tm.slice(BlockType::One)[1][0], 0.9);
//! ```
//!
//! ## Configuration
//!
//! ```
//! use trialhist::{SwitchPolicy, TrialHistoryConfig};
//!
//! let config = TrialHistoryConfig::default()
//!     .with_n_ch(4)
//!     .with_switch(SwitchPolicy::from_options(None, Some(0.02)).unwrap());
//! assert!(config.validate().is_ok());
//! ```
//!
//! # Reproducibility
//!
//! The process never owns a generator. Every draw goes through
//! [`TrialSource::rng`], so seeding the source reproduces both the trials it
//! renders and the ground-truth sequence.

pub mod block;
pub mod config;
pub mod error;
pub mod history;
pub mod random;
pub mod snapshot;
pub mod source;
pub mod transition;
pub mod utils;

// Re-exports for convenient access
pub use block::{BlockType, NUM_BLOCKS};
pub use config::{SwitchPolicy, TrialHistoryConfig};
pub use error::{Result, TrialHistError};
pub use history::TrialHistory;
pub use random::{RandomSource, SeededRng};
pub use snapshot::ProcessSnapshot;
pub use source::{StepInfo, StepResult, TrialParams, TrialSource};
pub use transition::{Topology, TransitionMatrix};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = "Trialhist";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}
