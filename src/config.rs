//! Process configuration.
//!
//! [`TrialHistoryConfig`] captures every constructor parameter of a
//! trial-history process. It serializes to JSON so experiment setups can be
//! stored next to their results.
//!
//! # Example
//!
//! ```
//! use trialhist::{SwitchPolicy, Topology, TrialHistoryConfig};
//!
//! let config = TrialHistoryConfig::default()
//!     .with_n_ch(3)
//!     .with_tr_prob(0.9)
//!     .with_switch(SwitchPolicy::Periodic(5))
//!     .with_topology(Topology::RepAlt)
//!     .with_pass_block(true);
//! config.validate().unwrap();
//!
//! let json = config.to_json().unwrap();
//! let restored = TrialHistoryConfig::from_json(&json).unwrap();
//! assert_eq!(config, restored);
//! ```

use crate::transition::Topology;
use crate::{Result, TrialHistError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of choices.
pub const DEFAULT_N_CH: usize = 2;
/// Default probability of the favoured transition.
pub const DEFAULT_TR_PROB: f64 = 0.8;
/// Default block duration in trials.
pub const DEFAULT_BLOCK_DUR: u64 = 200;

/// Rule deciding when the block type flips.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchPolicy {
    /// Flip whenever the trial count is a multiple of the duration
    Periodic(u64),
    /// Flip with this probability at every trial boundary
    Stochastic(f64),
}

impl SwitchPolicy {
    /// Resolve the two-optional-field form used by experiment scripts.
    ///
    /// # Errors
    ///
    /// Returns `AmbiguousSwitchPolicy` unless exactly one argument is
    /// `Some`, and validates the chosen parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use trialhist::SwitchPolicy;
    ///
    /// assert_eq!(
    ///     SwitchPolicy::from_options(Some(200), None).unwrap(),
    ///     SwitchPolicy::Periodic(200)
    /// );
    /// assert!(SwitchPolicy::from_options(Some(200), Some(0.1)).is_err());
    /// assert!(SwitchPolicy::from_options(None, None).is_err());
    /// ```
    pub fn from_options(block_dur: Option<u64>, blk_ch_prob: Option<f64>) -> Result<Self> {
        let policy = match (block_dur, blk_ch_prob) {
            (Some(dur), None) => SwitchPolicy::Periodic(dur),
            (None, Some(p)) => SwitchPolicy::Stochastic(p),
            _ => return Err(TrialHistError::AmbiguousSwitchPolicy),
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Check the policy parameter.
    pub fn validate(&self) -> Result<()> {
        match *self {
            SwitchPolicy::Periodic(0) => Err(TrialHistError::InvalidBlockDuration(0)),
            SwitchPolicy::Periodic(_) => Ok(()),
            SwitchPolicy::Stochastic(p) => check_probability("blk_ch_prob", p),
        }
    }
}

impl Default for SwitchPolicy {
    fn default() -> Self {
        SwitchPolicy::Periodic(DEFAULT_BLOCK_DUR)
    }
}

/// Configuration of a trial-history process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialHistoryConfig {
    /// Number of choices
    pub n_ch: usize,
    /// Probability of the favoured transition
    pub tr_prob: f64,
    /// Block switching rule
    pub switch: SwitchPolicy,
    /// Append the current block to every observation
    pub pass_block: bool,
    /// Shape of the second transition slice
    pub topology: Topology,
}

impl Default for TrialHistoryConfig {
    fn default() -> Self {
        Self {
            n_ch: DEFAULT_N_CH,
            tr_prob: DEFAULT_TR_PROB,
            switch: SwitchPolicy::default(),
            pass_block: false,
            topology: Topology::default(),
        }
    }
}

impl TrialHistoryConfig {
    /// Set the number of choices.
    pub fn with_n_ch(mut self, n_ch: usize) -> Self {
        self.n_ch = n_ch;
        self
    }

    /// Set the favoured-transition probability.
    pub fn with_tr_prob(mut self, tr_prob: f64) -> Self {
        self.tr_prob = tr_prob;
        self
    }

    /// Set the block switching rule.
    pub fn with_switch(mut self, switch: SwitchPolicy) -> Self {
        self.switch = switch;
        self
    }

    /// Enable or disable appending the block to observations.
    pub fn with_pass_block(mut self, pass_block: bool) -> Self {
        self.pass_block = pass_block;
        self
    }

    /// Set the transition topology.
    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// Reject any invalid parameter.
    pub fn validate(&self) -> Result<()> {
        check_num_choices(self.n_ch)?;
        check_probability("tr_prob", self.tr_prob)?;
        self.switch.validate()
    }

    /// Serialize to a pretty JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

pub(crate) fn check_num_choices(n_ch: usize) -> Result<()> {
    if n_ch < 2 {
        return Err(TrialHistError::InvalidNumChoices(n_ch));
    }
    Ok(())
}

pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(TrialHistError::InvalidProbability { name, value })
    }
}
