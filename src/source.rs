//! Trial-source interface.
//!
//! A trial source is the task being wrapped: it renders trials for a given
//! ground truth, advances simulated time and owns the random generator. The
//! trial-history process only ever talks to it through [`TrialSource`].

use crate::random::RandomSource;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extra parameters forwarded to [`TrialSource::start_new_trial`].
pub type TrialParams = BTreeMap<String, serde_json::Value>;

/// Per-step metadata reported by a trial source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// A trial ended at this step
    pub new_trial: bool,
    /// Ground truth of the trial this step belonged to
    pub gt: Option<usize>,
    /// Transition slice of the block active during the trial that just
    /// ended. Filled in by the trial-history process.
    pub tr_mat: Option<Vec<Vec<f64>>>,
    /// Anything else the source wants to report
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl StepInfo {
    /// Info for a step inside a trial.
    pub fn within_trial(gt: usize) -> Self {
        Self {
            gt: Some(gt),
            ..Self::default()
        }
    }

    /// Info for the last step of a trial.
    pub fn trial_end(gt: usize) -> Self {
        Self {
            new_trial: true,
            gt: Some(gt),
            ..Self::default()
        }
    }
}

/// Result of advancing a trial source by one step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Observation vector
    pub observation: Vec<f64>,
    /// Reward for the action taken
    pub reward: f64,
    /// Episode finished
    pub done: bool,
    /// Step metadata
    pub info: StepInfo,
}

/// Capabilities the trial-history process requires from the wrapped task.
///
/// Implementors own the random generator; the process draws all of its
/// randomness through [`rng`](TrialSource::rng).
pub trait TrialSource {
    /// Number of trials started so far. Never decreases.
    fn trial_count(&self) -> u64;

    /// Reward delivered for a correct response.
    fn correct_reward(&self) -> f64;

    /// Choice labels, `1..=n_ch` in order.
    fn choices(&self) -> &[usize];

    /// Ground truth of the current trial, if a trial has been generated.
    fn ground_truth(&self) -> Option<usize>;

    /// Shared random generator.
    fn rng(&mut self) -> &mut dyn RandomSource;

    /// Begin the next trial with the given ground truth.
    fn start_new_trial(&mut self, ground_truth: usize, params: &TrialParams) -> Result<()>;

    /// Advance simulated time by one step.
    fn step(&mut self, action: usize) -> Result<StepResult>;

    /// Reset the episode and return the first observation.
    fn reset(&mut self) -> Result<Vec<f64>>;

    /// Reseed the random generator.
    fn seed(&mut self, seed: Option<u64>) {
        self.rng().reseed(seed);
    }
}
