//! TrialHistory - block-structured serial dependence over a trial source.
//!
//! This module provides [`TrialHistory`], which wraps a [`TrialSource`] and
//! chooses the ground truth of every new trial from a transition matrix row
//! selected by the current block and the previous ground truth.
//!
//! # Trial boundary update
//!
//! Each time the source reports the end of a trial:
//!
//! 1. The block may flip, according to the [`SwitchPolicy`]
//! 2. The next ground truth is drawn from
//!    `matrix[block][prev_ground_truth - 1]` with the source's generator
//! 3. The draw becomes the new previous ground truth
//! 4. The source starts a new trial with that ground truth
//!
//! Under [`SwitchPolicy::Periodic`] the flip test is
//! `trial_count % block_dur == 0`, which also holds at trial 0, so the very
//! first boundary evaluated at a count of 0 flips the block.
//!
//! # Examples
//!
//! ```ignore
//! let config = TrialHistoryConfig::default()
//!     .with_n_ch(3)
//!     .with_tr_prob(0.9)
//!     .with_topology(Topology::RepAlt)
//!     .with_pass_block(true);
//! let mut env = TrialHistory::new(task, config)?;
//!
//! env.seed(Some(0));
//! let result = env.step(1)?;
//! let block = *result.observation.last().unwrap();
//! ```

use crate::block::{BlockType, NUM_BLOCKS};
use crate::config::{SwitchPolicy, TrialHistoryConfig};
use crate::snapshot::ProcessSnapshot;
use crate::source::{StepResult, TrialParams, TrialSource};
use crate::transition::TransitionMatrix;
use crate::{Result, TrialHistError};
use tracing::{debug, info, trace};

/// Trial source wrapper imposing block-structured transition statistics on
/// the ground-truth sequence.
pub struct TrialHistory<S: TrialSource> {
    source: S,
    config: TrialHistoryConfig,
    matrix: TransitionMatrix,

    // State
    block: BlockType,
    prev_ground_truth: usize,
    prev_correct: Option<bool>,
}

impl<S: TrialSource> TrialHistory<S> {
    /// Wrap a trial source.
    ///
    /// The initial block is drawn uniformly from the two block types. The
    /// previous ground truth is taken from the source when it already has
    /// one, otherwise drawn uniformly from its choices.
    ///
    /// # Errors
    ///
    /// - Any configuration error from [`TrialHistoryConfig::validate`]
    /// - `ChoiceSetMismatch` if the source's choices are not `1..=n_ch`
    /// - `GroundTruthOutOfRange` if the source's current ground truth is
    ///   not one of its choices
    pub fn new(mut source: S, config: TrialHistoryConfig) -> Result<Self> {
        config.validate()?;
        check_choices(source.choices(), config.n_ch)?;
        let matrix = TransitionMatrix::build(config.n_ch, config.tr_prob, config.topology)?;

        let block = BlockType::from_index(source.rng().choose_index(NUM_BLOCKS));
        let prev_ground_truth = match source.ground_truth() {
            Some(gt) => {
                matrix.row(block, gt)?;
                gt
            }
            None => {
                let idx = source.rng().choose_index(config.n_ch);
                source.choices()[idx]
            }
        };

        debug!(
            n_ch = config.n_ch,
            tr_prob = config.tr_prob,
            topology = %config.topology,
            block = %block,
            prev_ground_truth,
            "trial history initialised"
        );

        Ok(Self {
            source,
            config,
            matrix,
            block,
            prev_ground_truth,
            prev_correct: None,
        })
    }

    /// Advance the block process at a trial boundary and start the next
    /// trial.
    ///
    /// Returns the ground truth handed to the source.
    pub fn on_trial_boundary(&mut self, params: &TrialParams) -> Result<usize> {
        let trial = self.source.trial_count();
        let switch = match self.config.switch {
            SwitchPolicy::Periodic(block_dur) => trial % block_dur == 0,
            SwitchPolicy::Stochastic(p) => self.source.rng().uniform() < p,
        };
        if switch {
            self.block = self.block.flip();
            debug!(trial, block = %self.block, "block switch");
        }

        let row = self.matrix.row(self.block, self.prev_ground_truth)?;
        let idx = self.source.rng().weighted_index(row)?;
        let ground_truth = *self.source.choices().get(idx).ok_or(
            TrialHistError::GroundTruthOutOfRange {
                ground_truth: idx + 1,
                n_ch: self.config.n_ch,
            },
        )?;
        debug!(
            trial,
            block = %self.block,
            prev = self.prev_ground_truth,
            ground_truth,
            "sampled ground truth"
        );

        self.prev_ground_truth = ground_truth;
        self.source.start_new_trial(ground_truth, params)?;
        Ok(ground_truth)
    }

    /// Step the source, handling trial boundaries.
    ///
    /// When the step ends a trial, `info.tr_mat` receives the transition
    /// slice of the block that trial ran under and the next trial is
    /// started. With `pass_block` set, the block of the trial now running is
    /// appended to the observation.
    pub fn step(&mut self, action: usize) -> Result<StepResult> {
        let mut result = self.source.step(action)?;
        trace!(action, reward = result.reward, new_trial = result.info.new_trial, "step");

        if result.info.new_trial {
            result.info.tr_mat = Some(self.matrix.slice(self.block).to_vec());
            self.prev_correct = Some(result.reward == self.source.correct_reward());
            self.on_trial_boundary(&TrialParams::new())?;
        }
        if self.config.pass_block {
            result.observation.push(self.block.as_f64());
        }
        Ok(result)
    }

    /// Reset the source's episode.
    ///
    /// Block state is kept. With `pass_block` set, the current block is
    /// appended to the returned observation.
    pub fn reset(&mut self) -> Result<Vec<f64>> {
        let mut observation = self.source.reset()?;
        if self.config.pass_block {
            observation.push(self.block.as_f64());
        }
        Ok(observation)
    }

    /// Reseed the source's generator and redraw the block.
    pub fn seed(&mut self, seed: Option<u64>) {
        self.source.seed(seed);
        self.block = BlockType::from_index(self.source.rng().choose_index(NUM_BLOCKS));
        info!(?seed, block = %self.block, "reseeded");
    }

    /// Block of the current trial.
    #[inline]
    pub fn current_block(&self) -> BlockType {
        self.block
    }

    /// Ground truth of the current trial.
    #[inline]
    pub fn prev_ground_truth(&self) -> usize {
        self.prev_ground_truth
    }

    /// Whether the last completed trial was rewarded as correct.
    #[inline]
    pub fn prev_correct(&self) -> Option<bool> {
        self.prev_correct
    }

    /// Transition matrix in use.
    #[inline]
    pub fn transition_matrix(&self) -> &TransitionMatrix {
        &self.matrix
    }

    /// Configuration in use.
    #[inline]
    pub fn config(&self) -> &TrialHistoryConfig {
        &self.config
    }

    /// Wrapped trial source.
    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the wrapped trial source.
    #[inline]
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Unwrap the trial source.
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Capture the block-process state.
    pub fn snapshot(&self) -> ProcessSnapshot {
        ProcessSnapshot {
            block: self.block,
            prev_ground_truth: self.prev_ground_truth,
        }
    }

    /// Restore state captured by [`snapshot`](Self::snapshot).
    ///
    /// # Errors
    ///
    /// Returns `GroundTruthOutOfRange` if the snapshot's ground truth does
    /// not fit this process; the current state is left untouched.
    pub fn restore(&mut self, snapshot: ProcessSnapshot) -> Result<()> {
        self.matrix.row(snapshot.block, snapshot.prev_ground_truth)?;
        self.block = snapshot.block;
        self.prev_ground_truth = snapshot.prev_ground_truth;
        Ok(())
    }

    /// Force the block-process state. Intended for experiment setup and
    /// tests.
    pub fn set_state(&mut self, block: BlockType, prev_ground_truth: usize) -> Result<()> {
        self.restore(ProcessSnapshot {
            block,
            prev_ground_truth,
        })
    }
}

fn check_choices(choices: &[usize], n_ch: usize) -> Result<()> {
    if choices.len() != n_ch {
        return Err(TrialHistError::ChoiceSetMismatch(format!(
            "source has {} choices, configured for {}",
            choices.len(),
            n_ch
        )));
    }
    if choices.iter().enumerate().any(|(i, &c)| c != i + 1) {
        return Err(TrialHistError::ChoiceSetMismatch(format!(
            "labels {:?} are not 1..={}",
            choices, n_ch
        )));
    }
    Ok(())
}
