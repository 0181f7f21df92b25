//! Transition matrix builder.
//!
//! Builds the pair of row-stochastic `n_ch × n_ch` matrices that drive the
//! trial-history process, one slice per [`BlockType`].
//!
//! # Construction
//!
//! Every entry of block 0 starts at the background mass
//! `(1 - tr_prob) / (n_ch - 1)`, then the cyclic successor of each choice is
//! overwritten with `tr_prob`. Block 1 depends on the [`Topology`]:
//!
//! - [`Topology::Cw`]: the transpose of block 0 (cyclic predecessor bias)
//! - [`Topology::RepAlt`]: background fill with `tr_prob` on the diagonal
//!   (repetition bias)
//!
//! Each row therefore holds one `tr_prob` entry and `n_ch - 1` background
//! entries, which sum to `1 - tr_prob`.
//!
//! # Examples
//!
//! ```
//! use trialhist::{BlockType, Topology, TransitionMatrix};
//!
//! let tm = TransitionMatrix::build(3, 0.9, Topology::RepAlt).unwrap();
//! let row = tm.row(BlockType::Zero, 1).unwrap();
//! assert!((row[1] - 0.9).abs() < 1e-12); // 1 -> 2 favoured
//! let row = tm.row(BlockType::One, 1).unwrap();
//! assert!((row[0] - 0.9).abs() < 1e-12); // 1 -> 1 favoured
//! ```

use crate::block::{BlockType, NUM_BLOCKS};
use crate::config::{check_num_choices, check_probability};
use crate::utils::row_sum;
use crate::{Result, TrialHistError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape of the block 1 slice relative to block 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Topology {
    /// Block 1 is the mirror-image rotation of block 0
    #[default]
    #[serde(rename = "CW")]
    Cw,
    /// Block 1 favours repeating the previous choice
    #[serde(rename = "RepAlt")]
    RepAlt,
}

impl FromStr for Topology {
    type Err = TrialHistError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CW" => Ok(Topology::Cw),
            "RepAlt" => Ok(Topology::RepAlt),
            other => Err(TrialHistError::UnknownTopology(other.to_string())),
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Cw => f.write_str("CW"),
            Topology::RepAlt => f.write_str("RepAlt"),
        }
    }
}

/// Two row-stochastic transition slices indexed
/// `[block][previous choice][next choice]`.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionMatrix {
    n_ch: usize,
    tr_prob: f64,
    topology: Topology,
    slices: [Vec<Vec<f64>>; NUM_BLOCKS],
}

impl TransitionMatrix {
    /// Build the transition slices.
    ///
    /// # Errors
    ///
    /// - `InvalidNumChoices` if `n_ch < 2`
    /// - `InvalidProbability` if `tr_prob` is not in `(0, 1)`
    pub fn build(n_ch: usize, tr_prob: f64, topology: Topology) -> Result<Self> {
        check_num_choices(n_ch)?;
        check_probability("tr_prob", tr_prob)?;

        let background = (1.0 - tr_prob) / (n_ch - 1) as f64;

        let mut successor = vec![vec![background; n_ch]; n_ch];
        for (i, row) in successor.iter_mut().enumerate() {
            row[(i + 1) % n_ch] = tr_prob;
        }

        let second = match topology {
            Topology::Cw => transpose(&successor),
            Topology::RepAlt => {
                let mut repeat = vec![vec![background; n_ch]; n_ch];
                for (i, row) in repeat.iter_mut().enumerate() {
                    row[i] = tr_prob;
                }
                repeat
            }
        };

        Ok(Self {
            n_ch,
            tr_prob,
            topology,
            slices: [successor, second],
        })
    }

    /// Number of choices.
    #[inline]
    pub fn n_ch(&self) -> usize {
        self.n_ch
    }

    /// Probability of the favoured transition.
    #[inline]
    pub fn tr_prob(&self) -> f64 {
        self.tr_prob
    }

    /// Topology the matrix was built with.
    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Background probability of each non-favoured transition.
    #[inline]
    pub fn background(&self) -> f64 {
        (1.0 - self.tr_prob) / (self.n_ch - 1) as f64
    }

    /// The `n_ch × n_ch` slice for one block.
    #[inline]
    pub fn slice(&self, block: BlockType) -> &[Vec<f64>] {
        &self.slices[block.index()]
    }

    /// Distribution over the next choice given the previous 1-based
    /// ground truth.
    ///
    /// # Errors
    ///
    /// Returns `GroundTruthOutOfRange` if `prev_ground_truth` is not in
    /// `[1, n_ch]`.
    pub fn row(&self, block: BlockType, prev_ground_truth: usize) -> Result<&[f64]> {
        if prev_ground_truth == 0 || prev_ground_truth > self.n_ch {
            return Err(TrialHistError::GroundTruthOutOfRange {
                ground_truth: prev_ground_truth,
                n_ch: self.n_ch,
            });
        }
        Ok(&self.slices[block.index()][prev_ground_truth - 1])
    }

    /// Verify every row of both slices is a probability distribution.
    ///
    /// This never renormalizes; a malformed row is an error.
    pub fn check_row_stochastic(&self, tol: f64) -> Result<()> {
        for block in BlockType::ALL {
            for (r, row) in self.slice(block).iter().enumerate() {
                if let Some(w) = row.iter().find(|w| !(**w >= 0.0)) {
                    return Err(TrialHistError::InvalidWeights(format!(
                        "negative entry {} in row {} of block {}",
                        w, r, block
                    )));
                }
                let sum = row_sum(row);
                if (sum - 1.0).abs() > tol {
                    return Err(TrialHistError::NotRowStochastic {
                        block: block.index(),
                        row: r,
                        sum,
                    });
                }
            }
        }
        Ok(())
    }
}

fn transpose(m: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = m.len();
    (0..n).map(|i| (0..n).map(|j| m[j][i]).collect()).collect()
}
