//! Process-state snapshots.
//!
//! A [`ProcessSnapshot`] captures the mutable state of a trial-history
//! process: the current block and the previous ground truth. The random
//! generator belongs to the trial source and is not included.
//!
//! # Example
//!
//! ```
//! use trialhist::{BlockType, ProcessSnapshot};
//!
//! let snap = ProcessSnapshot { block: BlockType::One, prev_ground_truth: 2 };
//! let bytes = snap.to_binary().unwrap();
//! assert_eq!(ProcessSnapshot::from_binary(&bytes).unwrap(), snap);
//! ```

use crate::block::BlockType;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Mutable state of a trial-history process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSnapshot {
    /// Block active for the current trial
    pub block: BlockType,
    /// Ground truth of the current trial (1-based)
    pub prev_ground_truth: usize,
}

impl ProcessSnapshot {
    /// Serialize to binary (bincode).
    pub fn to_binary(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from binary (bincode).
    pub fn from_binary(data: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(data)?)
    }

    /// Write the snapshot to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_binary()?)?;
        Ok(())
    }

    /// Read a snapshot from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_binary(&data)
    }
}
