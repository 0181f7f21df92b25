//! Block identity - the two serial-dependence regimes.
//!
//! A block is a contiguous run of trials sharing one slice of the
//! transition matrix. There are always exactly two block types, whatever
//! the number of choices.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of block types.
pub const NUM_BLOCKS: usize = 2;

/// One of the two transition regimes.
///
/// # Examples
///
/// ```
/// use trialhist::BlockType;
///
/// let b = BlockType::Zero;
/// assert_eq!(b.flip(), BlockType::One);
/// assert_eq!(b.flip().flip(), b);
/// assert_eq!(BlockType::One.index(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockType {
    /// Successor-biased regime
    Zero,
    /// Predecessor-biased (CW) or repetition-biased (RepAlt) regime
    One,
}

impl BlockType {
    /// Both block types in index order.
    pub const ALL: [BlockType; NUM_BLOCKS] = [BlockType::Zero, BlockType::One];

    /// Index into the transition matrix.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            BlockType::Zero => 0,
            BlockType::One => 1,
        }
    }

    /// Block type for an index, taken mod 2.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % NUM_BLOCKS]
    }

    /// The other block type, `(block + 1) mod 2`.
    #[inline]
    pub fn flip(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Scalar value appended to observations.
    #[inline]
    pub fn as_f64(self) -> f64 {
        self.index() as f64
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}
