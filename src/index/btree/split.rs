//! Split policies.
//!
//! When a node overflows, a [`SplitPolicy`] looks at its keys and picks a
//! [`SplitStrategy`]. The strategy then fixes where the node is cut.
//!
//! Implements:
//! - [`SequentialDetect`] - Fill-optimized for ascending runs, balanced otherwise
//! - [`AlwaysBalanced`] - Classic midpoint split
//! - [`AlwaysFill`] - Always keep the left node full

use crate::common::NodeId;

/// Where to cut an overflowing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitStrategy {
    /// Cut at the midpoint, `len / 2`.
    Balanced,

    /// Cut right before the last key. The left node keeps `len - 1` keys and
    /// the right node starts from the newest one.
    FillOptimized,
}

impl SplitStrategy {
    /// Split index for a node holding `len` keys.
    ///
    /// Keys before the index stay left. For a leaf, the key at the index and
    /// everything after it move right. For an internal node, the key at the
    /// index is pushed up to the parent.
    ///
    /// # Example
    /// ```
    /// use adaptree::SplitStrategy;
    ///
    /// assert_eq!(SplitStrategy::Balanced.split_index(5), 2);
    /// assert_eq!(SplitStrategy::FillOptimized.split_index(5), 4);
    /// ```
    #[inline]
    pub fn split_index(self, len: usize) -> usize {
        match self {
            SplitStrategy::Balanced => len / 2,
            SplitStrategy::FillOptimized => len.saturating_sub(1),
        }
    }
}

/// Chooses a [`SplitStrategy`] for an overflowing node.
///
/// `select` must be a pure function of `keys`; the tree calls it once per
/// split with the node's keys after the overflowing key went in.
pub trait SplitPolicy {
    fn select<K: Ord>(&self, keys: &[K]) -> SplitStrategy;
}

/// Detects ascending insertion by comparing the last two keys.
///
/// If the last key is strictly greater than the one before it, the overflow
/// most likely came from a sequential run and the node is split
/// fill-optimized. Anything else (including equal keys and nodes with fewer
/// than two keys) gets a balanced split.
///
/// This is a heuristic: interleaved ascending and descending bursts can fool
/// it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequentialDetect;

impl SplitPolicy for SequentialDetect {
    fn select<K: Ord>(&self, keys: &[K]) -> SplitStrategy {
        match keys {
            [.., prev, last] if last > prev => SplitStrategy::FillOptimized,
            _ => SplitStrategy::Balanced,
        }
    }
}

/// Always splits at the midpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlwaysBalanced;

impl SplitPolicy for AlwaysBalanced {
    fn select<K: Ord>(&self, _keys: &[K]) -> SplitStrategy {
        SplitStrategy::Balanced
    }
}

/// Always keeps the left node full.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlwaysFill;

impl SplitPolicy for AlwaysFill {
    fn select<K: Ord>(&self, _keys: &[K]) -> SplitStrategy {
        SplitStrategy::FillOptimized
    }
}

/// Outcome of splitting a node, reported to its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Split<K> {
    /// Separator the parent must insert.
    pub(crate) promoted: K,

    /// Newly created right-hand node.
    pub(crate) sibling: NodeId,

    /// `false` for a leaf split (copy-up: the separator is still the
    /// sibling's first key). `true` for an internal split (push-up: the
    /// separator lives only in the parent).
    pub(crate) push_up: bool,
}
