//! B+ tree index.
//!
//! An in-memory B+ tree with sorted multiset insertion, a leaf chain for
//! ordered scans, and split placement chosen per overflow by a
//! [`SplitPolicy`].
//!
//! # Components
//! - [`BPlusTree`] - The tree and its insert path
//! - [`split`] - Split strategies and policies
//! - [`NodeView`] / [`LeafChain`] - Read-only traversal for reporting
//! - [`Occupancy`] / [`TreeStats`] - Utilization figures

mod node;
pub mod split;
mod stats;
mod traversal;
mod tree;
mod verify;

pub use node::NodeKind;
pub use split::{AlwaysBalanced, AlwaysFill, SequentialDetect, SplitPolicy, SplitStrategy};
pub use stats::{Occupancy, TreeStats};
pub use traversal::{LeafChain, NodeView};
pub use tree::BPlusTree;
