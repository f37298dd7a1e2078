//! adaptree - An in-memory B+ tree with adaptive fill-optimized splitting.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            adaptree                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            Reporting consumers (external)                │   │
//! │  │     level-order dump, fragmentation report, scans        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↑ read-only views                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Index Layer (index/btree/)                  │   │
//! │  │   BPlusTree: insert → descend → split → promote          │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │  Split Policies: SequentialDetect | Balanced |  │   │   │
//! │  │   │                  Fill  (pluggable)              │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  │      NodeView + LeafChain + Occupancy + TreeStats        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Common (common/)                         │   │
//! │  │          TreeConfig + NodeId + Error/Result              │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Error, config)
//! - [`index`] - Index structures (B+ tree)
//!
//! # Quick Start
//! ```
//! use adaptree::BPlusTree;
//!
//! let mut tree = BPlusTree::new(4).unwrap();
//! tree.extend(1..=10);
//!
//! // Ascending inserts keep every non-final leaf full.
//! let sizes: Vec<usize> = tree.leaf_chain().map(|leaf| leaf.len()).collect();
//! assert_eq!(sizes, vec![3, 3, 3, 1]);
//! assert!(tree.verify().is_ok());
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_ORDER, MIN_ORDER};
pub use common::{Error, NodeId, Result, TreeConfig};

pub use index::btree::{
    AlwaysBalanced, AlwaysFill, BPlusTree, LeafChain, NodeKind, NodeView, Occupancy,
    SequentialDetect, SplitPolicy, SplitStrategy, TreeStats,
};
