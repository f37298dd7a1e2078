//! Shared helpers for integration tests.
//!
//! # Logging
//! Call [`init_tracing`] at the top of a test to see split/promotion events.
//! Filter with `RUST_LOG`, e.g. `RUST_LOG=adaptree=debug cargo test`.

#![allow(dead_code)]

use adaptree::{BPlusTree, SplitPolicy};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a test-friendly subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adaptree=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

/// Sizes of all leaves, left to right along the chain.
pub fn leaf_sizes<K, P>(tree: &BPlusTree<K, P>) -> Vec<usize> {
    tree.leaf_chain().map(|leaf| leaf.len()).collect()
}

/// Assert every invariant checked by `verify` plus the balance and
/// occupancy properties observable through the public views.
pub fn assert_well_formed<K, P>(tree: &BPlusTree<K, P>)
where
    K: Ord + Clone + std::fmt::Debug,
    P: SplitPolicy,
{
    if let Err(e) = tree.verify() {
        panic!("tree failed verification: {}", e);
    }

    let depths = tree.leaf_depths();
    assert!(
        depths.iter().all(|&d| d == tree.height() - 1),
        "leaves at uneven depths: {:?}",
        depths
    );

    for occupancy in tree.occupancies() {
        assert!(occupancy.used < tree.order(), "node at or above order");
    }
}

/// Key ordered by `key` alone. `tag` rides along so tests can tell equal
/// keys apart and check where duplicates landed.
#[derive(Debug, Clone, Copy)]
pub struct Tagged {
    pub key: u32,
    pub tag: u32,
}

impl Tagged {
    pub fn new(key: u32, tag: u32) -> Self {
        Self { key, tag }
    }
}

impl PartialEq for Tagged {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Tagged {}

impl PartialOrd for Tagged {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tagged {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// `(key, tag)` pairs along the leaf chain.
pub fn tagged_chain<P>(tree: &BPlusTree<Tagged, P>) -> Vec<(u32, u32)> {
    tree.keys().map(|t| (t.key, t.tag)).collect()
}

/// Stable sort by key: the order the leaf chain must reproduce.
pub fn stable_order(keys: &[Tagged]) -> Vec<(u32, u32)> {
    let mut sorted = keys.to_vec();
    sorted.sort();
    sorted.iter().map(|t| (t.key, t.tag)).collect()
}
