//! Property-based tests for the B+ tree.
//!
//! These tests verify invariants that should hold for every insertion
//! sequence. A sorted `Vec` serves as the oracle for leaf-chain contents.

mod common;

use adaptree::{AlwaysBalanced, AlwaysFill, BPlusTree, SequentialDetect, SplitPolicy};
use common::{leaf_sizes, stable_order, tagged_chain, Tagged};
use proptest::prelude::*;

// ============================================================================
//  Strategies
// ============================================================================

/// Orders from the minimum up to a moderately wide node.
fn order() -> impl Strategy<Value = usize> {
    2usize..=12
}

/// Keys from a small domain so duplicates are common.
fn dense_keys(max_count: usize) -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(0u16..64, 0..=max_count)
}

/// Keys from the full domain, mostly distinct.
fn sparse_keys(max_count: usize) -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(any::<u32>(), 0..=max_count)
}

/// Keys from a tiny domain, tagged with their insertion index.
fn tagged_keys(max_count: usize) -> impl Strategy<Value = Vec<Tagged>> {
    prop::collection::vec(0u32..8, 0..=max_count).prop_map(|keys| {
        keys.into_iter()
            .enumerate()
            .map(|(i, key)| Tagged::new(key, i as u32))
            .collect()
    })
}

/// Equal keys must read back along the leaf chain in insertion order.
fn check_insertion_order<P: SplitPolicy>(
    order: usize,
    policy: P,
    keys: &[Tagged],
) -> Result<(), TestCaseError> {
    let mut tree = BPlusTree::with_policy(order, policy).unwrap();
    tree.extend(keys.iter().copied());

    prop_assert_eq!(tagged_chain(&tree), stable_order(keys));
    prop_assert!(tree.verify().is_ok(), "verify failed: {:?}", tree.verify());
    Ok(())
}

/// Inserts `keys` and checks every property against a sorted oracle.
fn check_tree<K, P>(order: usize, policy: P, keys: &[K]) -> Result<(), TestCaseError>
where
    K: Ord + Clone + std::fmt::Debug,
    P: SplitPolicy,
{
    let mut tree = BPlusTree::with_policy(order, policy).unwrap();
    tree.extend(keys.iter().cloned());

    prop_assert!(tree.verify().is_ok(), "verify failed: {:?}", tree.verify());

    // Sortedness and completeness.
    let chain: Vec<K> = tree.keys().cloned().collect();
    let mut expected = keys.to_vec();
    expected.sort();
    prop_assert_eq!(chain, expected);
    prop_assert_eq!(tree.len(), keys.len());

    // Balance.
    let depths = tree.leaf_depths();
    prop_assert!(depths.iter().all(|&d| d + 1 == tree.height()));

    // Structure.
    for level in tree.level_order() {
        for view in level {
            prop_assert!(view.keys.len() < order);
        }
    }
    Ok(())
}

// ============================================================================
//  Invariants per policy
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn sequential_detect_preserves_invariants(order in order(), keys in dense_keys(300)) {
        check_tree(order, SequentialDetect, &keys)?;
    }

    #[test]
    fn sequential_detect_sparse_keys(order in order(), keys in sparse_keys(300)) {
        check_tree(order, SequentialDetect, &keys)?;
    }

    #[test]
    fn always_balanced_preserves_invariants(order in order(), keys in dense_keys(300)) {
        check_tree(order, AlwaysBalanced, &keys)?;
    }

    #[test]
    fn always_fill_preserves_invariants(order in order(), keys in dense_keys(300)) {
        check_tree(order, AlwaysFill, &keys)?;
    }

    #[test]
    fn equal_keys_keep_insertion_order(order in order(), keys in tagged_keys(300)) {
        check_insertion_order(order, SequentialDetect, &keys)?;
        check_insertion_order(order, AlwaysBalanced, &keys)?;
        check_insertion_order(order, AlwaysFill, &keys)?;
    }

    /// Ascending runs fill every leaf except the last one.
    #[test]
    fn ascending_run_fills_leaves(order in order(), start in 0u32..1000, count in 1usize..400) {
        let mut tree = BPlusTree::new(order).unwrap();
        tree.extend(start..start + count as u32);

        let sizes = leaf_sizes(&tree);
        let (_, full) = sizes.split_last().unwrap();
        prop_assert!(full.iter().all(|&s| s == order - 1), "sizes {:?}", sizes);
    }

    /// Traversals are deterministic without intervening inserts.
    #[test]
    fn traversal_is_idempotent(order in order(), keys in sparse_keys(100)) {
        let mut tree = BPlusTree::new(order).unwrap();
        tree.extend(keys);

        prop_assert_eq!(tree.level_order(), tree.level_order());
        let first: Vec<&[u32]> = tree.leaf_chain().collect();
        let second: Vec<&[u32]> = tree.leaf_chain().collect();
        prop_assert_eq!(first, second);
    }

    /// Stats agree with the traversal views.
    #[test]
    fn stats_match_traversal(order in order(), keys in dense_keys(200)) {
        let mut tree = BPlusTree::new(order).unwrap();
        tree.extend(keys.iter().copied());
        let stats = tree.stats();

        prop_assert_eq!(stats.leaf_keys, keys.len());
        prop_assert_eq!(stats.node_count(), tree.node_count());
        prop_assert_eq!(stats.height, tree.height());
        prop_assert_eq!(stats.leaf_nodes, tree.leaf_chain().count());
        prop_assert_eq!(stats.capacity, tree.node_count() * order);
    }
}
