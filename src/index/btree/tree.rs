//! B+ tree insertion.
//!
//! The [`BPlusTree`] provides:
//! - Sorted insertion with multiset semantics
//! - Recursive descent with split propagation back to the root
//! - Copy-up leaf splits and push-up internal splits
//! - Pluggable split placement via [`SplitPolicy`]

use std::fmt;

use tracing::{debug, trace};

use crate::common::config::DEFAULT_ORDER;
use crate::common::{NodeId, Result, TreeConfig};
use crate::index::btree::node::{InternalNode, LeafNode, Node};
use crate::index::btree::split::{SequentialDetect, Split, SplitPolicy};

/// An in-memory B+ tree over keys of type `K`.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │                        BPlusTree                         │
/// │  root ──▶ ┌──────────────┐                               │
/// │           │ Internal [20]│                               │
/// │           └──────┬───────┘                               │
/// │          ┌───────┴────────┐                              │
/// │          ▼                ▼                              │
/// │   ┌────────────┐   ┌────────────┐                        │
/// │   │ Leaf [5,10]│──▶│ Leaf [20]  │──▶ None   (leaf chain) │
/// │   └────────────┘   └────────────┘                        │
/// │                                                          │
/// │  nodes: Vec<Node<K>>   arena, indexed by NodeId          │
/// └──────────────────────────────────────────────────────────┘
/// ```
///
/// # Order
/// A node splits when its key count reaches `order`, so the largest node a
/// caller can observe holds `order - 1` keys.
///
/// # Ownership
/// The tree owns every node through its arena. Child lists and leaf
/// successor links are both [`NodeId`] handles; only child lists define the
/// tree shape, the successor link is a horizontal cross reference.
///
/// # Usage
/// ```
/// use adaptree::BPlusTree;
///
/// let mut tree = BPlusTree::new(3).unwrap();
/// for key in [10, 20, 5, 6, 12, 30] {
///     tree.insert(key);
/// }
///
/// let keys: Vec<_> = tree.keys().copied().collect();
/// assert_eq!(keys, vec![5, 6, 10, 12, 20, 30]);
/// ```
pub struct BPlusTree<K, P = SequentialDetect> {
    /// Every node ever created. Nodes are never freed.
    pub(super) nodes: Vec<Node<K>>,

    /// Current root.
    pub(super) root: NodeId,

    /// Key count that forces a split.
    pub(super) order: usize,

    /// Picks the split point of an overflowing node.
    pub(super) policy: P,

    /// Number of keys inserted so far.
    pub(super) len: usize,
}

impl<K> BPlusTree<K, SequentialDetect>
where
    K: Ord + Clone + fmt::Debug,
{
    /// Create an empty tree with the default sequential-detecting policy.
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if `order < MIN_ORDER`
    pub fn new(order: usize) -> Result<Self> {
        Self::with_policy(order, SequentialDetect)
    }
}

impl<K, P> BPlusTree<K, P>
where
    K: Ord + Clone + fmt::Debug,
    P: SplitPolicy,
{
    /// Create an empty tree with an explicit split policy.
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if `order < MIN_ORDER`
    pub fn with_policy(order: usize, policy: P) -> Result<Self> {
        Self::with_config(TreeConfig::new(order), policy)
    }

    /// Create an empty tree from a config.
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if `config.order < MIN_ORDER`
    pub fn with_config(config: TreeConfig, policy: P) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config.order, policy))
    }

    /// Construct without validating `order`.
    fn build(order: usize, policy: P) -> Self {
        debug!(order, "created B+ tree");
        Self {
            nodes: vec![Node::Leaf(LeafNode::new())],
            root: NodeId::new(0),
            order,
            policy,
            len: 0,
        }
    }

    // ========================================================================
    // Public API: Insert
    // ========================================================================

    /// Insert a key.
    ///
    /// Duplicates are kept: an equal key lands right after the existing ones.
    /// Any overflow is resolved before this returns, which may replace the
    /// root with a new internal node one level higher.
    pub fn insert(&mut self, key: K) {
        trace!(key = ?key, "insert");
        let split = self.insert_into(self.root, key);
        self.len += 1;

        if let Some(split) = split {
            self.grow_root(split);
        }
    }

    // ========================================================================
    // Public API: Accessors
    // ========================================================================

    /// Key count that forces a split.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of keys inserted, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The split policy in use.
    #[inline]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Number of nodes, leaves and internal nodes together.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of levels. A tree whose root is a leaf has height 1.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut current = self.root;
        while let Some(&first) = self.nodes[current.0].children().first() {
            current = first;
            height += 1;
        }
        height
    }

    // ========================================================================
    // Internal: Descent
    // ========================================================================

    /// Insert `key` into the subtree rooted at `id`.
    ///
    /// Returns the split this node underwent, if any, for the caller to
    /// attach one level up.
    fn insert_into(&mut self, id: NodeId, key: K) -> Option<Split<K>> {
        let (index, child) = match &mut self.nodes[id.0] {
            Node::Leaf(leaf) => {
                let pos = leaf.insert(key);
                trace!(node = %id, pos, len = leaf.keys.len(), "inserted into leaf");

                if leaf.keys.len() < self.order {
                    return None;
                }
                return Some(self.split_leaf(id));
            }
            Node::Internal(internal) => {
                let index = internal.child_index(&key);
                (index, internal.children[index])
            }
        };

        trace!(node = %id, index, child = %child, "descend");
        let split = self.insert_into(child, key)?;
        self.check_split(&split);

        let order = self.order;
        let internal = self.internal_mut(id);
        trace!(node = %id, promoted = ?split.promoted, "integrating child split");
        internal.integrate(index, split.promoted, split.sibling);

        if internal.keys.len() < order {
            return None;
        }
        Some(self.split_internal(id))
    }

    // ========================================================================
    // Internal: Splits
    // ========================================================================

    /// Split an overflowing leaf.
    ///
    /// The right half moves into a new leaf spliced into the chain after
    /// `id`. Its first key is copied up as the separator.
    fn split_leaf(&mut self, id: NodeId) -> Split<K> {
        let sibling = NodeId::new(self.nodes.len());
        let Node::Leaf(leaf) = &mut self.nodes[id.0] else {
            panic!("{} is not a leaf", id);
        };

        let strategy = self.policy.select(&leaf.keys);
        let at = strategy.split_index(leaf.keys.len());
        let right_keys = leaf.keys.split_off(at);
        assert!(
            !leaf.keys.is_empty() && !right_keys.is_empty(),
            "leaf split produced an empty half"
        );

        let next = leaf.next.replace(sibling);
        let promoted = right_keys[0].clone();

        debug!(
            node = %id,
            sibling = %sibling,
            ?strategy,
            left = leaf.keys.len(),
            right = right_keys.len(),
            promoted = ?promoted,
            "leaf split"
        );

        self.nodes.push(Node::Leaf(LeafNode {
            keys: right_keys,
            next,
        }));

        Split {
            promoted,
            sibling,
            push_up: false,
        }
    }

    /// Split an overflowing internal node.
    ///
    /// The key at the split index is pushed up and kept by neither half.
    /// The left node keeps the children up to and including the split
    /// index's child.
    fn split_internal(&mut self, id: NodeId) -> Split<K> {
        let sibling = NodeId::new(self.nodes.len());
        let Node::Internal(internal) = &mut self.nodes[id.0] else {
            panic!("{} is not an internal node", id);
        };

        let strategy = self.policy.select(&internal.keys);
        let at = strategy.split_index(internal.keys.len());
        let mut right_keys = internal.keys.split_off(at);
        let right_children = internal.children.split_off(at + 1);
        let promoted = right_keys.remove(0);

        assert_eq!(
            internal.children.len(),
            internal.keys.len() + 1,
            "left half child/key count mismatch after internal split"
        );
        assert_eq!(
            right_children.len(),
            right_keys.len() + 1,
            "right half child/key count mismatch after internal split"
        );

        debug!(
            node = %id,
            sibling = %sibling,
            ?strategy,
            left = internal.keys.len(),
            right = right_keys.len(),
            promoted = ?promoted,
            "internal split"
        );

        self.nodes.push(Node::Internal(InternalNode {
            keys: right_keys,
            children: right_children,
        }));

        Split {
            promoted,
            sibling,
            push_up: true,
        }
    }

    /// Install a new root above the old one after a root split.
    fn grow_root(&mut self, split: Split<K>) {
        self.check_split(&split);

        let old_root = self.root;
        let new_root = NodeId::new(self.nodes.len());
        self.nodes.push(Node::Internal(InternalNode {
            keys: vec![split.promoted],
            children: vec![old_root, split.sibling],
        }));
        self.root = new_root;

        debug!(root = %new_root, height = self.height(), "root split");
    }

    /// Assert that a split honors its copy-up/push-up contract.
    fn check_split(&self, split: &Split<K>) {
        let sibling = &self.nodes[split.sibling.0];
        assert_eq!(
            split.push_up,
            !sibling.is_leaf(),
            "push-up must come from an internal split, copy-up from a leaf split"
        );
        if !split.push_up {
            assert!(
                sibling.keys().first() == Some(&split.promoted),
                "copy-up separator must stay the sibling leaf's first key"
            );
        }
    }

    fn internal_mut(&mut self, id: NodeId) -> &mut InternalNode<K> {
        match &mut self.nodes[id.0] {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => panic!("{} is not an internal node", id),
        }
    }
}

impl<K, P> Default for BPlusTree<K, P>
where
    K: Ord + Clone + fmt::Debug,
    P: SplitPolicy + Default,
{
    fn default() -> Self {
        Self::build(DEFAULT_ORDER, P::default())
    }
}

impl<K, P> Extend<K> for BPlusTree<K, P>
where
    K: Ord + Clone + fmt::Debug,
    P: SplitPolicy,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: fmt::Debug, P: fmt::Debug> fmt::Debug for BPlusTree<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BPlusTree")
            .field("order", &self.order)
            .field("len", &self.len)
            .field("nodes", &self.nodes.len())
            .field("root", &self.root)
            .field("policy", &self.policy)
            .finish()
    }
}
