//! Tree nodes.
//!
//! A node is either a leaf holding data keys plus a successor link, or an
//! internal node holding separator keys plus `keys.len() + 1` children.

use crate::common::NodeId;

/// Leaf or internal tag, exposed to traversal consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Leaf,
    Internal,
}

/// A node stored in the tree's arena.
#[derive(Debug, Clone)]
pub(crate) enum Node<K> {
    Leaf(LeafNode<K>),
    Internal(InternalNode<K>),
}

/// Data-bearing node at the bottom level.
#[derive(Debug, Clone)]
pub(crate) struct LeafNode<K> {
    pub(crate) keys: Vec<K>,
    /// Next leaf in key order. A cross reference, never an ownership edge.
    pub(crate) next: Option<NodeId>,
}

/// Routing node.
#[derive(Debug, Clone)]
pub(crate) struct InternalNode<K> {
    pub(crate) keys: Vec<K>,
    pub(crate) children: Vec<NodeId>,
}

impl<K: Ord> LeafNode<K> {
    pub(crate) fn new() -> Self {
        Self {
            keys: Vec::new(),
            next: None,
        }
    }

    /// Position for `key`: after every key less than or equal to it, so a
    /// duplicate lands behind the existing run of equal keys and equal keys
    /// keep their insertion order.
    #[inline]
    pub(crate) fn insert_position(&self, key: &K) -> usize {
        self.keys.partition_point(|k| k <= key)
    }

    /// Insert `key` in sorted position and return the position used.
    pub(crate) fn insert(&mut self, key: K) -> usize {
        let pos = self.insert_position(&key);
        self.keys.insert(pos, key);
        pos
    }
}

impl<K: Ord> InternalNode<K> {
    /// Child to descend into for `key`. A key equal to a separator routes to
    /// the child on the separator's right.
    #[inline]
    pub(crate) fn child_index(&self, key: &K) -> usize {
        self.keys.partition_point(|k| key >= k)
    }

    /// Attach a split result below this node: `promoted` goes in at `index`,
    /// the sibling takes the child slot right after it.
    pub(crate) fn integrate(&mut self, index: usize, promoted: K, sibling: NodeId) {
        self.keys.insert(index, promoted);
        self.children.insert(index + 1, sibling);
        assert_eq!(
            self.children.len(),
            self.keys.len() + 1,
            "internal node child/key count mismatch after integrating a split"
        );
    }
}

impl<K> Node<K> {
    #[inline]
    pub(crate) fn kind(&self) -> NodeKind {
        match self {
            Node::Leaf(_) => NodeKind::Leaf,
            Node::Internal(_) => NodeKind::Internal,
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    #[inline]
    pub(crate) fn keys(&self) -> &[K] {
        match self {
            Node::Leaf(leaf) => &leaf.keys,
            Node::Internal(internal) => &internal.keys,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.keys().len()
    }

    /// Children of an internal node, empty for a leaf.
    #[inline]
    pub(crate) fn children(&self) -> &[NodeId] {
        match self {
            Node::Leaf(_) => &[],
            Node::Internal(internal) => &internal.children,
        }
    }

    /// Leaf successor, `None` for internal nodes and the rightmost leaf.
    #[inline]
    pub(crate) fn next_leaf(&self) -> Option<NodeId> {
        match self {
            Node::Leaf(leaf) => leaf.next,
            Node::Internal(_) => None,
        }
    }
}
