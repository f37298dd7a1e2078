//! Read-only traversal for reporting and diagnostics.
//!
//! Dump and report tools read the tree through these views after each
//! mutation. Nothing here mutates the tree.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::common::NodeId;
use crate::index::btree::node::{Node, NodeKind};
use crate::index::btree::stats::Occupancy;
use crate::index::btree::tree::BPlusTree;

/// Snapshot of one node as seen by a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeView<'a, K> {
    /// Arena handle of the node.
    pub id: NodeId,
    pub kind: NodeKind,
    pub keys: &'a [K],
    order: usize,
}

impl<'a, K> NodeView<'a, K> {
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }

    /// `(used, order)` for this node.
    #[inline]
    pub fn occupancy(&self) -> Occupancy {
        Occupancy::new(self.keys.len(), self.order)
    }
}

/// Iterator over leaf key slices, leftmost to rightmost.
///
/// Follows successor links only; internal nodes are not visited after the
/// initial descent to the leftmost leaf.
pub struct LeafChain<'a, K> {
    nodes: &'a [Node<K>],
    current: Option<NodeId>,
    /// Leaves left before the walk is known to be cyclic.
    remaining: usize,
}

impl<'a, K> Iterator for LeafChain<'a, K> {
    type Item = &'a [K];

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        // A cycle in the chain would be a split bug; stop instead of spinning.
        assert!(self.remaining > 0, "leaf chain does not terminate");
        self.remaining -= 1;

        let node = &self.nodes[id.0];
        self.current = node.next_leaf();
        Some(node.keys())
    }
}

impl<K> FusedIterator for LeafChain<'_, K> {}

impl<K, P> BPlusTree<K, P> {
    /// View of a single node.
    pub(super) fn view(&self, id: NodeId) -> NodeView<'_, K> {
        let node = &self.nodes[id.0];
        NodeView {
            id,
            kind: node.kind(),
            keys: node.keys(),
            order: self.order,
        }
    }

    /// Leftmost leaf, reached by following first children from the root.
    pub(super) fn leftmost_leaf(&self) -> NodeId {
        let mut current = self.root;
        while let Some(&first) = self.nodes[current.0].children().first() {
            current = first;
        }
        current
    }

    /// Breadth-first levels, root first.
    ///
    /// Each level lists its nodes left to right. Calling this twice without
    /// an insert in between yields identical output.
    ///
    /// # Example
    /// ```
    /// use adaptree::{BPlusTree, NodeKind};
    ///
    /// let mut tree = BPlusTree::new(3).unwrap();
    /// tree.extend([10, 20, 5]);
    ///
    /// let levels = tree.level_order();
    /// assert_eq!(levels.len(), 2);
    /// assert_eq!(levels[0][0].kind, NodeKind::Internal);
    /// assert_eq!(levels[0][0].keys, &[20]);
    /// assert_eq!(levels[1][0].keys, &[5, 10]);
    /// assert_eq!(levels[1][1].keys, &[20]);
    /// ```
    pub fn level_order(&self) -> Vec<Vec<NodeView<'_, K>>> {
        let mut levels = Vec::new();
        let mut queue = VecDeque::from([self.root]);

        while !queue.is_empty() {
            let mut level = Vec::with_capacity(queue.len());
            for _ in 0..queue.len() {
                let Some(id) = queue.pop_front() else { break };
                queue.extend(self.nodes[id.0].children().iter().copied());
                level.push(self.view(id));
            }
            levels.push(level);
        }
        levels
    }

    /// Leaves in key order via the successor links.
    pub fn leaf_chain(&self) -> LeafChain<'_, K> {
        LeafChain {
            nodes: &self.nodes,
            current: Some(self.leftmost_leaf()),
            remaining: self.nodes.len(),
        }
    }

    /// Every key in ascending order, duplicates included.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.leaf_chain().flatten()
    }

    /// Depth of every leaf, left to right. The root sits at depth 0.
    ///
    /// In a balanced tree all entries are equal to `height() - 1`.
    pub fn leaf_depths(&self) -> Vec<usize> {
        let mut depths = Vec::new();
        let mut stack = vec![(self.root, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id.0];
            if node.is_leaf() {
                depths.push(depth);
            } else {
                // Reverse so the leftmost child is popped first.
                stack.extend(node.children().iter().rev().map(|&c| (c, depth + 1)));
            }
        }
        depths
    }

    /// Occupancy of every node, in level order.
    pub fn occupancies(&self) -> Vec<Occupancy> {
        self.level_order()
            .into_iter()
            .flatten()
            .map(|view| view.occupancy())
            .collect()
    }
}
