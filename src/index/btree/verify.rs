//! Structural validation.
//!
//! Walks the whole tree and checks every invariant insertion must preserve:
//! - every leaf at the same depth
//! - `children == keys + 1` on internal nodes
//! - keys sorted within each node and bounded by the parent's separators
//! - no node at or above `order` keys
//! - the leaf chain visits every leaf once, left to right, and terminates
//! - every arena node is reachable from the root

use crate::common::{Error, NodeId, Result};
use crate::index::btree::node::Node;
use crate::index::btree::tree::BPlusTree;

/// Separator bounds inherited from ancestors. Both ends inclusive, since
/// duplicates of a separator may sit on either side of it.
struct Bounds<'a, K> {
    lower: Option<&'a K>,
    upper: Option<&'a K>,
}

fn violation(msg: String) -> Error {
    Error::InvariantViolation(msg)
}

impl<K: Ord, P> BPlusTree<K, P> {
    /// Check every structural invariant.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` describing the first broken invariant
    pub fn verify(&self) -> Result<()> {
        let mut leaves = Vec::new();
        let mut leaf_depth = None;
        let mut visited = 0usize;
        let mut stack = vec![(
            self.root,
            0usize,
            Bounds {
                lower: None,
                upper: None,
            },
        )];

        while let Some((id, depth, bounds)) = stack.pop() {
            visited += 1;
            if visited > self.nodes.len() {
                return Err(violation("node graph contains a cycle".to_string()));
            }

            let node = &self.nodes[id.0];
            self.check_node(id, node, &bounds)?;

            match node {
                Node::Leaf(_) => {
                    match leaf_depth {
                        None => leaf_depth = Some(depth),
                        Some(expected) if expected != depth => {
                            return Err(violation(format!(
                                "{} at depth {}, expected {}",
                                id, depth, expected
                            )));
                        }
                        Some(_) => {}
                    }
                    leaves.push(id);
                }
                Node::Internal(internal) => {
                    // Push right to left so leaves come off the stack in order.
                    for (i, &child) in internal.children.iter().enumerate().rev() {
                        let lower = if i == 0 {
                            bounds.lower
                        } else {
                            Some(&internal.keys[i - 1])
                        };
                        let upper = internal.keys.get(i).or(bounds.upper);
                        stack.push((child, depth + 1, Bounds { lower, upper }));
                    }
                }
            }
        }

        if visited != self.nodes.len() {
            return Err(violation(format!(
                "{} nodes reachable from root, arena holds {}",
                visited,
                self.nodes.len()
            )));
        }

        self.check_leaf_chain(&leaves)?;

        let leaf_keys: usize = leaves.iter().map(|id| self.nodes[id.0].len()).sum();
        if leaf_keys != self.len {
            return Err(violation(format!(
                "leaves hold {} keys, {} were inserted",
                leaf_keys, self.len
            )));
        }

        Ok(())
    }

    fn check_node(&self, id: NodeId, node: &Node<K>, bounds: &Bounds<'_, K>) -> Result<()> {
        let keys = node.keys();

        if keys.len() >= self.order {
            return Err(violation(format!(
                "{} holds {} keys with order {}",
                id,
                keys.len(),
                self.order
            )));
        }

        if keys.windows(2).any(|w| w[0] > w[1]) {
            return Err(violation(format!("{} keys are not sorted", id)));
        }

        let below = bounds
            .lower
            .is_some_and(|lower| keys.first().is_some_and(|k| k < lower));
        let above = bounds
            .upper
            .is_some_and(|upper| keys.last().is_some_and(|k| k > upper));
        if below || above {
            return Err(violation(format!(
                "{} keys fall outside the parent's separators",
                id
            )));
        }

        if let Node::Internal(internal) = node {
            if internal.children.len() != internal.keys.len() + 1 {
                return Err(violation(format!(
                    "{} has {} children for {} keys",
                    id,
                    internal.children.len(),
                    internal.keys.len()
                )));
            }
        }

        Ok(())
    }

    /// The chain must visit exactly `leaves`, in order, then stop.
    fn check_leaf_chain(&self, leaves: &[NodeId]) -> Result<()> {
        let mut current = Some(self.leftmost_leaf());

        for (position, &expected) in leaves.iter().enumerate() {
            match current {
                Some(id) if id == expected => current = self.nodes[id.0].next_leaf(),
                Some(id) => {
                    return Err(violation(format!(
                        "leaf chain reaches {} at position {}, expected {}",
                        id, position, expected
                    )));
                }
                None => {
                    return Err(violation(format!(
                        "leaf chain ends after {} of {} leaves",
                        position,
                        leaves.len()
                    )));
                }
            }
        }

        match current {
            None => Ok(()),
            Some(id) => Err(violation(format!(
                "rightmost leaf links to {} instead of ending the chain",
                id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::index::btree::node::{InternalNode, LeafNode, Node};
    use crate::{BPlusTree, Error, NodeId};

    fn built_tree() -> BPlusTree<u32> {
        let mut tree = BPlusTree::new(3).unwrap();
        tree.extend([10, 20, 5, 6, 12, 30]);
        tree
    }

    fn assert_violation(tree: &BPlusTree<u32>) {
        match tree.verify() {
            Err(Error::InvariantViolation(_)) => {}
            other => panic!("expected invariant violation, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_accepts_valid_trees() {
        assert!(built_tree().verify().is_ok());

        let empty: BPlusTree<u32> = BPlusTree::new(3).unwrap();
        assert!(empty.verify().is_ok());
    }

    #[test]
    fn test_verify_detects_unsorted_leaf() {
        let mut tree = built_tree();
        let leaf = tree.leftmost_leaf();
        if let Node::Leaf(node) = &mut tree.nodes[leaf.0] {
            node.keys.reverse();
        }
        assert_violation(&tree);
    }

    #[test]
    fn test_verify_detects_broken_chain() {
        let mut tree = built_tree();
        let leaf = tree.leftmost_leaf();
        if let Node::Leaf(node) = &mut tree.nodes[leaf.0] {
            node.next = None;
        }
        assert_violation(&tree);
    }

    #[test]
    fn test_verify_detects_chain_cycle() {
        let mut tree = built_tree();
        let leaf = tree.leftmost_leaf();
        if let Node::Leaf(node) = &mut tree.nodes[leaf.0] {
            node.next = Some(leaf);
        }
        assert_violation(&tree);
    }

    #[test]
    fn test_verify_detects_child_count_mismatch() {
        let mut tree = built_tree();
        let root = tree.root;
        if let Node::Internal(node) = &mut tree.nodes[root.0] {
            node.keys.pop();
        }
        assert_violation(&tree);
    }

    #[test]
    fn test_verify_detects_unbalanced_leaves() {
        let mut tree = built_tree();
        let root = tree.root;
        let last = tree.nodes[root.0].children()[2];

        // Push the rightmost leaf one level deeper than its siblings.
        tree.nodes.push(Node::Internal(InternalNode {
            keys: vec![],
            children: vec![last],
        }));
        let extra = NodeId::new(tree.nodes.len() - 1);
        if let Node::Internal(node) = &mut tree.nodes[root.0] {
            node.children[2] = extra;
        }

        match tree.verify() {
            Err(Error::InvariantViolation(msg)) => assert!(msg.contains("depth")),
            other => panic!("expected depth violation, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_detects_orphan_node() {
        let mut tree = built_tree();
        tree.nodes.push(Node::Leaf(LeafNode {
            keys: vec![],
            next: None,
        }));
        assert_violation(&tree);
    }
}
