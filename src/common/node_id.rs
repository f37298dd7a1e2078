//! Node handle type.

use std::fmt;

/// Identifies a node in the tree's arena.
///
/// Using `usize` because nodes are stored in a `Vec<Node<K>>`, so a handle
/// indexes directly: `nodes[node_id.0]`.
///
/// A `NodeId` carries no ownership. The tree owns every node; a handle held in
/// a parent's child list is an ownership edge only in the sense that it keeps
/// the node reachable from the root. The leaf successor link is a handle too,
/// and is purely a cross reference.
///
/// # Example
/// ```
/// use adaptree::NodeId;
///
/// let id = NodeId::new(3);
/// assert_eq!(id.0, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Create a new NodeId.
    #[inline]
    pub fn new(id: usize) -> Self {
        NodeId(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}
