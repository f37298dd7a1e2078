//! Occupancy and utilization statistics.

use std::fmt;

use crate::index::btree::tree::BPlusTree;

/// Key usage of a single node.
///
/// # Example
/// ```
/// use adaptree::Occupancy;
///
/// let occ = Occupancy::new(3, 4);
/// assert_eq!(occ.utilization(), 0.75);
/// assert_eq!(occ.fragmentation(), 0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    /// Keys currently held.
    pub used: usize,

    /// Tree order, the node's nominal capacity.
    pub order: usize,
}

impl Occupancy {
    pub fn new(used: usize, order: usize) -> Self {
        Self { used, order }
    }

    /// Fraction of capacity in use (0.0 to 1.0).
    pub fn utilization(&self) -> f64 {
        if self.order == 0 {
            0.0
        } else {
            self.used as f64 / self.order as f64
        }
    }

    /// Fraction of capacity left unused (0.0 to 1.0).
    pub fn fragmentation(&self) -> f64 {
        if self.order == 0 {
            0.0
        } else {
            1.0 - self.utilization()
        }
    }
}

/// A point-in-time summary of the whole tree's shape.
///
/// Totals are counted over every node reachable from the root. Capacity is
/// `order` per node, matching how [`Occupancy`] measures a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub height: usize,
    pub internal_nodes: usize,
    pub leaf_nodes: usize,
    /// Separator keys held by internal nodes.
    pub internal_keys: usize,
    /// Data keys held by leaves.
    pub leaf_keys: usize,
    /// Sum of `order` over all nodes.
    pub capacity: usize,
}

impl TreeStats {
    /// Keys across all nodes, separators included.
    pub fn total_keys(&self) -> usize {
        self.internal_keys + self.leaf_keys
    }

    pub fn node_count(&self) -> usize {
        self.internal_nodes + self.leaf_nodes
    }

    /// Fraction of total capacity in use (0.0 to 1.0).
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.total_keys() as f64 / self.capacity as f64
        }
    }

    /// Fraction of total capacity left unused (0.0 to 1.0).
    pub fn fragmentation(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            1.0 - self.utilization()
        }
    }

    /// Mean leaf utilization, ignoring internal nodes.
    pub fn leaf_utilization(&self) -> f64 {
        let leaf_capacity = self.leaf_nodes * self.capacity_per_node();
        if leaf_capacity == 0 {
            0.0
        } else {
            self.leaf_keys as f64 / leaf_capacity as f64
        }
    }

    fn capacity_per_node(&self) -> usize {
        match self.node_count() {
            0 => 0,
            n => self.capacity / n,
        }
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TreeStats {{ height: {}, nodes: {} ({} internal, {} leaf), keys: {} ({} internal, {} leaf), utilization: {:.2}% }}",
            self.height,
            self.node_count(),
            self.internal_nodes,
            self.leaf_nodes,
            self.total_keys(),
            self.internal_keys,
            self.leaf_keys,
            self.utilization() * 100.0
        )
    }
}

impl<K, P> BPlusTree<K, P> {
    /// Summarize node counts, key counts and utilization.
    pub fn stats(&self) -> TreeStats {
        let levels = self.level_order();
        let mut stats = TreeStats {
            height: levels.len(),
            internal_nodes: 0,
            leaf_nodes: 0,
            internal_keys: 0,
            leaf_keys: 0,
            capacity: 0,
        };

        for view in levels.into_iter().flatten() {
            if view.is_leaf() {
                stats.leaf_nodes += 1;
                stats.leaf_keys += view.keys.len();
            } else {
                stats.internal_nodes += 1;
                stats.internal_keys += view.keys.len();
            }
            stats.capacity += self.order;
        }
        stats
    }
}
