//! Configuration for adaptree.

use crate::common::{Error, Result};

/// Smallest order a tree accepts.
///
/// With order 2 a node splits as soon as it holds two keys, which is the
/// smallest size that still yields two non-empty leaves.
pub const MIN_ORDER: usize = 2;

/// Order used by [`TreeConfig::default`].
pub const DEFAULT_ORDER: usize = 4;

/// Construction-time parameters for a tree.
///
/// # Order
/// A node splits when its key count *reaches* `order`, so after every insert
/// each node holds at most `order - 1` keys. This differs from the textbook
/// definition where `order` bounds the child count.
///
/// # Example
/// ```
/// use adaptree::TreeConfig;
///
/// let config = TreeConfig::new(8);
/// assert!(config.validate().is_ok());
/// assert!(TreeConfig::new(1).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Key count that forces a node to split.
    pub order: usize,
}

impl TreeConfig {
    /// Create a config with the given order.
    pub fn new(order: usize) -> Self {
        Self { order }
    }

    /// Check the config before a tree is built from it.
    ///
    /// # Errors
    /// - `Error::InvalidOrder` if `order < MIN_ORDER`
    pub fn validate(&self) -> Result<()> {
        if self.order < MIN_ORDER {
            return Err(Error::InvalidOrder {
                order: self.order,
                min: MIN_ORDER,
            });
        }
        Ok(())
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER)
    }
}
