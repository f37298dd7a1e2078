//! Error types for adaptree.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors surfaced by the tree.
///
/// Insertion itself never fails. Errors come from construction with a bad
/// configuration, or from [`verify`](crate::BPlusTree::verify) finding a
/// broken structural invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested order is below the supported minimum.
    ///
    /// A node needs room for at least two keys before it can split into two
    /// non-empty halves.
    #[error("invalid tree order {order}: must be at least {min}")]
    InvalidOrder { order: usize, min: usize },

    /// A structural invariant does not hold.
    ///
    /// This indicates a bug in split or promotion logic.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidOrder { order: 1, min: 2 };
        assert_eq!(format!("{}", err), "invalid tree order 1: must be at least 2");

        let err = Error::InvariantViolation("leaf depth mismatch".to_string());
        assert_eq!(format!("{}", err), "invariant violation: leaf depth mismatch");
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail() -> Result<u32> {
            Ok(42)
        }

        assert_eq!(might_fail().unwrap(), 42);
    }
}
