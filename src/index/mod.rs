//! Index structures.
//!
//! - [`btree`] - In-memory B+ tree with adaptive split placement

pub mod btree;
