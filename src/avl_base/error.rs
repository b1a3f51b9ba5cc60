//! Error types for the AVL tree.

use thiserror::Error;

/// Error type for tree construction and invariant checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("a comparator is required to construct a tree")]
    MissingComparator,
    #[error("node at depth {depth} has balance factor {balance}")]
    Unbalanced { depth: usize, balance: i32 },
    #[error("node at depth {depth} caches height {cached}, actual height is {actual}")]
    HeightMismatch {
        depth: usize,
        cached: i32,
        actual: i32,
    },
    #[error("in-order position {position} is smaller than its predecessor")]
    OutOfOrder { position: usize },
    #[error("tree counts {counted} nodes but tracks size {tracked}")]
    SizeMismatch { counted: usize, tracked: usize },
}

/// Result type alias for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;
