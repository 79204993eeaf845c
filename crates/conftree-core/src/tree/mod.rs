//! The configuration tree itself: node storage, path resolution, pruning.
//!
//! Nothing in this module knows about the override/final write policy or
//! typed values; those live in [`crate::store`].

/// Node arena and handles.
pub mod node;
/// Dotted-path parsing and the resolve / resolve-or-create walks.
pub mod path;
/// Subtree pruning.
pub mod prune;

pub use node::{ConfigNode, NodeId, NodeStore};
pub use path::{DottedPath, DEFAULT_MAX_PATH_LEN};
pub use prune::PruneSummary;
