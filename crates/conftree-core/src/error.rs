//! Error type shared by every configuration store operation.

use thiserror::Error;

/// Errors reported by [`crate::ConfigStore`] operations.
///
/// Apart from an allocation failure during [`crate::ConfigStore::init`] under
/// [`crate::InitFailurePolicy::Abort`], every error is recoverable and is
/// returned to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The path, or one of its segments, does not exist.
    #[error("failed to lookup configuration parameter '{path}'")]
    NotFound { path: String },

    /// An ordinary write targeted a node that was set as final.
    #[error("configuration parameter '{path}' is final and cannot be overridden")]
    Immutable { path: String },

    /// A typed accessor could not convert the whole value, or it overflowed.
    #[error("could not parse {value:?} as {expected}")]
    ParseFailure {
        value: String,
        expected: &'static str,
    },

    /// The dotted path is longer than the store accepts.
    #[error("configuration name too long: {len} bytes, limit is {max}")]
    PathTooLong { len: usize, max: usize },

    /// Memory for a node, name, or value could not be reserved.
    #[error("failed to allocate memory for configuration")]
    AllocationFailure,

    /// The store has no root node; call `init` first.
    #[error("configuration store is not initialized")]
    NotInitialized,

    /// `init` was called on a store that already has a root node.
    #[error("configuration store is already initialized")]
    AlreadyInitialized,

    /// A [`crate::NodeId`] refers to a node that has since been removed.
    #[error("node handle no longer refers to a live configuration node")]
    StaleNode,

    /// The root node can only be released through `deinit`.
    #[error("the root configuration node cannot be removed")]
    RootNode,
}

impl ConfigError {
    /// Returns `true` for [`ConfigError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::NotFound { .. })
    }
}
