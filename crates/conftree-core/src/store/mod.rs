//! The configuration store and everything built on the tree.

/// Child-relative accessors with default-node fallback.
pub mod child;
/// [`ConfigStore`]: lifecycle, write policy, backup/restore, plain reads.
pub mod config_store;
/// `path = value` rendering.
pub mod dump;
pub mod options;
/// Loader-facing write contract.
pub mod sink;
/// Value parsers and typed accessors.
pub mod typed;

pub use config_store::{ConfigStore, INCLUDE_PATH_KEY};
pub use options::{InitFailurePolicy, StoreOptions};
pub use sink::ConfigSink;
