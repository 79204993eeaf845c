//! # conftree-core
//!
//! An in-memory, hierarchical configuration store addressed by dotted path
//! names such as `af-packet.0.interface`.
//!
//! The store is populated in a single-threaded start-up phase, typically in
//! two passes:
//!
//! 1. Values given on the command line are written with
//!    [`ConfigStore::set_final`].  They are *final*: later ordinary writes to
//!    the same path are rejected.
//! 2. Values parsed from a configuration file are written with
//!    [`ConfigStore::set`].  A file value never replaces a final value.
//!
//! After population the store is read, possibly from many threads at once,
//! through typed accessors ([`ConfigStore::get_int`], [`ConfigStore::get_bool`],
//! ...) and child-relative accessors that fall back to a second "default"
//! node when an entry is absent.
//!
//! # Architecture overview
//!
//! - **`tree`** – The node store (an arena of [`ConfigNode`]s addressed by
//!   [`NodeId`] handles), dotted-path parsing and resolution, and the pruner.
//!
//! - **`store`** – [`ConfigStore`], the context object every operation goes
//!   through: lifecycle (`init`/`deinit`), the override/final write policy,
//!   typed and child-relative accessors, backup/restore, and the textual dump.
//!
//! This crate performs no file, network, or process I/O.  Loaders live
//! elsewhere and talk to the store through the [`ConfigSink`] trait.
//!
//! # Known limitation
//!
//! Segments are split on every `.`, so a logical key that itself contains a
//! `.` cannot be represented.

pub mod error;
pub mod store;
pub mod tree;

pub use error::ConfigError;
pub use store::config_store::ConfigStore;
pub use store::options::{InitFailurePolicy, StoreOptions};
pub use store::sink::ConfigSink;
pub use store::typed::{is_false, is_true, parse_double, parse_float, parse_int};
pub use tree::node::{ConfigNode, NodeId};
pub use tree::path::{DottedPath, DEFAULT_MAX_PATH_LEN};
