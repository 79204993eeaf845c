//! conftree-cli library entry point.
//!
//! Holds the pieces that sit outside the configuration store: reading a
//! TOML document into dotted `path = value` pairs, parsing `--set` overrides,
//! and the populate use case that feeds both into a [`conftree_core::ConfigSink`].
//! The binary in `main.rs` and the integration tests in `tests/` share this
//! module tree.

pub mod application;
pub mod infrastructure;
