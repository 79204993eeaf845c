//! Application layer use cases.
//!
//! - **`populate`** – Applies command-line overrides as final values, then
//!   the flattened document as ordinary values, through the
//!   [`conftree_core::ConfigSink`] contract only.

pub mod populate;
