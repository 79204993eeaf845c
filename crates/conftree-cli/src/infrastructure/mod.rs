//! Input sources for the configuration store.
//!
//! - **`toml_source`** – Flattens a TOML document into dotted paths.
//! - **`overrides`**   – Parses `PATH=VALUE` command-line overrides.

pub mod overrides;
pub mod toml_source;
