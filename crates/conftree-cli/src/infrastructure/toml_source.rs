//! Flattens a TOML document into dotted `path = value` pairs.
//!
//! ```toml
//! runmode = "workers"
//!
//! [[af-packet]]
//! interface = "eth0"
//! threads = 4
//! ```
//!
//! becomes, in document order:
//!
//! ```text
//! runmode            = workers
//! af-packet.0        = interface
//! af-packet.0.interface = eth0
//! af-packet.0.threads   = 4
//! ```
//!
//! Tables become path segments and array elements become their index.  A
//! table inside an array also gets its first key as its own value, which is
//! what [`conftree_core::ConfigStore::lookup_key_value`] matches on.  Empty
//! tables and arrays produce no entries.

use thiserror::Error;
use toml::{Table, Value};

/// Errors produced while reading a TOML document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document is not valid TOML.
    #[error("failed to parse configuration TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A quoted key contains `.`, which cannot be expressed as a path segment.
    #[error("key '{key}' under '{parent}' contains '.', which cannot be stored")]
    DottedKey { parent: String, key: String },
}

/// Parses `text` and returns its entries in document order.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] for malformed TOML and
/// [`LoadError::DottedKey`] for a key that contains a `.`.
pub fn flatten_document(text: &str) -> Result<Vec<(String, String)>, LoadError> {
    let table: Table = text.parse()?;
    let mut entries = Vec::new();
    flatten_table("", &table, &mut entries)?;
    Ok(entries)
}

fn flatten_table(
    prefix: &str,
    table: &Table,
    entries: &mut Vec<(String, String)>,
) -> Result<(), LoadError> {
    for (key, value) in table {
        if key.contains('.') {
            return Err(LoadError::DottedKey {
                parent: prefix.to_string(),
                key: key.clone(),
            });
        }
        flatten_value(&join(prefix, key), value, entries)?;
    }
    Ok(())
}

fn flatten_value(
    path: &str,
    value: &Value,
    entries: &mut Vec<(String, String)>,
) -> Result<(), LoadError> {
    match value {
        Value::Table(table) => flatten_table(path, table, entries)?,
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let item_path = join(path, &index.to_string());
                if let Value::Table(table) = item {
                    if let Some(first_key) = table.keys().next() {
                        entries.push((item_path.clone(), first_key.clone()));
                    }
                }
                flatten_value(&item_path, item, entries)?;
            }
        }
        Value::String(text) => entries.push((path.to_string(), text.clone())),
        Value::Integer(number) => entries.push((path.to_string(), number.to_string())),
        Value::Float(number) => entries.push((path.to_string(), number.to_string())),
        Value::Boolean(flag) => entries.push((path.to_string(), flag.to_string())),
        Value::Datetime(datetime) => entries.push((path.to_string(), datetime.to_string())),
    }
    Ok(())
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(String, String)]) -> Vec<(&str, &str)> {
        entries
            .iter()
            .map(|(path, value)| (path.as_str(), value.as_str()))
            .collect()
    }

    #[test]
    fn test_scalars_render_as_strings_in_document_order() {
        let entries = flatten_document(
            r#"
            zeta = "last-alphabetically"
            port = 8080
            ratio = 0.5
            enabled = true
            "#,
        )
        .unwrap();

        assert_eq!(
            pairs(&entries),
            vec![
                ("zeta", "last-alphabetically"),
                ("port", "8080"),
                ("ratio", "0.5"),
                ("enabled", "true"),
            ]
        );
    }

    #[test]
    fn test_nested_tables_become_segments() {
        let entries = flatten_document(
            r#"
            [vars.address-groups]
            HOME_NET = "[10.0.0.0/8]"
            "#,
        )
        .unwrap();

        assert_eq!(
            pairs(&entries),
            vec![("vars.address-groups.HOME_NET", "[10.0.0.0/8]")]
        );
    }

    #[test]
    fn test_array_of_tables_gets_indices_and_first_key_value() {
        let entries = flatten_document(
            r#"
            [[af-packet]]
            interface = "eth0"
            threads = 4

            [[af-packet]]
            interface = "default"
            "#,
        )
        .unwrap();

        assert_eq!(
            pairs(&entries),
            vec![
                ("af-packet.0", "interface"),
                ("af-packet.0.interface", "eth0"),
                ("af-packet.0.threads", "4"),
                ("af-packet.1", "interface"),
                ("af-packet.1.interface", "default"),
            ]
        );
    }

    #[test]
    fn test_scalar_array_elements_are_indexed() {
        let entries = flatten_document(r#"rule-files = ["a.rules", "b.rules"]"#).unwrap();
        assert_eq!(
            pairs(&entries),
            vec![("rule-files.0", "a.rules"), ("rule-files.1", "b.rules")]
        );
    }

    #[test]
    fn test_empty_containers_produce_nothing() {
        let entries = flatten_document("list = []\n[empty]\n").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_quoted_key_with_dot_is_rejected() {
        let err = flatten_document(r#"outer = { "a.b" = 1 }"#).unwrap_err();
        assert!(matches!(
            err,
            LoadError::DottedKey { ref parent, ref key } if parent == "outer" && key == "a.b"
        ));
    }

    #[test]
    fn test_malformed_document_is_a_parse_error() {
        assert!(matches!(
            flatten_document("key = "),
            Err(LoadError::Parse(_))
        ));
    }
}
