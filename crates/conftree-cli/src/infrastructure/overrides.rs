//! `PATH=VALUE` override parsing for `--set` arguments.

use thiserror::Error;

/// Errors for a malformed override argument.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OverrideError {
    /// The argument has no `=`.
    #[error("invalid override '{0}': expected PATH=VALUE")]
    MissingEquals(String),

    /// The part before `=` is empty.
    #[error("invalid override '{0}': path is empty")]
    EmptyPath(String),
}

/// Splits `arg` at its first `=` into `(path, value)`.
///
/// The value may be empty and may itself contain `=`.
///
/// # Errors
///
/// Returns [`OverrideError`] if there is no `=` or the path is empty.
pub fn parse_override(arg: &str) -> Result<(String, String), OverrideError> {
    let (path, value) = arg
        .split_once('=')
        .ok_or_else(|| OverrideError::MissingEquals(arg.to_string()))?;
    if path.is_empty() {
        return Err(OverrideError::EmptyPath(arg.to_string()));
    }
    Ok((path.to_string(), value.to_string()))
}

/// Parses every argument, stopping at the first malformed one.
///
/// # Errors
///
/// Returns the first [`OverrideError`].
pub fn parse_overrides<I, S>(args: I) -> Result<Vec<(String, String)>, OverrideError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter().map(|arg| parse_override(arg.as_ref())).collect()
}
