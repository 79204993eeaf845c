//! Use case: populate a configuration store from overrides and a document.
//!
//! Overrides (from `--set`) are written first with
//! [`ConfigSink::set_final`]; document entries follow with
//! [`ConfigSink::set`].  A document entry rejected because an override already
//! owns the path is expected and recorded as *shadowed*; any other error stops
//! population.

use conftree_core::{ConfigError, ConfigSink};
use tracing::{debug, info};

/// Outcome of a populate run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulateReport {
    /// Overrides written as final values.
    pub final_values: usize,
    /// Document entries written.
    pub values: usize,
    /// Document paths left unchanged because a final value owns them.
    pub shadowed: Vec<String>,
}

/// Writes `overrides` as final values, then `entries` as ordinary values.
///
/// # Errors
///
/// Returns the first error other than [`ConfigError::Immutable`].
pub fn populate<S>(
    sink: &mut S,
    overrides: &[(String, String)],
    entries: &[(String, String)],
) -> Result<PopulateReport, ConfigError>
where
    S: ConfigSink + ?Sized,
{
    let mut report = PopulateReport::default();

    for (path, value) in overrides {
        sink.set_final(path, value)?;
        report.final_values += 1;
    }

    for (path, value) in entries {
        match sink.set(path, value) {
            Ok(()) => report.values += 1,
            Err(ConfigError::Immutable { path }) => {
                debug!("'{path}' is set on the command line; ignoring document value");
                report.shadowed.push(path);
            }
            Err(err) => return Err(err),
        }
    }

    info!(
        final_values = report.final_values,
        values = report.values,
        shadowed = report.shadowed.len(),
        "configuration populated"
    );
    Ok(report)
}
