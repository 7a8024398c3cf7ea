//! YAML generation and atomic file output.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::diagnostics::Diagnostic;
use crate::error::Result;
use crate::import::ImportReport;
use crate::question::Question;

/// Serializable view of an import report.
#[derive(Serialize)]
struct OutputDocument<'a> {
    questions: &'a [Question],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    diagnostics: &'a [Diagnostic],
}

/// Render an import report as a YAML document.
///
/// # Arguments
///
/// * `report` - The import outcome to serialize.
///
/// # Returns
///
/// The YAML text, starting with a document marker.
pub fn generate_yaml(report: &ImportReport) -> Result<String> {
    let document = OutputDocument {
        questions: &report.questions,
        diagnostics: &report.diagnostics,
    };
    let yaml = serde_yaml_ng::to_string(&document)?;
    Ok(format!("---\n{yaml}"))
}

/// Write an import report to a YAML file.
///
/// The content is written to a temporary sibling first and moved into place
/// afterwards, so a crash mid-write never leaves a truncated file behind.
pub fn save_yaml(report: &ImportReport, path: &Path) -> Result<()> {
    let yaml = generate_yaml(report)?;

    let tmp_path = path.with_extension("yaml.tmp");
    let mut file = File::create(&tmp_path)?;
    file.write_all(yaml.as_bytes())?;
    file.sync_all()?;

    // Windows cannot rename over an existing file.
    #[cfg(windows)]
    if path.exists() {
        fs::remove_file(path)?;
    }
    fs::rename(&tmp_path, path)?;

    Ok(())
}
