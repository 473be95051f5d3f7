//! Result presentation and persistence.

use crate::pipeline::QueryReport;
use crate::types::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name reports are saved under.
pub const REPORT_FILE: &str = "dataset_names.json";

/// Names shown before the listing is truncated.
pub const PREVIEW_LIMIT: usize = 10;

/// Write a human-readable summary of a report.
///
/// Shows the count, then at most `PREVIEW_LIMIT` names and a
/// `... and N more.` line for the rest.
pub fn write_summary<W: Write>(out: &mut W, report: &QueryReport) -> Result<()> {
    if report.datasets.is_empty() {
        writeln!(out, "No datasets matched the query.")?;
        return Ok(());
    }

    writeln!(out, "Found {} datasets:", report.count())?;
    for name in report.datasets.iter().take(PREVIEW_LIMIT) {
        writeln!(out, "  {}", name)?;
    }
    if report.count() > PREVIEW_LIMIT {
        writeln!(out, "  ... and {} more.", report.count() - PREVIEW_LIMIT)?;
    }
    Ok(())
}

/// Write extracted parameters and the compiled query.
pub fn write_plan<W: Write>(out: &mut W, parameters: &serde_json::Value, sparql: &str) -> Result<()> {
    writeln!(out, "Parameters:")?;
    writeln!(out, "{}", serde_json::to_string_pretty(parameters)?)?;
    writeln!(out)?;
    writeln!(out, "SPARQL:")?;
    writeln!(out, "{}", sparql)?;
    Ok(())
}

/// Save a report as pretty JSON in `dir`, creating it if needed.
///
/// # Returns
///
/// Path of the written file
///
/// # Errors
///
/// Returns `IoError` if the directory or file cannot be written
pub fn save_report(dir: &Path, report: &QueryReport) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(REPORT_FILE);
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&path, json)?;
    tracing::info!(path = %path.display(), datasets = report.count(), "Saved report");
    Ok(path)
}
