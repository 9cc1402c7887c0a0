//! JSON report output.
//!
//! Reports are wrapped in an envelope that records when they were generated.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use examkit_core::report::{GradeListing, StudentReport};

/// A report plus generation metadata.
#[derive(Debug, Serialize)]
pub struct Envelope<'a, T> {
    pub generated_at: DateTime<Utc>,
    pub kind: &'static str,
    pub report: &'a T,
}

/// Serialize a report card to pretty JSON.
pub fn student_report_json(report: &StudentReport) -> Result<String> {
    to_json("student_report", report)
}

/// Serialize a grade listing to pretty JSON.
pub fn grade_listing_json(listing: &GradeListing) -> Result<String> {
    to_json("grade_listing", listing)
}

/// Write a report card as JSON.
pub fn write_student_report_json(report: &StudentReport, path: &Path) -> Result<()> {
    write_json(path, &student_report_json(report)?)
}

/// Write a grade listing as JSON.
pub fn write_grade_listing_json(listing: &GradeListing, path: &Path) -> Result<()> {
    write_json(path, &grade_listing_json(listing)?)
}

fn to_json<T: Serialize>(kind: &'static str, report: &T) -> Result<String> {
    let envelope = Envelope {
        generated_at: Utc::now(),
        kind,
        report,
    };
    serde_json::to_string_pretty(&envelope).context("failed to serialize report")
}

fn write_json(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}
