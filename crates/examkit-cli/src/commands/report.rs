//! The `examkit report` command.

use std::path::PathBuf;

use anyhow::Result;

use examkit_core::error::ExamError;
use examkit_core::report::{student_report, StudentReportOutcome};
use examkit_core::transcript::Transcript;
use examkit_report::json::write_student_report_json;
use examkit_report::text::{student_report_path, write_student_report};

use super::OutputFormat;

pub fn execute(
    student: String,
    exam: String,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let format = OutputFormat::parse(&format)?;
    let config = super::load_config(config_path)?;
    let roster = super::load_roster(&config)?;
    let store = super::load_results(&config)?;
    let transcript = Transcript::load(&config.sheets_dir, &student, &exam)?;

    let report = match student_report(&roster, &roster, &store, &exam, &student, transcript) {
        StudentReportOutcome::Ready(report) => report,
        StudentReportOutcome::ExamNotFound => return Err(ExamError::ExamNotFound(exam).into()),
        StudentReportOutcome::NoParticipants => {
            println!("No one has taken exam {exam} yet.");
            return Ok(());
        }
        StudentReportOutcome::NotParticipated => {
            println!("Student {student} has not taken exam {exam}.");
            return Ok(());
        }
    };

    let path = student_report_path(&config.reports_dir, &report, format.extension());
    match format {
        OutputFormat::Text => write_student_report(&report, &path)?,
        OutputFormat::Json => write_student_report_json(&report, &path)?,
    }
    tracing::info!(path = %path.display(), "report written");

    println!(
        "Rank {} of {} on exam {exam}. Report written to {}",
        report.rank,
        report.participants,
        path.display()
    );
    Ok(())
}
