//! Plain-text report generator.
//!
//! These are the files handed to students and teachers, so the layout is
//! fixed: a header, the figures, then the session transcript if one exists.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use examkit_core::report::{GradeListing, StudentReport};
use examkit_core::statistics::format_score;

const RULE: &str = "---------------------------";

/// Render a student's report card.
pub fn render_student_report(report: &StudentReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Report card for student {} (ID: {})\n",
        report.student_name, report.student_id
    ));
    out.push_str(&format!("Exam code: {}\n\n", report.exam_code));
    out.push_str(&format!(
        "Your score: {} out of {}\n",
        format_score(report.score),
        format_score(report.total_possible)
    ));
    out.push_str(&format!("Average score: {}\n", format_score(report.average)));
    out.push_str(&format!("Highest score: {}\n", format_score(report.max_score)));
    out.push_str(&format!(
        "Your rank: {} out of {}\n",
        report.rank, report.participants
    ));

    if let Some(transcript) = &report.transcript {
        out.push_str("\nQuestion details:\n");
        for line in transcript {
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}

/// Render the ranked grade listing for an exam.
pub fn render_grade_listing(listing: &GradeListing) -> String {
    let mut out = String::new();

    out.push_str(&format!("Grade listing for exam: {}\n", listing.exam_code));
    out.push_str(RULE);
    out.push('\n');
    for row in &listing.rows {
        out.push_str(&format!(
            "Name: {} | ID: {} | Score: {}\n",
            row.name,
            row.student_id,
            format_score(row.score)
        ));
    }
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("Highest score: {}\n", format_score(listing.max_score)));
    out.push_str(&format!("Average score: {}\n", format_score(listing.average)));

    out
}

/// File name of a report card inside the reports directory.
pub fn student_report_path(dir: &Path, report: &StudentReport, extension: &str) -> PathBuf {
    dir.join(format!(
        "report_{}_{}.{extension}",
        report.student_id, report.exam_code
    ))
}

/// File name of a grade listing inside the grades directory.
pub fn grade_listing_path(dir: &Path, listing: &GradeListing, extension: &str) -> PathBuf {
    dir.join(format!("grades_{}.{extension}", listing.exam_code))
}

/// Write a report card to a file.
pub fn write_student_report(report: &StudentReport, path: &Path) -> Result<()> {
    write_text(path, &render_student_report(report))
}

/// Write a grade listing to a file.
pub fn write_grade_listing(listing: &GradeListing, path: &Path) -> Result<()> {
    write_text(path, &render_grade_listing(listing))
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
