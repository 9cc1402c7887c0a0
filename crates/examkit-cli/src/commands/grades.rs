//! The `examkit grades` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use examkit_core::report::{grade_listing, GradeListing, GradeListingOutcome};
use examkit_core::statistics::format_score;
use examkit_report::json::write_grade_listing_json;
use examkit_report::text::{grade_listing_path, write_grade_listing};

use super::OutputFormat;

pub fn execute(exam: String, format: String, config_path: Option<PathBuf>) -> Result<()> {
    let format = OutputFormat::parse(&format)?;
    let config = super::load_config(config_path)?;
    let roster = super::load_roster(&config)?;
    let store = super::load_results(&config)?;

    let listing = match grade_listing(&roster, &store, &exam) {
        GradeListingOutcome::Ready(listing) => listing,
        GradeListingOutcome::NoParticipants => {
            println!("No one has taken exam {exam} yet.");
            return Ok(());
        }
    };

    let path = grade_listing_path(&config.grades_dir, &listing, format.extension());
    match format {
        OutputFormat::Text => write_grade_listing(&listing, &path)?,
        OutputFormat::Json => write_grade_listing_json(&listing, &path)?,
    }

    print_summary(&listing);
    println!("Grade listing written to {}", path.display());
    Ok(())
}

fn print_summary(listing: &GradeListing) {
    let mut table = Table::new();
    table.set_header(vec!["Rank", "Name", "ID", "Score"]);

    for row in &listing.rows {
        table.add_row(vec![
            Cell::new(row.rank),
            Cell::new(&row.name),
            Cell::new(&row.student_id),
            Cell::new(format_score(row.score)),
        ]);
    }

    eprintln!("\n{table}");
    eprintln!(
        "Highest: {}  Average: {}",
        format_score(listing.max_score),
        format_score(listing.average)
    );
}
