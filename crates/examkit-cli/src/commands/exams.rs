//! The `examkit exams` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use examkit_core::statistics::{format_score, total_possible};

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let roster = super::load_roster(&config)?;
    let store = super::load_results(&config)?;

    if roster.exams().next().is_none() {
        println!("No exams defined.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Code",
        "Teacher",
        "Questions",
        "Total marks",
        "Participants",
    ]);

    for teacher in &roster.teachers {
        for exam in &teacher.exams {
            table.add_row(vec![
                Cell::new(&exam.code),
                Cell::new(format!("{} ({})", teacher.name, teacher.id)),
                Cell::new(exam.questions.len()),
                Cell::new(format_score(total_possible(exam))),
                Cell::new(store.all_for_exam(&exam.code).len()),
            ]);
        }
    }

    println!("{table}");
    Ok(())
}
