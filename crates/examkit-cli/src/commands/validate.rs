//! The `examkit validate` command.

use std::path::PathBuf;

use anyhow::Result;

use examkit_core::codec;
use examkit_core::directory::validate;
use examkit_core::results::ResultStore;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = super::load_config(config_path)?;

    let decoded = codec::load(&config.data_file)?;
    let roster = &decoded.roster;
    println!(
        "Data file: {} ({} teachers, {} students, {} exams)",
        config.data_file.display(),
        roster.teachers.len(),
        roster.students.len(),
        roster.exams().count()
    );

    let mut total_warnings = 0;

    for w in &decoded.warnings {
        println!("  [line {}] WARNING: {}", w.line, w.message);
    }
    total_warnings += decoded.warnings.len();

    let warnings = validate(roster);
    for w in &warnings {
        let prefix = w
            .exam_code
            .as_ref()
            .map(|code| format!("  [{code}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
    total_warnings += warnings.len();

    let (store, skipped) = ResultStore::load(&config.results_log)?;
    println!(
        "Result log: {} ({} entries)",
        config.results_log.display(),
        store.len()
    );
    for s in &skipped {
        println!("  [line {}] WARNING: malformed result line {:?}", s.line, s.content);
    }
    total_warnings += skipped.len();

    if total_warnings == 0 {
        println!("All data valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
