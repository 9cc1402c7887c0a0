//! The `examkit author` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use examkit_core::codec;
use examkit_core::parser::parse_exam_definition;

pub fn execute(file: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let definition = parse_exam_definition(&file)?;
    let mut roster = super::load_roster(&config)?;

    let code = definition.exam.code.clone();
    let count = definition.exam.questions.len();
    roster
        .add_exam(&definition.teacher_id, definition.exam)
        .with_context(|| format!("cannot add exam from {}", file.display()))?;
    codec::save(&roster, &config.data_file)?;

    println!(
        "Added exam {code} ({count} questions) for teacher {}",
        definition.teacher_id
    );
    Ok(())
}
