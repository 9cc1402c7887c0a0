//! The `examkit register` command.

use std::path::PathBuf;

use anyhow::Result;

use examkit_core::codec;
use examkit_core::directory::Registration;

pub fn execute(student: String, exam: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let mut roster = super::load_roster(&config)?;

    match roster.register(&student, &exam)? {
        Registration::Registered => {
            codec::save(&roster, &config.data_file)?;
            println!("Registered {student} for exam {exam}");
        }
        Registration::AlreadyRegistered => {
            println!("{student} is already registered for exam {exam}");
        }
    }
    Ok(())
}
