//! One module per subcommand, plus the loading steps they share.

pub mod author;
pub mod exams;
pub mod grades;
pub mod init;
pub mod register;
pub mod report;
pub mod take;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use examkit_core::codec;
use examkit_core::config::{load_config_from, ExamkitConfig};
use examkit_core::directory::Roster;
use examkit_core::results::ResultStore;

/// Output formats accepted by `report` and `grades`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(format: &str) -> Result<Self> {
        match format {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("unknown format: {other} (expected text or json)"),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

pub fn load_config(config_path: Option<PathBuf>) -> Result<ExamkitConfig> {
    load_config_from(config_path.as_deref())
}

/// Load the roster, logging anything the decoder had to skip.
pub fn load_roster(config: &ExamkitConfig) -> Result<Roster> {
    let decoded = codec::load(&config.data_file)?;
    for w in &decoded.warnings {
        tracing::warn!(line = w.line, "{}", w.message);
    }
    Ok(decoded.roster)
}

/// Load the result log. Malformed lines are logged by the store and dropped.
pub fn load_results(config: &ExamkitConfig) -> Result<ResultStore> {
    let (store, _skipped) = ResultStore::load(&config.results_log)?;
    Ok(store)
}
