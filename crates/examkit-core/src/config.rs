//! examkit configuration: where the data file, result log and generated
//! artifacts live.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level examkit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamkitConfig {
    /// Persisted teachers, exams and students.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Append-only result log.
    #[serde(default = "default_results_log")]
    pub results_log: PathBuf,
    /// Per-session answer transcripts.
    #[serde(default = "default_sheets_dir")]
    pub sheets_dir: PathBuf,
    /// Per-student report cards.
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
    /// Exam-wide grade listings.
    #[serde(default = "default_grades_dir")]
    pub grades_dir: PathBuf,
    /// Descriptive answers awaiting manual grading.
    #[serde(default = "default_descriptive_dir")]
    pub descriptive_dir: PathBuf,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data.txt")
}
fn default_results_log() -> PathBuf {
    PathBuf::from("grades_db.csv")
}
fn default_sheets_dir() -> PathBuf {
    PathBuf::from("sheets")
}
fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}
fn default_grades_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_descriptive_dir() -> PathBuf {
    PathBuf::from("desc_answ")
}

impl Default for ExamkitConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            results_log: default_results_log(),
            sheets_dir: default_sheets_dir(),
            reports_dir: default_reports_dir(),
            grades_dir: default_grades_dir(),
            descriptive_dir: default_descriptive_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `examkit.toml` in the current directory
/// 2. `~/.config/examkit/config.toml`
///
/// Environment variable overrides: `EXAMKIT_DATA_FILE`, `EXAMKIT_RESULTS_LOG`.
pub fn load_config() -> Result<ExamkitConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ExamkitConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("examkit.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ExamkitConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ExamkitConfig::default(),
    };

    if let Ok(data_file) = std::env::var("EXAMKIT_DATA_FILE") {
        config.data_file = PathBuf::from(data_file);
    }
    if let Ok(results_log) = std::env::var("EXAMKIT_RESULTS_LOG") {
        config.results_log = PathBuf::from(results_log);
    }

    config.data_file = resolve_path(&config.data_file);
    config.results_log = resolve_path(&config.results_log);
    config.sheets_dir = resolve_path(&config.sheets_dir);
    config.reports_dir = resolve_path(&config.reports_dir);
    config.grades_dir = resolve_path(&config.grades_dir);
    config.descriptive_dir = resolve_path(&config.descriptive_dir);

    tracing::debug!(source = ?config_path, ?config, "configuration loaded");
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("examkit"))
}
