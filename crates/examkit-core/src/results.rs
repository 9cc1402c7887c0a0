//! Append-only result log and its in-memory index.
//!
//! Each line of the log is `examCode,studentId,score`. Lines are never
//! rewritten; a student who retakes an exam simply gets another line.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ExamError;

/// One recorded (exam, student, score) observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub exam_code: String,
    pub student_id: String,
    pub score: f64,
}

impl ResultEntry {
    pub fn new(exam_code: impl Into<String>, student_id: impl Into<String>, score: f64) -> Self {
        Self {
            exam_code: exam_code.into(),
            student_id: student_id.into(),
            score,
        }
    }

    /// The log line for this entry, without the trailing newline.
    pub fn to_log_line(&self) -> String {
        format!("{},{},{}", self.exam_code, self.student_id, self.score)
    }
}

/// A log line that could not be loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line: usize,
    pub content: String,
}

/// Results grouped by exam code, in log order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultStore {
    log_path: Option<PathBuf>,
    by_exam: HashMap<String, Vec<ResultEntry>>,
}

impl ResultStore {
    /// An in-memory store with no backing log.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load every parseable line of the log at `path`. Subsequent
    /// [`record`](Self::record) calls append to the same file. A missing log
    /// is an empty store.
    pub fn load(path: &Path) -> Result<(Self, Vec<SkippedLine>), ExamError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(source) => {
                return Err(ExamError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let (mut store, skipped) = Self::parse(&content);
        store.log_path = Some(path.to_path_buf());
        tracing::info!(
            path = %path.display(),
            entries = store.len(),
            skipped = skipped.len(),
            "loaded result log"
        );
        Ok((store, skipped))
    }

    /// Build an in-memory store from log text. Lines without three fields or
    /// with a non-numeric score are skipped.
    pub fn parse(content: &str) -> (Self, Vec<SkippedLine>) {
        let mut store = Self::default();
        let mut skipped = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(line) {
                Some(entry) => store.insert(entry),
                None => {
                    tracing::warn!(line = idx + 1, content = line, "skipping malformed result line");
                    skipped.push(SkippedLine {
                        line: idx + 1,
                        content: line.to_string(),
                    });
                }
            }
        }

        (store, skipped)
    }

    /// Record a finished session.
    ///
    /// The entry always lands in the in-memory index. If the log cannot be
    /// appended to, the error is returned but the index keeps the entry.
    pub fn record(
        &mut self,
        exam_code: &str,
        student_id: &str,
        score: f64,
    ) -> Result<(), ExamError> {
        let entry = ResultEntry::new(exam_code, student_id, score);
        let appended = match &self.log_path {
            Some(path) => append_line(path, &entry.to_log_line()),
            None => Ok(()),
        };
        self.insert(entry);
        if let Err(e) = &appended {
            tracing::error!(error = %e, exam = exam_code, student = student_id, "result log not updated");
        }
        appended
    }

    /// Entries for `exam_code` in log order; empty if the code is unknown.
    pub fn all_for_exam(&self, exam_code: &str) -> &[ResultEntry] {
        self.by_exam.get(exam_code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Exam codes with at least one entry, sorted.
    pub fn exam_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.by_exam.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// Total number of entries across all exams.
    pub fn len(&self) -> usize {
        self.by_exam.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_exam.is_empty()
    }

    fn insert(&mut self, entry: ResultEntry) {
        self.by_exam
            .entry(entry.exam_code.clone())
            .or_default()
            .push(entry);
    }
}

/// The exam code runs to the first comma and the score starts after the
/// last, so a student id written with a comma still reads back.
fn parse_line(line: &str) -> Option<ResultEntry> {
    let (head, score) = line.rsplit_once(',')?;
    let (exam_code, student_id) = head.split_once(',')?;
    let score = score.trim().parse::<f64>().ok()?;
    score.is_finite().then(|| ResultEntry::new(exam_code, student_id, score))
}

fn append_line(path: &Path, line: &str) -> Result<(), ExamError> {
    let io_err = |source| ExamError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;
    writeln!(file, "{line}").map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_groups_by_exam_in_order() {
        let (store, skipped) = ResultStore::parse("EX2,S1,8\nEX1,S9,3\nEX2,S2,8\nEX2,S3,5\n");
        assert!(skipped.is_empty());
        let ids: Vec<_> = store
            .all_for_exam("EX2")
            .iter()
            .map(|e| e.student_id.as_str())
            .collect();
        assert_eq!(ids, vec!["S1", "S2", "S3"]);
        assert_eq!(store.len(), 4);
        assert_eq!(store.exam_codes(), vec!["EX1", "EX2"]);
    }

    #[test]
    fn malformed_score_skips_only_that_line() {
        let log = "EX1,S1,7.5\nEX1,S2,abc\nEX1,S3,-1.25\ngarbage\n\nEX1,S4,9\n";
        let (store, skipped) = ResultStore::parse(log);
        let scores: Vec<f64> = store.all_for_exam("EX1").iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![7.5, -1.25, 9.0]);
        assert_eq!(skipped.len(), 2);
        assert_eq!(skipped[0].line, 2);
        assert_eq!(skipped[1].content, "garbage");
    }

    #[test]
    fn unknown_exam_is_empty() {
        let store = ResultStore::in_memory();
        assert!(store.all_for_exam("NOPE").is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn retakes_are_kept() {
        let mut store = ResultStore::in_memory();
        store.record("EX1", "S1", 4.0).unwrap();
        store.record("EX1", "S1", 9.0).unwrap();
        assert_eq!(store.all_for_exam("EX1").len(), 2);
        assert_eq!(store.all_for_exam("EX1")[0].score, 4.0);
    }

    #[test]
    fn record_appends_and_indexes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grades_db.csv");
        std::fs::write(&path, "EX1,S1,3\n").unwrap();

        let (mut store, _) = ResultStore::load(&path).unwrap();
        store.record("EX1", "S2", 1.5).unwrap();
        store.record("EX2", "S1", -0.5).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "EX1,S1,3\nEX1,S2,1.5\nEX2,S1,-0.5\n");

        let (reloaded, _) = ResultStore::load(&path).unwrap();
        assert_eq!(reloaded, store);
    }

    #[test]
    fn comma_in_student_id_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grades_db.csv");
        let (mut store, _) = ResultStore::load(&path).unwrap();
        store.record("EX1", "s,1", 5.0).unwrap();

        let (reloaded, skipped) = ResultStore::load(&path).unwrap();
        assert!(skipped.is_empty());
        assert_eq!(reloaded.all_for_exam("EX1"), store.all_for_exam("EX1"));
        assert_eq!(reloaded.all_for_exam("EX1")[0].student_id, "s,1");
    }

    #[test]
    fn record_creates_log_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("grades_db.csv");
        let (mut store, _) = ResultStore::load(&path).unwrap();
        store.record("EX1", "S1", 2.5).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "EX1,S1,2.5\n");
    }

    #[test]
    fn load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grades_db.csv");
        std::fs::write(&path, "EX1,S1,3\nEX1,S2,x\nEX2,S3,4\n").unwrap();

        let (first, _) = ResultStore::load(&path).unwrap();
        let (second, _) = ResultStore::load(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_log_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let (store, skipped) = ResultStore::load(&dir.path().join("absent.csv")).unwrap();
        assert!(store.is_empty());
        assert!(skipped.is_empty());
    }

    #[test]
    fn failed_append_keeps_in_memory_entry() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let mut store = ResultStore {
            log_path: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let err = store.record("EX1", "S1", 5.0).unwrap_err();
        assert!(matches!(err, ExamError::Io { .. }));
        assert_eq!(store.all_for_exam("EX1").len(), 1);
    }
}
