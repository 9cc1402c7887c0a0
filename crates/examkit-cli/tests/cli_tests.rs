//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use examkit_core::codec;
use examkit_core::directory::Roster;
use examkit_core::model::{Student, Teacher};

fn examkit(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("examkit").unwrap();
    cmd.current_dir(dir)
        .env_remove("EXAMKIT_DATA_FILE")
        .env_remove("EXAMKIT_RESULTS_LOG")
        .env("RUST_LOG", "examkit=warn");
    cmd
}

/// A working directory with a config file, one teacher and two students.
fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("examkit.toml"),
        "data_file = \"data.txt\"\nresults_log = \"grades_db.csv\"\n",
    )
    .unwrap();

    let mut roster = Roster::new();
    roster
        .add_teacher(Teacher {
            name: "Ada".into(),
            id: "t1".into(),
            password: "pw".into(),
            courses: vec!["Systems".into()],
            exams: Vec::new(),
        })
        .unwrap();
    for (id, name) in [("s1", "Sam"), ("s2", "Kim")] {
        roster
            .add_student(Student {
                name: name.into(),
                id: id.into(),
                password: "pw".into(),
                major: "CS".into(),
                registered_exams: Vec::new(),
            })
            .unwrap();
    }
    codec::save(&roster, &dir.path().join("data.txt")).unwrap();
    dir
}

const EXAM_TOML: &str = r#"
[exam]
code = "EX1"
teacher = "t1"

[[questions]]
type = "short"
text = "6 * 7?"
positive_mark = 2
negative_mark = 1
answer = "42"

[[questions]]
type = "descriptive"
text = "Explain ownership."
positive_mark = 5
reference_answer = "Each value has a single owner."
"#;

fn author_exam(dir: &Path) {
    std::fs::write(dir.join("ex1.toml"), EXAM_TOML).unwrap();
    examkit(dir)
        .args(["author", "--file", "ex1.toml"])
        .assert()
        .success();
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    examkit(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created examkit.toml"))
        .stdout(predicate::str::contains("Created exams/sample.toml"));

    assert!(dir.path().join("examkit.toml").exists());
    assert!(dir.path().join("data.txt").exists());
    assert!(dir.path().join("exams/sample.toml").exists());
}

#[test]
fn init_seeds_data_for_sample_exam() {
    let dir = TempDir::new().unwrap();

    examkit(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created data.txt"));

    examkit(dir.path())
        .args(["author", "--file", "exams/sample.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added exam SAMPLE1 (3 questions)"));

    examkit(dir.path())
        .args(["register", "--student", "s1", "--exam", "SAMPLE1"])
        .assert()
        .success();
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    examkit(dir.path()).arg("init").assert().success();
    examkit(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_clean_workspace() {
    let dir = workspace();

    examkit(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 teachers, 2 students, 0 exams"))
        .stdout(predicate::str::contains("All data valid."));
}

#[test]
fn validate_reports_malformed_result_lines() {
    let dir = workspace();
    std::fs::write(dir.path().join("grades_db.csv"), "EX1,s1,3\nbroken line\n").unwrap();

    examkit(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 entries)"))
        .stdout(predicate::str::contains("[line 2] WARNING"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn validate_missing_config_fails() {
    let dir = workspace();

    examkit(dir.path())
        .args(["validate", "--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: config file not found"));
}

#[test]
fn author_then_list_exams() {
    let dir = workspace();
    std::fs::write(dir.path().join("ex1.toml"), EXAM_TOML).unwrap();

    examkit(dir.path())
        .args(["author", "--file", "ex1.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added exam EX1 (2 questions)"));

    examkit(dir.path())
        .arg("exams")
        .assert()
        .success()
        .stdout(predicate::str::contains("EX1"))
        .stdout(predicate::str::contains("Ada (t1)"));
}

#[test]
fn author_duplicate_code_fails() {
    let dir = workspace();
    author_exam(dir.path());

    examkit(dir.path())
        .args(["author", "--file", "ex1.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exam code already in use: EX1"));
}

#[test]
fn author_unknown_teacher_fails() {
    let dir = workspace();
    std::fs::write(
        dir.path().join("ex2.toml"),
        EXAM_TOML.replace("teacher = \"t1\"", "teacher = \"t9\""),
    )
    .unwrap();

    examkit(dir.path())
        .args(["author", "--file", "ex2.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("teacher not found: t9"));
}

#[test]
fn register_twice() {
    let dir = workspace();
    author_exam(dir.path());

    examkit(dir.path())
        .args(["register", "--student", "s1", "--exam", "EX1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered s1 for exam EX1"));

    examkit(dir.path())
        .args(["register", "--student", "s1", "--exam", "EX1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already registered"));
}

#[test]
fn register_unknown_exam_fails() {
    let dir = workspace();

    examkit(dir.path())
        .args(["register", "--student", "s1", "--exam", "NOPE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exam not found: NOPE"));
}

#[test]
fn take_records_result_and_artifacts() {
    let dir = workspace();
    author_exam(dir.path());

    examkit(dir.path())
        .args(["take", "--student", "s1", "--exam", "EX1"])
        .write_stdin("42\nValues have one owner.\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("6 * 7?"))
        .stdout(predicate::str::contains("Total score: 2 out of 7"));

    let log = std::fs::read_to_string(dir.path().join("grades_db.csv")).unwrap();
    assert_eq!(log, "EX1,s1,2\n");

    let sheet = std::fs::read_to_string(dir.path().join("sheets/sheets1_EX1.txt")).unwrap();
    assert!(sheet.contains("Status: true"));
    assert!(sheet.contains("Status: awaiting manual grading"));

    let review = std::fs::read_to_string(dir.path().join("desc_answ/desc_s1_EX1.txt")).unwrap();
    assert!(review.contains("Student answer: Values have one owner."));
}

#[cfg(unix)]
#[test]
fn take_keeps_artifacts_when_log_append_fails() {
    let dir = workspace();
    author_exam(dir.path());
    std::fs::write(
        dir.path().join("examkit.toml"),
        "data_file = \"data.txt\"\nresults_log = \"link.csv\"\n",
    )
    .unwrap();
    // Reads as a missing log, but appending through it cannot create the target.
    std::os::unix::fs::symlink("nowhere/grades.csv", dir.path().join("link.csv")).unwrap();

    examkit(dir.path())
        .args(["take", "--student", "s1", "--exam", "EX1"])
        .write_stdin("42\nmy essay\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Total score: 2 out of 7"))
        .stderr(predicate::str::contains(
            "Error: failed to record the result in link.csv",
        ));

    assert!(dir.path().join("sheets/sheets1_EX1.txt").exists());
    let review = std::fs::read_to_string(dir.path().join("desc_answ/desc_s1_EX1.txt")).unwrap();
    assert!(review.contains("Student answer: my essay"));
}

#[test]
fn take_unknown_student_fails() {
    let dir = workspace();
    author_exam(dir.path());

    examkit(dir.path())
        .args(["take", "--student", "s9", "--exam", "EX1"])
        .write_stdin("42\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("student not found: s9"));
}

#[test]
fn report_after_take() {
    let dir = workspace();
    author_exam(dir.path());
    examkit(dir.path())
        .args(["take", "--student", "s1", "--exam", "EX1"])
        .write_stdin("41\nno idea\n")
        .assert()
        .success();

    examkit(dir.path())
        .args(["report", "--student", "s1", "--exam", "EX1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rank 1 of 1"));

    let report = std::fs::read_to_string(dir.path().join("reports/report_s1_EX1.txt")).unwrap();
    assert!(report.starts_with("Report card for student Sam (ID: s1)\n"));
    assert!(report.contains("Your score: -1 out of 7"));
    assert!(report.contains("Question details:\nQuestion 1: 6 * 7?"));
    assert!(report.contains("Your answer: 41"));
}

#[test]
fn report_nothing_to_show() {
    let dir = workspace();
    author_exam(dir.path());

    examkit(dir.path())
        .args(["report", "--student", "s1", "--exam", "EX1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No one has taken exam EX1 yet."));

    std::fs::write(dir.path().join("grades_db.csv"), "EX1,s2,5\n").unwrap();
    examkit(dir.path())
        .args(["report", "--student", "s1", "--exam", "EX1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("has not taken exam EX1"));
}

#[test]
fn report_unknown_exam_fails() {
    let dir = workspace();

    examkit(dir.path())
        .args(["report", "--student", "s1", "--exam", "NOPE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exam not found: NOPE"));
}

#[test]
fn grades_no_participants() {
    let dir = workspace();

    examkit(dir.path())
        .args(["grades", "--exam", "EX1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No one has taken exam EX1 yet."));
}

#[test]
fn grades_text_and_json() {
    let dir = workspace();
    std::fs::write(
        dir.path().join("grades_db.csv"),
        "EX1,s1,2\nEX1,s2,5.5\nEX1,s3,5.5\n",
    )
    .unwrap();

    examkit(dir.path())
        .args(["grades", "--exam", "EX1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("grades_EX1.txt"));

    let listing = std::fs::read_to_string(dir.path().join("grades_EX1.txt")).unwrap();
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines[2], "Name: Kim | ID: s2 | Score: 5.5");
    assert_eq!(lines[3], "Name:  | ID: s3 | Score: 5.5");
    assert_eq!(lines[4], "Name: Sam | ID: s1 | Score: 2");
    assert!(listing.contains("Average score: 4.33"));

    examkit(dir.path())
        .args(["grades", "--exam", "EX1", "--format", "json"])
        .assert()
        .success();
    let json: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("grades_EX1.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(json["report"]["rows"][2]["rank"], 3);
}

#[test]
fn unknown_format_fails() {
    let dir = workspace();

    examkit(dir.path())
        .args(["grades", "--exam", "EX1", "--format", "html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: html"));
}
