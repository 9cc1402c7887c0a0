//! The `examkit init` command.

use std::path::Path;

use anyhow::Result;

use examkit_core::codec;
use examkit_core::directory::Roster;
use examkit_core::model::{Student, Teacher};

pub fn execute() -> Result<()> {
    if Path::new("examkit.toml").exists() {
        println!("examkit.toml already exists, skipping.");
    } else {
        std::fs::write("examkit.toml", SAMPLE_CONFIG)?;
        println!("Created examkit.toml");
    }

    let data_path = Path::new("data.txt");
    if data_path.exists() {
        println!("data.txt already exists, skipping.");
    } else {
        codec::save(&seed_roster()?, data_path)?;
        println!("Created data.txt (teacher t1, student s1)");
    }

    std::fs::create_dir_all("exams")?;
    let sample_path = Path::new("exams/sample.toml");
    if sample_path.exists() {
        println!("exams/sample.toml already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_EXAM)?;
        println!("Created exams/sample.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: examkit author --file exams/sample.toml");
    println!("  2. Run: examkit register --student s1 --exam SAMPLE1");
    println!("  3. Run: examkit take --student s1 --exam SAMPLE1");

    Ok(())
}

/// One teacher to own the sample exam and one student to take it.
fn seed_roster() -> Result<Roster> {
    let mut roster = Roster::new();
    roster.add_teacher(Teacher {
        name: "Sample Teacher".into(),
        id: "t1".into(),
        password: "changeme".into(),
        courses: vec!["Rust Basics".into()],
        exams: Vec::new(),
    })?;
    roster.add_student(Student {
        name: "Sample Student".into(),
        id: "s1".into(),
        password: "changeme".into(),
        major: "Computer Science".into(),
        registered_exams: Vec::new(),
    })?;
    Ok(roster)
}

const SAMPLE_CONFIG: &str = r#"# examkit configuration

data_file = "data.txt"
results_log = "grades_db.csv"
sheets_dir = "sheets"
reports_dir = "reports"
grades_dir = "."
descriptive_dir = "desc_answ"
"#;

const SAMPLE_EXAM: &str = r#"[exam]
code = "SAMPLE1"
teacher = "t1"

[[questions]]
type = "mcq"
text = "Which keyword declares an immutable binding?"
positive_mark = 2
negative_mark = 0.5
options = ["let", "mut", "var", "const fn"]
correct = 1

[[questions]]
type = "short"
text = "How many bits are in a byte?"
positive_mark = 1
answer = "8"

[[questions]]
type = "descriptive"
text = "Explain the difference between a shared and a mutable reference."
positive_mark = 5
reference_answer = "Many shared references may coexist; a mutable one is exclusive."
"#;
