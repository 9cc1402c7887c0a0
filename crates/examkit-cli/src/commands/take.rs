//! The `examkit take` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use examkit_core::error::ExamError;
use examkit_core::grading::Presentation;
use examkit_core::session::{run_session, AnswerSource};
use examkit_core::statistics::{format_score, total_possible};
use examkit_core::transcript::append_review_log;

/// Prints each question to stdout and reads one line per answer.
struct ConsoleAnswers<R> {
    input: R,
}

impl<R: BufRead> AnswerSource for ConsoleAnswers<R> {
    fn answer(&mut self, number: usize, presentation: &Presentation) -> String {
        println!("\nQuestion {number} ({}):", presentation.question_type.label());
        println!("{}", presentation.prompt);
        for (i, option) in presentation.options.iter().enumerate() {
            println!("  {}. {option}", i + 1);
        }
        print!("Answer: ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if let Err(e) = self.input.read_line(&mut line) {
            tracing::warn!(error = %e, "failed to read answer, treating it as empty");
        }
        strip_line_ending(&line).to_string()
    }
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

pub fn execute(student: String, exam_code: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let mut roster = super::load_roster(&config)?;
    let mut store = super::load_results(&config)?;

    let registered = roster
        .find_student(&student)
        .ok_or_else(|| ExamError::StudentNotFound(student.clone()))?
        .registered_exams
        .contains(&exam_code);
    if !registered {
        tracing::warn!(student = %student, exam = %exam_code, "student is not registered for this exam");
    }

    let exam = roster
        .find_exam_mut(&exam_code)
        .ok_or_else(|| ExamError::ExamNotFound(exam_code.clone()))?;

    println!("Starting exam {}", exam.code);
    let stdin = io::stdin();
    let mut answers = ConsoleAnswers {
        input: stdin.lock(),
    };
    let outcome = run_session(exam, &student, &mut rand::rng(), &mut answers);
    let possible = total_possible(exam);

    // A failed append must not lose the transcript or the review log.
    let recorded = store.record(&outcome.exam_code, &outcome.student_id, outcome.total);
    if let Err(e) = &recorded {
        tracing::error!(error = %e, "result was graded but not written to the log");
    }

    let sheet = outcome.transcript.save(&config.sheets_dir)?;
    tracing::info!(path = %sheet.display(), "transcript saved");
    if let Some(path) = append_review_log(
        &config.descriptive_dir,
        &outcome.student_id,
        &outcome.exam_code,
        &outcome.descriptive_answers,
    )? {
        println!(
            "{} descriptive answer(s) saved for manual grading in {}",
            outcome.descriptive_answers.len(),
            path.display()
        );
    }

    println!(
        "\nTotal score: {} out of {}",
        format_score(outcome.total),
        format_score(possible)
    );

    recorded.with_context(|| {
        format!(
            "failed to record the result in {}",
            config.results_log.display()
        )
    })
}
