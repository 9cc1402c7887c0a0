//! TOML exam definition parser.
//!
//! Lets an author write an exam as a file instead of typing it in question by
//! question:
//!
//! ```toml
//! [exam]
//! code = "EX1"
//! teacher = "t1"
//!
//! [[questions]]
//! type = "mcq"
//! text = "Which letter comes second?"
//! positive_mark = 2
//! negative_mark = 0.5
//! options = ["a", "b", "c", "d"]
//! correct = 2
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Exam, Question, OPTION_COUNT};

/// Intermediate TOML structure for exam definition files.
#[derive(Debug, Deserialize)]
struct TomlExamFile {
    exam: TomlExamHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlExamHeader {
    code: String,
    teacher: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TomlQuestion {
    Mcq {
        text: String,
        positive_mark: f64,
        #[serde(default)]
        negative_mark: f64,
        options: Vec<String>,
        /// 1-based, as an author would count.
        correct: usize,
    },
    Short {
        text: String,
        positive_mark: f64,
        #[serde(default)]
        negative_mark: f64,
        answer: String,
    },
    Descriptive {
        text: String,
        positive_mark: f64,
        #[serde(default)]
        reference_answer: String,
    },
}

/// A parsed exam together with the id of the teacher who owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamDefinition {
    pub teacher_id: String,
    pub exam: Exam,
}

/// Parse an exam definition file.
pub fn parse_exam_definition(path: &Path) -> Result<ExamDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read exam definition: {}", path.display()))?;

    parse_exam_definition_str(&content, path)
}

/// Parse an exam definition from a TOML string (useful for testing).
pub fn parse_exam_definition_str(content: &str, source_path: &Path) -> Result<ExamDefinition> {
    let parsed: TomlExamFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    anyhow::ensure!(
        !parsed.exam.code.trim().is_empty(),
        "exam code must not be empty ({})",
        source_path.display()
    );
    anyhow::ensure!(
        !parsed.exam.code.contains(char::is_whitespace) && !parsed.exam.code.contains(','),
        "exam code {:?} must not contain whitespace or commas",
        parsed.exam.code
    );

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            convert_question(q).with_context(|| format!("question {} is invalid", i + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ExamDefinition {
        teacher_id: parsed.exam.teacher,
        exam: Exam::new(parsed.exam.code, questions),
    })
}

fn convert_question(q: TomlQuestion) -> Result<Question> {
    let question = match q {
        TomlQuestion::Mcq {
            text,
            positive_mark,
            negative_mark,
            options,
            correct,
        } => {
            let count = options.len();
            let options: [String; OPTION_COUNT] = options.try_into().map_err(|_| {
                anyhow::anyhow!("expected {OPTION_COUNT} options, found {count}")
            })?;
            anyhow::ensure!(
                (1..=OPTION_COUNT).contains(&correct),
                "correct must be between 1 and {OPTION_COUNT}, got {correct}"
            );
            Question::multiple_choice(text, positive_mark, negative_mark, options, correct - 1)?
        }
        TomlQuestion::Short {
            text,
            positive_mark,
            negative_mark,
            answer,
        } => Question::short_answer(text, positive_mark, negative_mark, answer)?,
        TomlQuestion::Descriptive {
            text,
            positive_mark,
            reference_answer,
        } => Question::descriptive(text, positive_mark, reference_answer)?,
    };
    Ok(question)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionKind, QuestionType};
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[exam]
code = "EX1"
teacher = "t1"

[[questions]]
type = "mcq"
text = "Which letter comes second?"
positive_mark = 2
negative_mark = 0.5
options = ["a", "b", "c", "d"]
correct = 2

[[questions]]
type = "short"
text = "6 * 7?"
positive_mark = 1.5
answer = "42"

[[questions]]
type = "descriptive"
text = "Explain borrowing."
positive_mark = 5
reference_answer = "Shared or unique references."
"#;

    #[test]
    fn parse_valid_toml() {
        let def = parse_exam_definition_str(VALID_TOML, &PathBuf::from("ex1.toml")).unwrap();
        assert_eq!(def.teacher_id, "t1");
        assert_eq!(def.exam.code, "EX1");
        assert_eq!(def.exam.questions.len(), 3);
        match &def.exam.questions[0].kind {
            QuestionKind::MultipleChoice(mcq) => assert_eq!(mcq.correct_index, 1),
            other => panic!("unexpected kind: {other:?}"),
        }
        assert_eq!(def.exam.questions[1].negative_mark, 0.0);
        assert_eq!(
            def.exam.questions[2].question_type(),
            QuestionType::Descriptive
        );
    }

    #[test]
    fn wrong_option_count() {
        let toml = r#"
[exam]
code = "EX1"
teacher = "t1"

[[questions]]
type = "mcq"
text = "Pick"
positive_mark = 1
options = ["a", "b", "c"]
correct = 1
"#;
        let err = parse_exam_definition_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("expected 4 options, found 3"));
    }

    #[test]
    fn short_answer_with_space_rejected() {
        let toml = r#"
[exam]
code = "EX1"
teacher = "t1"

[[questions]]
type = "short"
text = "Name?"
positive_mark = 1
answer = "two words"
"#;
        let err = parse_exam_definition_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("single word"));
    }

    #[test]
    fn correct_is_one_based() {
        let toml = r#"
[exam]
code = "EX1"
teacher = "t1"

[[questions]]
type = "mcq"
text = "Pick"
positive_mark = 1
options = ["a", "b", "c", "d"]
correct = 0
"#;
        assert!(parse_exam_definition_str(toml, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn unknown_type_rejected() {
        let toml = r#"
[exam]
code = "EX1"
teacher = "t1"

[[questions]]
type = "truefalse"
text = "Pick"
positive_mark = 1
"#;
        assert!(parse_exam_definition_str(toml, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn exam_code_with_comma_rejected() {
        let toml = "[exam]\ncode = \"EX,1\"\nteacher = \"t1\"\n";
        assert!(parse_exam_definition_str(toml, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn parse_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ex1.toml");
        std::fs::write(&path, VALID_TOML).unwrap();
        let def = parse_exam_definition(&path).unwrap();
        assert_eq!(def.exam.code, "EX1");
    }
}
