//! Presentation and automatic scoring of questions.
//!
//! Grading never fails. Malformed multiple-choice input takes the penalty
//! branch, and descriptive answers are captured for a human grader and score 0.

use rand::Rng;

use crate::model::{Question, QuestionKind, QuestionType, Shuffle, OPTION_COUNT};

/// What the student sees for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub prompt: String,
    pub question_type: QuestionType,
    /// Options in display order. Empty for non-multiple-choice questions.
    pub options: Vec<String>,
}

/// The outcome of grading a single answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    /// Contribution to the exam total.
    pub score: f64,
    pub verdict: Verdict,
    pub response: Response,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// A multiple-choice answer that is not a displayed option number.
    OutOfRange,
    /// Left for a human grader.
    Deferred,
}

/// The student's answer, resolved against the question.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Original (authoring-order) index of the chosen option.
    Choice(usize),
    /// Raw input that did not name a displayed option.
    InvalidChoice(String),
    Text(String),
}

/// Parse a 1-based displayed option number into a 0-based display position.
fn parse_choice(raw: &str) -> Option<usize> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=OPTION_COUNT).contains(n))
        .map(|n| n - 1)
}

impl Question {
    /// Present the question with a freshly randomized option order.
    pub fn present(&mut self) -> Presentation {
        self.present_with(&mut rand::rng())
    }

    /// Present the question, drawing the option order from `rng`.
    pub fn present_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Presentation {
        let shuffle = Shuffle::random(rng);
        self.present_in_order(shuffle)
    }

    /// Present the question with an explicit option order. Ignored for
    /// variants without options.
    pub fn present_in_order(&mut self, shuffle: Shuffle) -> Presentation {
        let question_type = self.question_type();
        let options = match &mut self.kind {
            QuestionKind::MultipleChoice(mcq) => {
                mcq.shuffle = Some(shuffle);
                shuffle
                    .order()
                    .iter()
                    .map(|&idx| mcq.options[idx].clone())
                    .collect()
            }
            QuestionKind::ShortAnswer(_) | QuestionKind::Descriptive(_) => Vec::new(),
        };
        Presentation {
            prompt: self.text.clone(),
            question_type,
            options,
        }
    }

    /// Score a raw answer against the current presentation.
    pub fn grade(&mut self, raw_answer: &str) -> f64 {
        self.assess(raw_answer).score
    }

    /// Score a raw answer and report how it was judged.
    pub fn assess(&mut self, raw_answer: &str) -> Assessment {
        let (positive, negative) = (self.positive_mark, self.negative_mark);
        let judged = |correct: bool| {
            if correct {
                (positive, Verdict::Correct)
            } else {
                (-negative, Verdict::Incorrect)
            }
        };

        match &mut self.kind {
            QuestionKind::MultipleChoice(mcq) => {
                let Some(displayed) = parse_choice(raw_answer) else {
                    return Assessment {
                        score: -negative,
                        verdict: Verdict::OutOfRange,
                        response: Response::InvalidChoice(raw_answer.to_string()),
                    };
                };
                // Never presented: options were shown in authoring order.
                let shuffle = mcq.shuffle.unwrap_or_else(Shuffle::identity);
                let original = shuffle.original_index(displayed);
                let (score, verdict) = judged(original == mcq.correct_index);
                Assessment {
                    score,
                    verdict,
                    response: Response::Choice(original),
                }
            }
            QuestionKind::ShortAnswer(sa) => {
                let (score, verdict) = judged(raw_answer == sa.correct_answer);
                Assessment {
                    score,
                    verdict,
                    response: Response::Text(raw_answer.to_string()),
                }
            }
            QuestionKind::Descriptive(desc) => {
                desc.student_answer = Some(raw_answer.to_string());
                Assessment {
                    score: 0.0,
                    verdict: Verdict::Deferred,
                    response: Response::Text(raw_answer.to_string()),
                }
            }
        }
    }
}
