//! Taking an exam: present each question, collect an answer, grade it.

use rand::Rng;

use crate::grading::Presentation;
use crate::model::{Exam, QuestionKind};
use crate::transcript::{DescriptiveAnswer, Transcript};

/// Supplies the raw answer for each presented question.
pub trait AnswerSource {
    /// `number` is the 1-based position of the question in the exam.
    fn answer(&mut self, number: usize, presentation: &Presentation) -> String;
}

impl<F> AnswerSource for F
where
    F: FnMut(usize, &Presentation) -> String,
{
    fn answer(&mut self, number: usize, presentation: &Presentation) -> String {
        self(number, presentation)
    }
}

/// Everything a finished session produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub exam_code: String,
    pub student_id: String,
    /// Sum of the per-question scores; descriptive answers contribute 0.
    pub total: f64,
    pub transcript: Transcript,
    /// Descriptive answers awaiting a human grader.
    pub descriptive_answers: Vec<DescriptiveAnswer>,
}

/// Run one exam session to completion.
///
/// The caller is responsible for committing `total` to the result store.
pub fn run_session<R: Rng + ?Sized>(
    exam: &mut Exam,
    student_id: &str,
    rng: &mut R,
    answers: &mut dyn AnswerSource,
) -> SessionOutcome {
    let mut total = 0.0;
    let mut transcript = Transcript::new(student_id, exam.code.as_str());
    let mut descriptive_answers = Vec::new();

    for (idx, question) in exam.questions.iter_mut().enumerate() {
        let number = idx + 1;
        let presentation = question.present_with(rng);
        let raw = answers.answer(number, &presentation);
        let assessment = question.assess(&raw);
        total += assessment.score;

        transcript.push_answer(number, question, &assessment);
        if let QuestionKind::Descriptive(desc) = &question.kind {
            descriptive_answers.push(DescriptiveAnswer {
                number,
                question: question.text.clone(),
                answer: desc.student_answer.clone().unwrap_or_default(),
            });
        }
    }

    tracing::info!(
        exam = %exam.code,
        student = student_id,
        total,
        "session complete"
    );

    SessionOutcome {
        exam_code: exam.code.clone(),
        student_id: student_id.to_string(),
        total,
        transcript,
        descriptive_answers,
    }
}
