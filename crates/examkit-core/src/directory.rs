//! Teachers, students, and the lookups other components need from them.

use std::collections::HashSet;

use crate::error::ExamError;
use crate::model::{no_comma, single_line, Exam, QuestionKind, Student, Teacher, OPTION_COUNT};

/// Read-only exam lookup by code.
pub trait ExamDirectory {
    fn find_exam(&self, code: &str) -> Option<&Exam>;
}

/// Read-only student-name lookup by id.
pub trait StudentDirectory {
    fn student_name(&self, id: &str) -> Option<&str>;
}

/// Everyone known to the system and everything they authored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    pub teachers: Vec<Teacher>,
    pub students: Vec<Student>,
}

/// Result of a successful registration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Registered,
    AlreadyRegistered,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if no teacher or student uses `id`.
    pub fn is_id_free(&self, id: &str) -> bool {
        !self.teachers.iter().any(|t| t.id == id) && !self.students.iter().any(|s| s.id == id)
    }

    pub fn add_teacher(&mut self, teacher: Teacher) -> Result<(), ExamError> {
        single_line("teacher name", &teacher.name)?;
        single_line("teacher id", &teacher.id)?;
        no_comma("teacher id", &teacher.id)?;
        single_line("teacher password", &teacher.password)?;
        for course in &teacher.courses {
            single_line("course name", course)?;
        }
        for exam in &teacher.exams {
            check_exam_code(&exam.code)?;
        }
        if !self.is_id_free(&teacher.id) {
            return Err(ExamError::DuplicateId(teacher.id));
        }
        self.teachers.push(teacher);
        Ok(())
    }

    pub fn add_student(&mut self, student: Student) -> Result<(), ExamError> {
        single_line("student name", &student.name)?;
        single_line("student id", &student.id)?;
        no_comma("student id", &student.id)?;
        single_line("student password", &student.password)?;
        single_line("student major", &student.major)?;
        for code in &student.registered_exams {
            single_line("registered exam code", code)?;
        }
        if !self.is_id_free(&student.id) {
            return Err(ExamError::DuplicateId(student.id));
        }
        self.students.push(student);
        Ok(())
    }

    /// Attach a new exam to its author. Exam codes are unique across the roster.
    pub fn add_exam(&mut self, teacher_id: &str, exam: Exam) -> Result<(), ExamError> {
        check_exam_code(&exam.code)?;
        if self.find_exam(&exam.code).is_some() {
            return Err(ExamError::DuplicateExamCode(exam.code));
        }
        let teacher = self
            .teachers
            .iter_mut()
            .find(|t| t.id == teacher_id)
            .ok_or_else(|| ExamError::TeacherNotFound(teacher_id.to_string()))?;
        tracing::debug!(exam = %exam.code, teacher = teacher_id, "exam added");
        teacher.exams.push(exam);
        Ok(())
    }

    pub fn find_exam_mut(&mut self, code: &str) -> Option<&mut Exam> {
        self.teachers
            .iter_mut()
            .flat_map(|t| t.exams.iter_mut())
            .find(|e| e.code == code)
    }

    /// The teacher that owns exam `code`.
    pub fn exam_owner(&self, code: &str) -> Option<&Teacher> {
        self.teachers
            .iter()
            .find(|t| t.exams.iter().any(|e| e.code == code))
    }

    pub fn find_student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// All exams in authoring order, teacher by teacher.
    pub fn exams(&self) -> impl Iterator<Item = &Exam> {
        self.teachers.iter().flat_map(|t| t.exams.iter())
    }

    /// Register a student for an existing exam.
    pub fn register(&mut self, student_id: &str, code: &str) -> Result<Registration, ExamError> {
        if self.find_exam(code).is_none() {
            return Err(ExamError::ExamNotFound(code.to_string()));
        }
        let student = self
            .students
            .iter_mut()
            .find(|s| s.id == student_id)
            .ok_or_else(|| ExamError::StudentNotFound(student_id.to_string()))?;
        if student.registered_exams.iter().any(|c| c == code) {
            return Ok(Registration::AlreadyRegistered);
        }
        student.registered_exams.push(code.to_string());
        Ok(Registration::Registered)
    }
}

fn check_exam_code(code: &str) -> Result<(), ExamError> {
    single_line("exam code", code)?;
    no_comma("exam code", code)
}

impl ExamDirectory for Roster {
    fn find_exam(&self, code: &str) -> Option<&Exam> {
        self.exams().find(|e| e.code == code)
    }
}

impl StudentDirectory for Roster {
    fn student_name(&self, id: &str) -> Option<&str> {
        self.find_student(id).map(|s| s.name.as_str())
    }
}

/// A warning from roster validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// The exam code (if applicable).
    pub exam_code: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn exam(code: &str, message: String) -> Self {
        Self {
            exam_code: Some(code.to_string()),
            message,
        }
    }
}

/// Check a roster for problems the authoring constructors would have refused,
/// e.g. in a hand-edited data file.
pub fn validate(roster: &Roster) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    let ids = roster
        .teachers
        .iter()
        .map(|t| &t.id)
        .chain(roster.students.iter().map(|s| &s.id));
    for id in ids {
        if !seen_ids.insert(id) {
            warnings.push(ValidationWarning {
                exam_code: None,
                message: format!("duplicate user ID: {id}"),
            });
        }
    }

    let mut seen_codes = HashSet::new();
    for exam in roster.exams() {
        if !seen_codes.insert(exam.code.as_str()) {
            warnings.push(ValidationWarning::exam(
                &exam.code,
                format!("duplicate exam code: {}", exam.code),
            ));
        }
        if exam.questions.is_empty() {
            warnings.push(ValidationWarning::exam(&exam.code, "exam has no questions".into()));
        }
        for (i, q) in exam.questions.iter().enumerate() {
            match &q.kind {
                QuestionKind::MultipleChoice(mcq) if mcq.correct_index >= OPTION_COUNT => {
                    warnings.push(ValidationWarning::exam(
                        &exam.code,
                        format!(
                            "question {}: correct option index {} out of range",
                            i + 1,
                            mcq.correct_index
                        ),
                    ));
                }
                QuestionKind::ShortAnswer(sa)
                    if sa.correct_answer.chars().any(char::is_whitespace) =>
                {
                    warnings.push(ValidationWarning::exam(
                        &exam.code,
                        format!("question {}: short answer contains whitespace", i + 1),
                    ));
                }
                _ => {}
            }
        }
    }

    for student in &roster.students {
        for code in &student.registered_exams {
            if !seen_codes.contains(code.as_str()) {
                warnings.push(ValidationWarning::exam(
                    code,
                    format!("student {} is registered for unknown exam {code}", student.id),
                ));
            }
        }
    }

    warnings
}
