use std::fmt;

use itertools::Itertools;
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::types::{ExamId, QuestionId};

pub const MIN_OPTIONS: usize = 2;

/// One generated question as the portal sends it. Multiple choice questions fill `a`, `b` and
/// `c`; true/false questions only `a` and `b`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeneratedQuestion {
    #[serde(rename = "q_ID")]
    question_id: QuestionId,
    #[serde(rename = "ex_ID")]
    exam_id: ExamId,
    question: String,
    #[serde(default)]
    a: Option<String>,
    #[serde(default)]
    b: Option<String>,
    #[serde(default)]
    c: Option<String>,
}

impl GeneratedQuestion {
    fn into_question(self) -> Result<Question, ApiError> {
        let options: Vec<String> = [self.a, self.b, self.c]
            .into_iter()
            .flatten()
            .filter(|option| !option.trim().is_empty())
            .collect();

        if options.len() < MIN_OPTIONS {
            return Err(ApiError::Malformed(format!(
                "question {} has {} usable options, expected at least {MIN_OPTIONS}",
                self.question_id,
                options.len()
            )));
        }

        Ok(Question {
            id: self.question_id,
            text: self.question,
            options,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<String>,
}

impl Question {
    pub fn new(id: QuestionId, text: String, options: Vec<String>) -> Self {
        Self { id, text, options }
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|candidate| candidate == option)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.text)
    }
}

/// A freshly generated question set. `exam_id` is only absent when the portal generated no
/// questions at all, since the id travels on each question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedExam {
    exam_id: Option<ExamId>,
    questions: Vec<Question>,
}

impl GeneratedExam {
    pub fn new(exam_id: ExamId, questions: Vec<Question>) -> Self {
        Self {
            exam_id: Some(exam_id),
            questions,
        }
    }

    pub fn empty() -> Self {
        Self {
            exam_id: None,
            questions: Vec::new(),
        }
    }

    pub(crate) fn from_generated(generated: Vec<GeneratedQuestion>) -> Result<Self, ApiError> {
        let exam_id = match generated.iter().map(|question| question.exam_id).all_equal_value() {
            Ok(exam_id) => Some(exam_id),
            Err(None) => None,
            Err(Some((first, second))) => {
                return Err(ApiError::Malformed(format!(
                    "generated questions belong to different exams ({first} and {second})"
                )));
            }
        };

        let question_ids = generated.iter().map(|question| question.question_id);
        if let Some(question_id) = question_ids.duplicates().next() {
            return Err(ApiError::Malformed(format!(
                "question {question_id} was generated more than once"
            )));
        }

        let questions: Vec<Question> = generated
            .into_iter()
            .map(GeneratedQuestion::into_question)
            .try_collect()?;
        debug!(?exam_id, num_questions = questions.len(), "normalized generated exam");

        Ok(Self { exam_id, questions })
    }

    pub fn exam_id(&self) -> Option<ExamId> {
        self.exam_id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn into_parts(self) -> (Option<ExamId>, Vec<Question>) {
        (self.exam_id, self.questions)
    }
}
