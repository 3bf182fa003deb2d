#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use portal_api::error::StatusCode;
use portal_api::grade::ExamResult;
use portal_api::login::{Identity, LoginRequest};
use portal_api::question::{GeneratedExam, Question};
use portal_api::quiz::{Quiz, QuizName};
use portal_api::submission::ExamSubmission;
use portal_api::types::{ExamId, QuestionId, QuizId, Role, UserId};
use portal_api::{ApiError, PortalApi};

/// A portal that answers from canned data and remembers what was submitted.
#[derive(Default)]
pub struct FakePortal {
    pub identities: Vec<Identity>,
    pub quizzes: Vec<Quiz>,
    /// `None` makes generation fail.
    pub exam: Option<GeneratedExam>,
    pub results: Vec<ExamResult>,
    /// How many of the next submits fail.
    pub failing_submits: Cell<usize>,
    pub submissions: RefCell<Vec<ExamSubmission>>,
    pub generated_for: RefCell<Vec<QuizName>>,
}

impl FakePortal {
    pub fn with_exam(exam: GeneratedExam) -> Self {
        Self {
            exam: Some(exam),
            ..Self::default()
        }
    }
}

#[async_trait(?Send)]
impl PortalApi for FakePortal {
    async fn login_check(&self, request: &LoginRequest) -> Result<Identity, ApiError> {
        self.identities
            .iter()
            .find(|identity| identity.id() == request.id() && identity.role() == request.role())
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: StatusCode::UNAUTHORIZED,
                message: "unknown id or role".to_owned(),
            })
    }

    async fn get_quizzes(&self, _user: &UserId) -> Result<Vec<Quiz>, ApiError> {
        Ok(self.quizzes.clone())
    }

    async fn generate_exam(&self, quiz: &QuizName) -> Result<GeneratedExam, ApiError> {
        self.generated_for.borrow_mut().push(quiz.clone());
        self.exam.clone().ok_or_else(|| ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "generation failed".to_owned(),
        })
    }

    async fn submit_exam(&self, submission: &ExamSubmission) -> Result<(), ApiError> {
        let failing = self.failing_submits.get();
        if failing > 0 {
            self.failing_submits.set(failing - 1);
            return Err(ApiError::Malformed("submission rejected".to_owned()));
        }
        self.submissions.borrow_mut().push(submission.clone());
        Ok(())
    }

    async fn get_results(&self, _user: &UserId) -> Result<Vec<ExamResult>, ApiError> {
        Ok(self.results.clone())
    }
}

pub fn three_question_exam() -> GeneratedExam {
    let question = |id, text: &str, options: &[&str]| {
        Question::new(
            QuestionId::new(id),
            text.to_owned(),
            options.iter().map(|option| option.to_string()).collect(),
        )
    };

    GeneratedExam::new(
        ExamId::new(77),
        vec![
            question(1, "What is React?", &["A library", "A framework", "A language"]),
            question(2, "What is JSX?", &["JavaScript XML", "Java Syntax", "JSON Extension"]),
            question(3, "Rust has a garbage collector", &["True", "False"]),
        ],
    )
}

pub fn quiz(id: u64, name: &str) -> Quiz {
    Quiz::new(QuizId::new(id), name.into())
}

pub fn student(id: &str) -> Identity {
    Identity::new(UserId::from(id), Role::Student, None)
}
