//! Error types for the screens built on top of the portal API.

use portal_api::types::QuestionId;
use portal_api::ApiError;
use thiserror::Error;

/// Errors reading or writing the persisted session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot start a session without a user id")]
    MissingId,
    #[error("could not access stored session")]
    Io(#[from] std::io::Error),
    #[error("could not serialize session")]
    Serialize(#[from] serde_json::Error),
}

/// Errors from the login screen.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoginError {
    #[error("login failed, please check your id and role")]
    Rejected(#[source] ApiError),
    #[error(transparent)]
    Api(ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<ApiError> for LoginError {
    fn from(err: ApiError) -> Self {
        match err {
            err @ ApiError::Status { .. } => Self::Rejected(err),
            err => Self::Api(err),
        }
    }
}

/// Errors from screens that load data scoped to the logged-in user.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("not logged in")]
    NotLoggedIn,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors from the exam screen.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExamError {
    #[error("not logged in")]
    NotLoggedIn,
    #[error("no questions were generated for this quiz")]
    NoQuestions,
    #[error("exam is {0}, not ready for answers")]
    NotReady(&'static str),
    #[error("question {0} is not part of this exam")]
    UnknownQuestion(QuestionId),
    #[error("`{option}` is not an option for question {question}")]
    UnknownOption { question: QuestionId, option: String },
    #[error("{answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },
    #[error("exam was already submitted")]
    AlreadySubmitted,
    #[error(transparent)]
    Api(#[from] ApiError),
}
