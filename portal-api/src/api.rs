use async_trait::async_trait;

use crate::error::ApiError;
use crate::grade::ExamResult;
use crate::login::{Identity, LoginRequest};
use crate::question::GeneratedExam;
use crate::quiz::{Quiz, QuizName};
use crate::submission::ExamSubmission;
use crate::types::UserId;

/// Everything the portal can be asked to do. [`Client`](crate::client::Client) is the real
/// implementation; the trait exists so screens can be driven without a live portal.
///
/// Futures are not `Send`: the client is driven from a single task, one request at a time.
#[async_trait(?Send)]
pub trait PortalApi {
    /// Confirms the id exists with the given role.
    async fn login_check(&self, request: &LoginRequest) -> Result<Identity, ApiError>;

    async fn get_quizzes(&self, user: &UserId) -> Result<Vec<Quiz>, ApiError>;

    /// Asks the portal for a new question set. Every call creates a new exam attempt.
    async fn generate_exam(&self, quiz: &QuizName) -> Result<GeneratedExam, ApiError>;

    async fn submit_exam(&self, submission: &ExamSubmission) -> Result<(), ApiError>;

    async fn get_results(&self, user: &UserId) -> Result<Vec<ExamResult>, ApiError>;
}
