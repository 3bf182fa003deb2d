use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use tower::ServiceExt;
use tracing::{debug, info};
use url::Url;

use crate::api::PortalApi;
use crate::error::ApiError;
use crate::grade::ExamResult;
use crate::login::{Identity, LoginRequest};
use crate::question::{GeneratedExam, GeneratedQuestion};
use crate::quiz::{Quiz, QuizName};
use crate::services::api_service::{self, ApiService, PortalRequest};
use crate::submission::ExamSubmission;
use crate::types::UserId;
use crate::util::{
    student_courses_path, student_grades_path, GENERATE_EXAM_PATH, LOGIN_CHECK_PATH,
    SUBMIT_EXAM_PATH,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How many questions of each kind to ask for when generating an exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionCounts {
    multiple_choice: u32,
    true_false: u32,
}

impl QuestionCounts {
    pub fn new(multiple_choice: u32, true_false: u32) -> Self {
        Self {
            multiple_choice,
            true_false,
        }
    }

    pub fn multiple_choice(self) -> u32 {
        self.multiple_choice
    }

    pub fn true_false(self) -> u32 {
        self.true_false
    }
}

impl Default for QuestionCounts {
    fn default() -> Self {
        Self::new(5, 5)
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Duration,
    question_counts: QuestionCounts,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            question_counts: QuestionCounts::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_question_counts(mut self, question_counts: QuestionCounts) -> Self {
        self.question_counts = question_counts;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn question_counts(&self) -> QuestionCounts {
        self.question_counts
    }
}

/// The one place requests to the portal are made from.
#[derive(Clone)]
pub struct Client {
    http_client: HttpClient,
    service: ApiService,
    base_url: Url,
    question_counts: QuestionCounts,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http_client = api_service::http_client(config.timeout)?;
        let service = api_service::service(http_client.clone());

        Ok(Self {
            http_client,
            service,
            base_url: config.base_url,
            question_counts: config.question_counts,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send(&self, request: PortalRequest) -> Result<Response, ApiError> {
        let request_builder = request.request_builder(&self.http_client, &self.base_url)?;
        let request = request_builder.build()?;
        info!(url = %request.url(), method = %request.method(), "preparing portal request");

        let response = self.service.clone().oneshot(request).await?;
        debug!(status = %response.status(), "portal responded");
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: PortalRequest) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let value = response.json().await?;
        Ok(value)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("question_counts", &self.question_counts)
            .finish_non_exhaustive()
    }
}

#[async_trait(?Send)]
impl PortalApi for Client {
    #[tracing::instrument(skip(self), err)]
    async fn login_check(&self, request: &LoginRequest) -> Result<Identity, ApiError> {
        let request = PortalRequest::post(LOGIN_CHECK_PATH.iter().copied()).with_json(request)?;
        self.send_json(request).await
    }

    #[tracing::instrument(skip(self), err)]
    async fn get_quizzes(&self, user: &UserId) -> Result<Vec<Quiz>, ApiError> {
        let request = PortalRequest::get(student_courses_path(user));
        self.send_json(request).await
    }

    #[tracing::instrument(skip(self), err)]
    async fn generate_exam(&self, quiz: &QuizName) -> Result<GeneratedExam, ApiError> {
        let request = PortalRequest::post(GENERATE_EXAM_PATH.iter().copied())
            .with_query("courseName", quiz)
            .with_query("mcqNum", self.question_counts.multiple_choice())
            .with_query("tfNum", self.question_counts.true_false());

        let generated: Vec<GeneratedQuestion> = self.send_json(request).await?;
        GeneratedExam::from_generated(generated)
    }

    #[tracing::instrument(skip(self, submission), fields(exam_id = %submission.exam_id()), err)]
    async fn submit_exam(&self, submission: &ExamSubmission) -> Result<(), ApiError> {
        let request = PortalRequest::post(SUBMIT_EXAM_PATH.iter().copied()).with_json(submission)?;
        self.send(request).await?;
        info!(num_answers = submission.answers().len(), "exam submitted");
        Ok(())
    }

    #[tracing::instrument(skip(self), err)]
    async fn get_results(&self, user: &UserId) -> Result<Vec<ExamResult>, ApiError> {
        let request = PortalRequest::get(student_grades_path(user));
        self.send_json(request).await
    }
}
