//! Taking one exam: load a generated question set, collect one answer per question, submit once.
//!
//! ```text
//! Loading ──► Ready ──► Submitting ──► Done
//!    │          ▲            │
//!    ▼          │ resume     ▼
//!  Failed     Failed ◄───────┘
//! ```
//!
//! A failed load is final for the attempt. A failed submit keeps every question and answer, and
//! [`ExamSession::resume`] puts the exam back in `Ready` so the user can submit again.

use std::collections::HashMap;
use std::fmt;

use portal_api::question::Question;
use portal_api::quiz::{Quiz, QuizName};
use portal_api::submission::{ExamSubmission, SubmittedAnswer};
use portal_api::types::{ExamId, QuestionId, QuizId, UserId};
use portal_api::{ApiError, PortalApi};
use tracing::{info, warn};

use crate::error::ExamError;
use crate::session::UserSession;

/// The quiz an exam is for, as it appears in the exam route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamRoute {
    name: QuizName,
    id: QuizId,
}

impl ExamRoute {
    pub fn new(name: QuizName, id: QuizId) -> Self {
        Self { name, id }
    }

    pub fn name(&self) -> &QuizName {
        &self.name
    }

    pub fn id(&self) -> QuizId {
        self.id
    }
}

impl From<&Quiz> for ExamRoute {
    fn from(quiz: &Quiz) -> Self {
        Self::new(quiz.name().clone(), quiz.id())
    }
}

/// What the user has picked so far, at most one option per question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSelection {
    answers: HashMap<QuestionId, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Replaced,
    Unchanged,
}

impl AnswerSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `answer` for `question`, replacing any earlier answer.
    pub fn select(&mut self, question: QuestionId, answer: &str) -> SelectionChange {
        match self.answers.get_mut(&question) {
            Some(current) if current == answer => SelectionChange::Unchanged,
            Some(current) => {
                answer.clone_into(current);
                SelectionChange::Replaced
            }
            None => {
                self.answers.insert(question, answer.to_owned());
                SelectionChange::Added
            }
        }
    }

    pub fn get(&self, question: QuestionId) -> Option<&str> {
        self.answers.get(&question).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loading,
    Submitting,
}

/// Where the user can go from a failed exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    BackToCatalog,
    RetrySubmit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    stage: Stage,
    message: String,
}

impl Failure {
    fn new(stage: Stage, message: String) -> Self {
        Self { stage, message }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Human-readable explanation, fit to show as is.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn recovery(&self) -> Recovery {
        match self.stage {
            Stage::Loading => Recovery::BackToCatalog,
            Stage::Submitting => Recovery::RetrySubmit,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExamState {
    Loading,
    Ready,
    Submitting,
    Done,
    Failed(Failure),
}

impl ExamState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Submitting => "submitting",
            Self::Done => "done",
            Self::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExamSession {
    route: ExamRoute,
    student: UserId,
    state: ExamState,
    exam_id: Option<ExamId>,
    questions: Vec<Question>,
    selection: AnswerSelection,
}

impl ExamSession {
    /// Starts an attempt in `Loading`. Nothing is requested until [`ExamSession::load`].
    pub fn new(route: ExamRoute, session: &UserSession) -> Result<Self, ExamError> {
        let student = session.user_id().ok_or(ExamError::NotLoggedIn)?.clone();
        Ok(Self {
            route,
            student,
            state: ExamState::Loading,
            exam_id: None,
            questions: Vec::new(),
            selection: AnswerSelection::new(),
        })
    }

    /// Requests a question set. Generating nothing counts as a failure: there is no way to tell
    /// an intentionally empty quiz from a generation that silently went wrong.
    #[tracing::instrument(skip(self, api), fields(quiz = %self.route.name))]
    pub async fn load(&mut self, api: &impl PortalApi) -> Result<(), ExamError> {
        if self.state != ExamState::Loading {
            return Err(ExamError::NotReady(self.state.name()));
        }

        let generated = match api.generate_exam(&self.route.name).await {
            Ok(generated) => generated,
            Err(err) => {
                self.fail(Stage::Loading, load_failure_message(&err));
                return Err(err.into());
            }
        };

        match generated.into_parts() {
            (Some(exam_id), questions) if !questions.is_empty() => {
                info!(%exam_id, num_questions = questions.len(), "exam ready");
                self.exam_id = Some(exam_id);
                self.questions = questions;
                self.state = ExamState::Ready;
                Ok(())
            }
            _ => {
                self.fail(Stage::Loading, ExamError::NoQuestions.to_string());
                Err(ExamError::NoQuestions)
            }
        }
    }

    /// Picks `option` for `question`. Picking again replaces the earlier choice; picking the same
    /// option again changes nothing.
    pub fn select(&mut self, question: QuestionId, option: &str) -> Result<SelectionChange, ExamError> {
        if self.state != ExamState::Ready {
            return Err(ExamError::NotReady(self.state.name()));
        }

        let offered = self
            .question(question)
            .ok_or(ExamError::UnknownQuestion(question))?;
        if !offered.has_option(option) {
            return Err(ExamError::UnknownOption {
                question,
                option: option.to_owned(),
            });
        }

        Ok(self.selection.select(question, option))
    }

    pub fn answered(&self) -> usize {
        self.selection.len()
    }

    /// Submitting is only allowed once every question has an answer.
    pub fn can_submit(&self) -> bool {
        self.state == ExamState::Ready && self.is_complete()
    }

    fn is_complete(&self) -> bool {
        self.selection.len() == self.questions.len()
    }

    /// Builds the answer set in question order and sends it, once.
    #[tracing::instrument(skip(self, api), fields(quiz = %self.route.name))]
    pub async fn submit(&mut self, api: &impl PortalApi) -> Result<(), ExamError> {
        match &self.state {
            ExamState::Ready => {}
            ExamState::Submitting | ExamState::Done => return Err(ExamError::AlreadySubmitted),
            state => return Err(ExamError::NotReady(state.name())),
        }
        if !self.is_complete() {
            return Err(ExamError::Incomplete {
                answered: self.selection.len(),
                total: self.questions.len(),
            });
        }

        let submission = self.submission()?;
        self.state = ExamState::Submitting;

        match api.submit_exam(&submission).await {
            Ok(()) => {
                info!(exam_id = %submission.exam_id(), "exam done");
                self.state = ExamState::Done;
                Ok(())
            }
            Err(err) => {
                warn!(%err, "submission failed, answers kept");
                self.fail(
                    Stage::Submitting,
                    "Failed to submit exam. Please try again.".to_owned(),
                );
                Err(err.into())
            }
        }
    }

    /// After a failed submit, goes back to `Ready` with every answer intact.
    pub fn resume(&mut self) -> Result<(), ExamError> {
        match &self.state {
            ExamState::Failed(failure) if failure.stage() == Stage::Submitting => {
                self.state = ExamState::Ready;
                Ok(())
            }
            state => Err(ExamError::NotReady(state.name())),
        }
    }

    fn submission(&self) -> Result<ExamSubmission, ExamError> {
        let exam_id = self.exam_id.ok_or(ExamError::NotReady(self.state.name()))?;
        let answers = self
            .questions
            .iter()
            .filter_map(|question| {
                let answer = self.selection.get(question.id())?;
                Some(SubmittedAnswer::new(question.id(), answer.to_owned()))
            })
            .collect();

        Ok(ExamSubmission::new(exam_id, self.student.clone(), answers))
    }

    fn fail(&mut self, stage: Stage, message: String) {
        warn!(?stage, %message, "exam failed");
        self.state = ExamState::Failed(Failure::new(stage, message));
    }

    pub fn route(&self) -> &ExamRoute {
        &self.route
    }

    pub fn state(&self) -> &ExamState {
        &self.state
    }

    pub fn exam_id(&self) -> Option<ExamId> {
        self.exam_id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id() == id)
    }

    pub fn selection(&self) -> &AnswerSelection {
        &self.selection
    }

    pub fn failure(&self) -> Option<&Failure> {
        match &self.state {
            ExamState::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

fn load_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { status, message } => format!("Server Error: {status} - {message}"),
        ApiError::Connectivity(_) => {
            "Network Error: No response from server. Check if API is running.".to_owned()
        }
        err => err.to_string(),
    }
}
