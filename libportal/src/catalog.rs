use portal_api::quiz::Quiz;
use portal_api::quiz_selector::QuizSelector;
use portal_api::PortalApi;
use tracing::info;

use crate::error::FetchError;
use crate::session::UserSession;

/// The quizzes available to the logged-in user, as of the last fetch.
#[derive(Debug, Clone, Default)]
pub struct QuizCatalog {
    quizzes: Vec<Quiz>,
}

impl QuizCatalog {
    pub fn new(quizzes: Vec<Quiz>) -> Self {
        Self { quizzes }
    }

    pub async fn fetch(api: &impl PortalApi, session: &UserSession) -> Result<Self, FetchError> {
        let user = session.user_id().ok_or(FetchError::NotLoggedIn)?;
        let quizzes = api.get_quizzes(user).await?;
        info!(%user, num_quizzes = quizzes.len(), "fetched quiz catalog");
        Ok(Self::new(quizzes))
    }

    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }

    pub fn filter(&self, query: &str) -> Vec<&Quiz> {
        filter_quizzes(&self.quizzes, query)
    }

    pub fn select(&self, selector: &QuizSelector) -> Option<&Quiz> {
        selector.select_from(&self.quizzes)
    }
}

/// Quizzes whose name contains `query`, ignoring case, in their original order. An empty query
/// keeps everything.
pub fn filter_quizzes<'a>(quizzes: &'a [Quiz], query: &str) -> Vec<&'a Quiz> {
    quizzes
        .iter()
        .filter(|quiz| query.is_empty() || quiz.name().contains_ignore_case(query))
        .collect()
}
