use std::fmt;

use portal_api::grade::ExamResult;
use portal_api::types::Score;
use portal_api::PortalApi;
use tracing::info;

use crate::error::FetchError;
use crate::session::UserSession;

/// Lowest percentage that still passes.
pub const PASS_PERCENTAGE: f64 = 50.0;

/// `student / max × 100`, or `None` when there is nothing to divide by.
pub fn percentage(student: Score, max: Score) -> Option<f64> {
    let max = max.as_f64();
    (max != 0.0).then(|| student.as_f64() / max * 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
    /// The exam is worth zero points, so it can be neither passed nor failed.
    Ungraded,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
            Self::Ungraded => "-",
        })
    }
}

/// One past exam with the numbers derived from it.
#[derive(Debug, Clone, Copy)]
pub struct Outcome<'a> {
    result: &'a ExamResult,
    percentage: Option<f64>,
}

impl<'a> Outcome<'a> {
    pub fn new(result: &'a ExamResult) -> Self {
        Self {
            result,
            percentage: percentage(result.student_score(), result.max_score()),
        }
    }

    pub fn result(&self) -> &'a ExamResult {
        self.result
    }

    pub fn percentage(&self) -> Option<f64> {
        self.percentage
    }

    pub fn verdict(&self) -> Verdict {
        match self.percentage {
            Some(percentage) if percentage >= PASS_PERCENTAGE => Verdict::Pass,
            Some(_) => Verdict::Fail,
            None => Verdict::Ungraded,
        }
    }
}

/// A user's exam history, fetched once per visit.
#[derive(Debug, Clone, Default)]
pub struct ResultsView {
    results: Vec<ExamResult>,
}

impl ResultsView {
    pub fn new(results: Vec<ExamResult>) -> Self {
        Self { results }
    }

    pub async fn fetch(api: &impl PortalApi, session: &UserSession) -> Result<Self, FetchError> {
        let user = session.user_id().ok_or(FetchError::NotLoggedIn)?;
        let results = api.get_results(user).await?;
        info!(%user, num_results = results.len(), "fetched results");
        Ok(Self::new(results))
    }

    pub fn results(&self) -> &[ExamResult] {
        &self.results
    }

    pub fn total_exams(&self) -> usize {
        self.results.len()
    }

    pub fn outcomes(&self) -> impl Iterator<Item = Outcome<'_>> + '_ {
        self.results.iter().map(Outcome::new)
    }

    /// Total points earned over total points available, across every exam. Not the mean of the
    /// per-exam percentages.
    pub fn average_percentage(&self) -> Option<f64> {
        let earned: Score = self.results.iter().map(ExamResult::student_score).sum();
        let available: Score = self.results.iter().map(ExamResult::max_score).sum();
        percentage(earned, available)
    }
}

/// Formats a percentage rounded to a whole number, halves away from zero. Missing percentages
/// show as `-`.
pub fn display_percentage(percentage: Option<f64>) -> String {
    match percentage {
        Some(percentage) => format!("{:.0}%", percentage.round()),
        None => "-".to_owned(),
    }
}
