use crate::quiz::Quiz;

/// Picks a quiz out of a listing from whatever the user typed: an id, an exact name, or a name
/// differing only in case, tried in that order.
#[derive(Debug, Clone)]
pub struct QuizSelector {
    selector: String,
}

impl QuizSelector {
    pub fn new(selector: String) -> Self {
        Self { selector }
    }

    pub fn as_str(&self) -> &str {
        &self.selector
    }

    pub fn select_from<'a>(&self, quizzes: &'a [Quiz]) -> Option<&'a Quiz> {
        self.select_as_id(quizzes)
            .or_else(|| self.select_as_name(quizzes))
            .or_else(|| self.select_as_name_ignore_case(quizzes))
    }

    fn select_as_id<'a>(&self, quizzes: &'a [Quiz]) -> Option<&'a Quiz> {
        let id = self.selector.trim().parse::<u64>().ok()?;
        quizzes.iter().find(|quiz| quiz.id().as_u64() == id)
    }

    fn select_as_name<'a>(&self, quizzes: &'a [Quiz]) -> Option<&'a Quiz> {
        quizzes
            .iter()
            .find(|quiz| quiz.name().as_str() == self.selector)
    }

    fn select_as_name_ignore_case<'a>(&self, quizzes: &'a [Quiz]) -> Option<&'a Quiz> {
        quizzes
            .iter()
            .find(|quiz| quiz.name().as_str().eq_ignore_ascii_case(self.selector.trim()))
    }
}
