//! Plain-text versions of each screen.

use std::fmt;

use itertools::Itertools;
use libportal::exam::AnswerSelection;
use libportal::results::{display_percentage, Outcome, ResultsView};
use portal_api::question::Question;
use portal_api::quiz::Quiz;

#[derive(Debug, Clone)]
pub struct QuizList<'a> {
    quizzes: Vec<&'a Quiz>,
}

impl<'a> QuizList<'a> {
    pub fn new(quizzes: Vec<&'a Quiz>) -> Self {
        Self { quizzes }
    }
}

impl fmt::Display for QuizList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.quizzes.is_empty() {
            return write!(f, "No quizzes found.");
        }
        write!(
            f,
            "{}",
            self.quizzes
                .iter()
                .format_with("\n", |quiz, f| f(&format_args!("[{}] {}", quiz.id(), quiz.name())))
        )
    }
}

/// One question with its options numbered from 1. The selected option, if any, is starred.
#[derive(Debug, Clone, Copy)]
pub struct QuestionCard<'a> {
    number: usize,
    question: &'a Question,
    selection: &'a AnswerSelection,
}

impl<'a> QuestionCard<'a> {
    pub fn new(number: usize, question: &'a Question, selection: &'a AnswerSelection) -> Self {
        Self {
            number,
            question,
            selection,
        }
    }
}

impl fmt::Display for QuestionCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}. {}", self.number, self.question.text())?;
        let selected = self.selection.get(self.question.id());
        for (i, option) in self.question.options().iter().enumerate() {
            let marker = if selected == Some(option.as_str()) { '*' } else { ' ' };
            write!(f, "\n  {marker} {}) {option}", i + 1)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ResultCard<'a> {
    outcome: Outcome<'a>,
}

impl<'a> ResultCard<'a> {
    pub fn new(outcome: Outcome<'a>) -> Self {
        Self { outcome }
    }
}

impl fmt::Display for ResultCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let result = self.outcome.result();
        writeln!(f, "{}", result.course_name())?;
        writeln!(f, "  Score       {} / {}", result.student_score(), result.max_score())?;
        writeln!(f, "  Percentage  {}", display_percentage(self.outcome.percentage()))?;
        writeln!(f, "  Status      {}", self.outcome.verdict())?;
        write!(f, "  Date        {}", result.exam_date().unwrap_or("Pending"))
    }
}

/// The whole results screen: totals first, then one card per exam.
#[derive(Debug, Clone, Copy)]
pub struct ResultsReport<'a> {
    view: &'a ResultsView,
}

impl<'a> ResultsReport<'a> {
    pub fn new(view: &'a ResultsView) -> Self {
        Self { view }
    }
}

impl fmt::Display for ResultsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Student Results")?;
        writeln!(f, "Total Exams: {}", self.view.total_exams())?;
        write!(
            f,
            "Average Score: {}",
            display_percentage(self.view.average_percentage())
        )?;
        for outcome in self.view.outcomes() {
            write!(f, "\n\n{}", ResultCard::new(outcome))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use portal_api::grade::ExamResult;
    use portal_api::types::{ExamId, QuestionId, QuizId, Score};

    use super::*;

    #[test]
    fn lists_quizzes_with_ids() {
        let quizzes = [
            Quiz::new(QuizId::new(1), "History".into()),
            Quiz::new(QuizId::new(2), "Math".into()),
        ];
        let list = QuizList::new(quizzes.iter().collect());
        assert_eq!(list.to_string(), "[1] History\n[2] Math");
        assert_eq!(QuizList::new(Vec::new()).to_string(), "No quizzes found.");
    }

    #[test]
    fn question_card_marks_selection() {
        let question = Question::new(
            QuestionId::new(3),
            "Rust has a garbage collector".to_owned(),
            vec!["True".to_owned(), "False".to_owned()],
        );
        let mut selection = AnswerSelection::new();
        selection.select(QuestionId::new(3), "False");

        let card = QuestionCard::new(2, &question, &selection);

        assert_eq!(
            card.to_string(),
            "2. Rust has a garbage collector\n    1) True\n  * 2) False"
        );
    }

    #[test]
    fn results_report() {
        let view = ResultsView::new(vec![
            ExamResult::new(
                ExamId::new(1),
                "History".to_owned(),
                Score::new(20.0),
                Score::new(40.0),
                Some("2024-05-01".to_owned()),
            ),
            ExamResult::new(
                ExamId::new(2),
                "Math".to_owned(),
                Score::new(12.5),
                Score::new(50.0),
                None,
            ),
        ]);

        let report = ResultsReport::new(&view).to_string();

        assert_eq!(
            report,
            "Student Results\n\
             Total Exams: 2\n\
             Average Score: 36%\n\
             \n\
             History\n  \
             Score       20 / 40\n  \
             Percentage  50%\n  \
             Status      Pass\n  \
             Date        2024-05-01\n\
             \n\
             Math\n  \
             Score       12.5 / 50\n  \
             Percentage  25%\n  \
             Status      Fail\n  \
             Date        Pending"
        );
    }
}
