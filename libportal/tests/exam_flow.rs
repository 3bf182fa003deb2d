mod support;

use libportal::error::ExamError;
use libportal::exam::{ExamRoute, ExamSession, ExamState, Recovery, SelectionChange, Stage};
use libportal::session::{MemoryStorage, SessionStore, UserSession};
use portal_api::question::GeneratedExam;
use portal_api::types::{ExamId, QuestionId, QuizId, Role, UserId};
use support::{three_question_exam, FakePortal};

fn logged_in(id: &str) -> UserSession {
    let mut store = SessionStore::open(MemoryStorage::new());
    store
        .set_user(UserId::from(id), Role::Student, None)
        .unwrap()
        .clone()
}

fn route() -> ExamRoute {
    ExamRoute::new("History".into(), QuizId::new(1))
}

async fn ready_exam(portal: &FakePortal) -> ExamSession {
    let mut exam = ExamSession::new(route(), &logged_in("42")).unwrap();
    exam.load(portal).await.unwrap();
    exam
}

fn answer_all(exam: &mut ExamSession) {
    exam.select(QuestionId::new(1), "A library").unwrap();
    exam.select(QuestionId::new(2), "JavaScript XML").unwrap();
    exam.select(QuestionId::new(3), "False").unwrap();
}

#[tokio::test]
async fn loading_generates_questions_for_the_quiz() {
    let portal = FakePortal::with_exam(three_question_exam());

    let exam = ready_exam(&portal).await;

    assert_eq!(exam.state(), &ExamState::Ready);
    assert_eq!(exam.exam_id(), Some(ExamId::new(77)));
    assert_eq!(exam.questions().len(), 3);
    assert_eq!(portal.generated_for.borrow().len(), 1);
    assert_eq!(portal.generated_for.borrow()[0].as_str(), "History");
}

#[tokio::test]
async fn empty_generation_fails_the_exam() {
    let portal = FakePortal::with_exam(GeneratedExam::empty());
    let mut exam = ExamSession::new(route(), &logged_in("42")).unwrap();

    let err = exam.load(&portal).await.unwrap_err();

    assert!(matches!(err, ExamError::NoQuestions));
    let failure = exam.failure().unwrap();
    assert_eq!(failure.stage(), Stage::Loading);
    assert_eq!(failure.recovery(), Recovery::BackToCatalog);
}

#[tokio::test]
async fn generation_errors_fail_with_readable_message() {
    let portal = FakePortal::default();
    let mut exam = ExamSession::new(route(), &logged_in("42")).unwrap();

    let err = exam.load(&portal).await.unwrap_err();

    assert!(matches!(err, ExamError::Api(_)));
    let failure = exam.failure().unwrap();
    assert_eq!(
        failure.message(),
        "Server Error: 500 Internal Server Error - generation failed"
    );
    // A failed load is final.
    assert!(exam.resume().is_err());
    assert!(exam.load(&portal).await.is_err());
}

#[tokio::test]
async fn only_the_latest_selection_is_kept() {
    let portal = FakePortal::with_exam(three_question_exam());
    let mut exam = ready_exam(&portal).await;
    let question = QuestionId::new(1);

    assert_eq!(exam.select(question, "A framework").unwrap(), SelectionChange::Added);
    assert_eq!(exam.select(question, "A library").unwrap(), SelectionChange::Replaced);
    assert_eq!(exam.select(question, "A library").unwrap(), SelectionChange::Unchanged);

    assert_eq!(exam.answered(), 1);
    assert_eq!(exam.selection().get(question), Some("A library"));
}

#[tokio::test]
async fn rejects_answers_the_exam_does_not_offer() {
    let portal = FakePortal::with_exam(three_question_exam());
    let mut exam = ready_exam(&portal).await;

    let err = exam.select(QuestionId::new(9), "A library").unwrap_err();
    assert!(matches!(err, ExamError::UnknownQuestion(_)));

    let err = exam.select(QuestionId::new(3), "Maybe").unwrap_err();
    assert!(matches!(err, ExamError::UnknownOption { .. }));

    assert!(exam.selection().is_empty());
}

#[tokio::test]
async fn submit_is_enabled_only_when_every_question_is_answered() {
    let portal = FakePortal::with_exam(three_question_exam());
    let mut exam = ready_exam(&portal).await;

    assert!(!exam.can_submit());
    exam.select(QuestionId::new(1), "A library").unwrap();
    exam.select(QuestionId::new(2), "JavaScript XML").unwrap();
    // Answering the same question twice doesn't count twice.
    exam.select(QuestionId::new(2), "Java Syntax").unwrap();
    assert!(!exam.can_submit());

    let err = exam.submit(&portal).await.unwrap_err();
    assert!(matches!(err, ExamError::Incomplete { answered: 2, total: 3 }));
    assert!(portal.submissions.borrow().is_empty());

    exam.select(QuestionId::new(3), "False").unwrap();
    assert!(exam.can_submit());
}

#[tokio::test]
async fn submits_answers_in_question_order_once() {
    let portal = FakePortal::with_exam(three_question_exam());
    let mut exam = ready_exam(&portal).await;
    exam.select(QuestionId::new(3), "False").unwrap();
    exam.select(QuestionId::new(1), "A library").unwrap();
    exam.select(QuestionId::new(2), "JavaScript XML").unwrap();

    exam.submit(&portal).await.unwrap();

    assert_eq!(exam.state(), &ExamState::Done);
    let submissions = portal.submissions.borrow();
    assert_eq!(submissions.len(), 1);
    let submission = &submissions[0];
    assert_eq!(submission.exam_id(), ExamId::new(77));
    assert_eq!(submission.student_id().as_str(), "42");
    let answers: Vec<(u64, &str)> = submission
        .answers()
        .iter()
        .map(|answer| (answer.question_id().as_u64(), answer.answer()))
        .collect();
    assert_eq!(
        answers,
        [(1, "A library"), (2, "JavaScript XML"), (3, "False")]
    );
    drop(submissions);

    let err = exam.submit(&portal).await.unwrap_err();
    assert!(matches!(err, ExamError::AlreadySubmitted));
    assert!(!exam.can_submit());
    assert_eq!(portal.submissions.borrow().len(), 1);
}

#[tokio::test]
async fn failed_submit_keeps_answers_for_a_retry() {
    let portal = FakePortal::with_exam(three_question_exam());
    portal.failing_submits.set(1);
    let mut exam = ready_exam(&portal).await;
    answer_all(&mut exam);

    let err = exam.submit(&portal).await.unwrap_err();

    assert!(matches!(err, ExamError::Api(_)));
    let failure = exam.failure().unwrap();
    assert_eq!(failure.stage(), Stage::Submitting);
    assert_eq!(failure.recovery(), Recovery::RetrySubmit);
    assert_eq!(failure.message(), "Failed to submit exam. Please try again.");
    assert_eq!(exam.answered(), 3);
    assert_eq!(exam.selection().get(QuestionId::new(1)), Some("A library"));
    assert_eq!(exam.selection().get(QuestionId::new(2)), Some("JavaScript XML"));
    assert_eq!(exam.selection().get(QuestionId::new(3)), Some("False"));
    // No automatic retry, and no answering while failed.
    assert!(portal.submissions.borrow().is_empty());
    assert!(exam.select(QuestionId::new(1), "A framework").is_err());

    exam.resume().unwrap();
    assert!(exam.can_submit());
    exam.submit(&portal).await.unwrap();

    assert_eq!(exam.state(), &ExamState::Done);
    assert_eq!(portal.submissions.borrow().len(), 1);
}

#[tokio::test]
async fn cannot_answer_before_questions_arrive() {
    let mut exam = ExamSession::new(route(), &logged_in("42")).unwrap();

    let err = exam.select(QuestionId::new(1), "A library").unwrap_err();

    assert!(matches!(err, ExamError::NotReady("loading")));
    assert!(!exam.can_submit());
}
