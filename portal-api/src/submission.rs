use serde::Serialize;
use serde_with::serde_as;

use crate::types::{ExamId, QuestionId, UserId, UserIdAsWireId};

/// A student's complete answer set for one exam attempt. Built once and never changed.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExamSubmission {
    #[serde(rename = "ex_ID")]
    exam_id: ExamId,
    #[serde(rename = "st_ID")]
    #[serde_as(as = "UserIdAsWireId")]
    student_id: UserId,
    answers: Vec<SubmittedAnswer>,
}

impl ExamSubmission {
    pub fn new(exam_id: ExamId, student_id: UserId, answers: Vec<SubmittedAnswer>) -> Self {
        Self {
            exam_id,
            student_id,
            answers,
        }
    }

    pub fn exam_id(&self) -> ExamId {
        self.exam_id
    }

    pub fn student_id(&self) -> &UserId {
        &self.student_id
    }

    pub fn answers(&self) -> &[SubmittedAnswer] {
        &self.answers
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedAnswer {
    #[serde(rename = "q_ID")]
    question_id: QuestionId,
    #[serde(rename = "st_Answer")]
    answer: String,
}

impl SubmittedAnswer {
    pub fn new(question_id: QuestionId, answer: String) -> Self {
        Self {
            question_id,
            answer,
        }
    }

    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn wire_shape() {
        let submission = ExamSubmission::new(
            ExamId::new(12),
            UserId::from("42"),
            vec![
                SubmittedAnswer::new(QuestionId::new(1), "A library".to_owned()),
                SubmittedAnswer::new(QuestionId::new(2), "True".to_owned()),
            ],
        );

        assert_eq!(
            serde_json::to_value(&submission).unwrap(),
            json!({
                "ex_ID": 12,
                "st_ID": 42,
                "answers": [
                    { "q_ID": 1, "st_Answer": "A library" },
                    { "q_ID": 2, "st_Answer": "True" },
                ],
            })
        );
    }

    #[test]
    fn non_numeric_student_ids_are_sent_as_text() {
        let submission = ExamSubmission::new(ExamId::new(1), UserId::from("s-42"), Vec::new());
        let body = serde_json::to_value(&submission).unwrap();
        assert_eq!(body["st_ID"], json!("s-42"));

        for id in ["007", "+5", "0042"] {
            let submission = ExamSubmission::new(ExamId::new(1), UserId::from(id), Vec::new());
            let body = serde_json::to_value(&submission).unwrap();
            assert_eq!(body["st_ID"], json!(id), "id {id:?}");
        }

        let submission = ExamSubmission::new(ExamId::new(1), UserId::from("0"), Vec::new());
        assert_eq!(serde_json::to_value(&submission).unwrap()["st_ID"], json!(0));
    }
}
