use serde::Deserialize;

use crate::types::{ExamId, Score};

/// A past exam attempt as graded by the portal. Percentages and pass/fail are derived by callers;
/// only the raw scores are reported.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExamResult {
    #[serde(rename = "ex_ID")]
    exam_id: ExamId,
    #[serde(rename = "courseName")]
    course_name: String,
    #[serde(rename = "studentDegree")]
    student_score: Score,
    #[serde(rename = "totalExamDegree")]
    max_score: Score,
    #[serde(rename = "examDate", default)]
    exam_date: Option<String>,
}

impl ExamResult {
    pub fn new(
        exam_id: ExamId,
        course_name: String,
        student_score: Score,
        max_score: Score,
        exam_date: Option<String>,
    ) -> Self {
        Self {
            exam_id,
            course_name,
            student_score,
            max_score,
            exam_date,
        }
    }

    pub fn exam_id(&self) -> ExamId {
        self.exam_id
    }

    pub fn course_name(&self) -> &str {
        &self.course_name
    }

    pub fn student_score(&self) -> Score {
        self.student_score
    }

    pub fn max_score(&self) -> Score {
        self.max_score
    }

    /// `None` while the exam is still waiting to be graded.
    pub fn exam_date(&self) -> Option<&str> {
        self.exam_date.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grades() {
        let results: Vec<ExamResult> = serde_json::from_str(
            r#"[
                { "ex_ID": 3, "courseName": "History", "studentDegree": 20, "totalExamDegree": 40, "examDate": "2024-05-01" },
                { "ex_ID": 4, "courseName": "Math", "studentDegree": 7.5, "totalExamDegree": 10, "examDate": null }
            ]"#,
        )
        .unwrap();

        assert_eq!(results[0].student_score(), Score::new(20.0));
        assert_eq!(results[0].exam_date(), Some("2024-05-01"));
        assert_eq!(results[1].student_score(), Score::new(7.5));
        assert_eq!(results[1].exam_date(), None);
    }
}
