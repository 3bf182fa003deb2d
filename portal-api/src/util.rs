use url::Url;

use crate::error::ApiError;
use crate::types::UserId;

pub const LOGIN_CHECK_PATH: &[&str] = &["login", "check"];
pub const GENERATE_EXAM_PATH: &[&str] = &["Exam", "generate"];
pub const SUBMIT_EXAM_PATH: &[&str] = &["ExamSubEP", "submit"];

pub fn student_courses_path(user: &UserId) -> [&str; 3] {
    ["student", user.as_str(), "courses"]
}

pub fn student_grades_path(user: &UserId) -> [&str; 3] {
    ["ExamCorrectionEP", "student-grades", user.as_str()]
}

/// Joins path segments onto the base URL, percent-encoding each segment. Unlike `Url::join`, a
/// base without a trailing slash keeps its last segment. `.` and `..` would be resolved as dot
/// segments instead of encoded, so they are rejected.
pub fn api_url<'a>(base: &Url, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, ApiError> {
    let segments: Vec<&str> = segments.into_iter().collect();
    if let Some(segment) = segments.iter().find(|segment| matches!(**segment, "." | "..")) {
        return Err(ApiError::Client(format!("`{segment}` is not a valid path segment")));
    }

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ApiError::Client(format!("`{base}` cannot be used as a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
