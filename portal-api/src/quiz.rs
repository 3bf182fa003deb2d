use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::QuizId;

/// An exam the user can take. The portal models these as courses: an exam is generated per course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(rename = "crs_ID")]
    id: QuizId,
    #[serde(rename = "crs_Name")]
    name: QuizName,
}

impl Quiz {
    pub fn new(id: QuizId, name: QuizName) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> QuizId {
        self.id
    }

    pub fn name(&self) -> &QuizName {
        &self.name
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizName {
    name: String,
}

impl QuizName {
    pub fn new(name: String) -> Self {
        Self { name }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Case-insensitive substring match. An empty needle matches every name.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}

impl fmt::Display for QuizName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.name.fmt(f)
    }
}

impl From<&str> for QuizName {
    fn from(name: &str) -> Self {
        Self::new(name.to_owned())
    }
}
