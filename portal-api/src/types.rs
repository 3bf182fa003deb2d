//! Identifiers and small value types shared by the request and response shapes of the portal API.
//! Most of these don't "do" much, but keeping them distinct stops a quiz id from being passed
//! where an exam id is expected.

use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::serde_conv;
use thiserror::Error;

/// Opaque user identifier. The portal hands these out as either JSON strings or numbers, so both
/// are accepted; locally the id is always kept as text.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "WireId", into = "String")]
pub struct UserId {
    id: String,
}

impl UserId {
    pub fn new(id: String) -> Self {
        Self { id }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.id.fmt(f)
    }
}

impl From<UserId> for String {
    fn from(user_id: UserId) -> Self {
        user_id.id
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id.to_owned())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum WireId {
    Number(u64),
    Text(String),
}

impl From<WireId> for UserId {
    fn from(value: WireId) -> Self {
        match value {
            WireId::Number(number) => Self::new(number.to_string()),
            WireId::Text(text) => Self::new(text),
        }
    }
}

impl From<&UserId> for WireId {
    fn from(user_id: &UserId) -> Self {
        // Only ids that print back unchanged go out as numbers, so "007" stays "007".
        match user_id.id.parse::<u64>() {
            Ok(number) if number.to_string() == user_id.id => WireId::Number(number),
            _ => WireId::Text(user_id.id.clone()),
        }
    }
}

// The submit endpoint expects a numeric student id, but ids that aren't numbers are still sent
// through unchanged rather than rejected client side.
serde_conv! {
    pub(crate) UserIdAsWireId,
    UserId,
    |user_id: &UserId| WireId::from(user_id),
    |value: WireId| -> Result<_, std::convert::Infallible> { Ok(UserId::from(value)) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Instructor => "instructor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown role `{0}`, expected `student` or `instructor`")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "instructor" => Ok(Self::Instructor),
            _ => Err(ParseRoleError(s.to_owned())),
        }
    }
}

macro_rules! int_ids {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name {
                id: u64,
            }

            impl $name {
                pub fn new(id: u64) -> Self {
                    Self { id }
                }

                pub fn as_u64(self) -> u64 {
                    self.id
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    self.id.fmt(f)
                }
            }
        )+
    };
}

int_ids! {
    /// Course identifier. The portal calls quizzes "courses" on the wire.
    QuizId,
    QuestionId,
    /// Server-assigned identifier of a single exam attempt.
    ExamId,
}

/// A number of points, either earned by a student or available on an exam.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score {
    points: f64,
}

impl Score {
    pub fn new(points: f64) -> Self {
        Self { points }
    }

    pub fn as_f64(self) -> f64 {
        self.points
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.points.fmt(f)
    }
}

impl Sum for Score {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self::new(iter.map(Score::as_f64).sum())
    }
}

impl<'a> Sum<&'a Score> for Score {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
