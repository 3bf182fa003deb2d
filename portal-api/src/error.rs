pub use reqwest::StatusCode;
use thiserror::Error;

/// Every way a call to the portal can fail, normalized so callers never have to look at
/// `reqwest` internals to decide what happened.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The portal answered, but with a non-success status.
    #[error("portal responded with {status}: {message}")]
    Status { status: StatusCode, message: String },
    /// The request went out but no response came back (refused connection, timeout, dropped
    /// connection mid-body).
    #[error("no response from portal")]
    Connectivity(#[source] reqwest::Error),
    /// The request could not be built in the first place.
    #[error("could not build request: {0}")]
    Client(String),
    /// The portal answered successfully, but not with anything this client understands.
    #[error("malformed response from portal: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Status,
    Connectivity,
    Client,
    Malformed,
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::Status { .. } => ApiErrorKind::Status,
            Self::Connectivity(_) => ApiErrorKind::Connectivity,
            Self::Client(_) => ApiErrorKind::Client,
            Self::Malformed(_) => ApiErrorKind::Malformed,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn status_with_body(status: StatusCode, body: &str) -> Self {
        let message = match body.trim() {
            "" => status.canonical_reason().unwrap_or("unknown status").to_owned(),
            body => body.to_owned(),
        };
        Self::Status { status, message }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Client(err.to_string())
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                status,
                message: err.to_string(),
            }
        } else {
            Self::Connectivity(err)
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        Self::Client(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
