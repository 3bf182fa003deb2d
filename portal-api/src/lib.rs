pub mod api;
pub mod client;
pub mod error;
pub mod grade;
pub mod login;
pub mod question;
pub mod quiz;
pub mod quiz_selector;
pub mod services;
pub mod submission;
pub mod types;

mod util;

pub use api::PortalApi;
pub use client::{Client, ClientConfig, QuestionCounts};
pub use error::{ApiError, ApiErrorKind};
