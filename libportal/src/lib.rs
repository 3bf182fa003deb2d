//! Client-side screens of the exam portal: who is logged in, which quizzes they can take, taking
//! one, and looking back at past results.
//!
//! Nothing here grades anything. Scores come from the portal; this crate only keeps track of
//! what the user is doing and derives display numbers from what the portal reports.

pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod exam;
pub mod results;
pub mod route;
pub mod session;
