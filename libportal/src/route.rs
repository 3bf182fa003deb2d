//! Which screen to show, given what was asked for and who is logged in.

use std::fmt;

use portal_api::types::Role;

use crate::exam::ExamRoute;
use crate::session::UserSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Catalog,
    Exam(ExamRoute),
    Results,
    Dashboard,
}

impl Route {
    /// Where to go right after logging in.
    pub fn landing(session: &UserSession) -> Self {
        match session.role() {
            _ if !session.is_logged_in() => Self::Login,
            Some(Role::Instructor) => Self::Dashboard,
            _ => Self::Catalog,
        }
    }

    /// The screen actually shown for this route. Everything but the login screen needs a
    /// session, and the dashboard is for instructors only.
    pub fn resolve(self, session: &UserSession) -> Self {
        match self {
            Self::Login => Self::Login,
            _ if !session.is_logged_in() => Self::Login,
            Self::Dashboard if !session.is_instructor() => Self::Catalog,
            route => route,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Login => write!(f, "/"),
            Self::Catalog => write!(f, "/home"),
            Self::Exam(exam) => write!(f, "/quiz/{}/{}", exam.name(), exam.id()),
            Self::Results => write!(f, "/results"),
            Self::Dashboard => write!(f, "/dashboard"),
        }
    }
}

#[cfg(test)]
mod tests {
    use portal_api::types::{QuizId, UserId};

    use super::*;
    use crate::session::{MemoryStorage, SessionStore};

    fn session(role: Role) -> UserSession {
        let mut store = SessionStore::open(MemoryStorage::new());
        store.set_user(UserId::from("42"), role, None).unwrap().clone()
    }

    #[test]
    fn logged_out_users_only_see_login() {
        let empty = UserSession::empty();
        assert_eq!(Route::landing(&empty), Route::Login);
        assert_eq!(Route::Results.resolve(&empty), Route::Login);
        assert_eq!(Route::Dashboard.resolve(&empty), Route::Login);
    }

    #[test]
    fn landing_depends_on_role() {
        assert_eq!(Route::landing(&session(Role::Student)), Route::Catalog);
        assert_eq!(Route::landing(&session(Role::Instructor)), Route::Dashboard);
    }

    #[test]
    fn dashboard_is_for_instructors() {
        assert_eq!(Route::Dashboard.resolve(&session(Role::Student)), Route::Catalog);
        assert_eq!(Route::Dashboard.resolve(&session(Role::Instructor)), Route::Dashboard);
    }

    #[test]
    fn exam_paths() {
        let route = Route::Exam(ExamRoute::new("History".into(), QuizId::new(1)));
        assert_eq!(route.resolve(&session(Role::Student)).to_string(), "/quiz/History/1");
    }
}
