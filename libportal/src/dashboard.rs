use std::fmt;

use crate::session::UserSession;

/// The instructor landing screen. It only shows who is logged in.
#[derive(Debug, Clone, Copy)]
pub struct Dashboard<'a> {
    session: &'a UserSession,
}

impl<'a> Dashboard<'a> {
    /// `None` unless an instructor is logged in.
    pub fn for_session(session: &'a UserSession) -> Option<Self> {
        session.is_instructor().then_some(Self { session })
    }
}

impl fmt::Display for Dashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Instructor Dashboard")?;
        write!(f, "ID: {}", self.session.id())?;
        if let Some(name) = self.session.name() {
            write!(f, "\nName: {name}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use portal_api::types::{Role, UserId};

    use super::*;
    use crate::session::{MemoryStorage, SessionStore};

    #[test]
    fn shows_id_and_optional_name() {
        let mut store = SessionStore::open(MemoryStorage::new());
        store
            .set_user(UserId::from("7"), Role::Instructor, Some("Mona".to_owned()))
            .unwrap();
        let dashboard = Dashboard::for_session(store.session()).unwrap();
        assert_eq!(dashboard.to_string(), "Instructor Dashboard\nID: 7\nName: Mona");

        store.set_user(UserId::from("7"), Role::Instructor, None).unwrap();
        let dashboard = Dashboard::for_session(store.session()).unwrap();
        assert_eq!(dashboard.to_string(), "Instructor Dashboard\nID: 7");
    }

    #[test]
    fn students_have_no_dashboard() {
        let mut store = SessionStore::open(MemoryStorage::new());
        store.set_user(UserId::from("42"), Role::Student, None).unwrap();
        assert!(Dashboard::for_session(store.session()).is_none());
    }
}
