//! The identity of whoever is using the client, kept across restarts.
//!
//! The session is held by a [`SessionStore`] that screens receive explicitly. It only changes
//! through [`SessionStore::set_user`] (or [`SessionStore::log_in`], which calls it) and
//! [`SessionStore::clear_user`], and every change is written through to a [`SessionStorage`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use portal_api::login::{Identity, LoginRequest};
use portal_api::types::{Role, UserId};
use portal_api::PortalApi;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{LoginError, SessionError};

/// Name the session is stored under.
pub const SESSION_KEY: &str = "user";

/// The current user. An empty id means nobody is logged in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    id: UserId,
    #[serde(default)]
    role: Option<Role>,
    #[serde(default)]
    name: Option<String>,
}

impl UserSession {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        !self.id.is_empty()
    }

    /// The user's id, if someone is logged in.
    pub fn user_id(&self) -> Option<&UserId> {
        self.is_logged_in().then_some(&self.id)
    }

    pub fn is_instructor(&self) -> bool {
        self.is_logged_in() && self.role == Some(Role::Instructor)
    }

    // A stored session with no id is indistinguishable from being logged out, whatever else it
    // holds.
    fn normalized(self) -> Self {
        if self.is_logged_in() {
            self
        } else {
            Self::empty()
        }
    }
}

/// Somewhere to keep the serialized session between runs.
pub trait SessionStorage {
    /// Returns `Ok(None)` if nothing has been stored.
    fn load(&self) -> io::Result<Option<String>>;
    fn save(&mut self, contents: &str) -> io::Result<()>;
    fn remove(&mut self) -> io::Result<()>;
}

/// Stores the session as `<dir>/user.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{SESSION_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn save(&mut self, contents: &str) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, contents)
    }

    fn remove(&mut self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    contents: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.contents.clone())
    }

    fn save(&mut self, contents: &str) -> io::Result<()> {
        self.contents = Some(contents.to_owned());
        Ok(())
    }

    fn remove(&mut self) -> io::Result<()> {
        self.contents = None;
        Ok(())
    }
}

#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    session: UserSession,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Restores the stored session. Missing, unreadable or malformed data all give an empty
    /// session, never an error.
    pub fn open(storage: S) -> Self {
        let session = match storage.load() {
            Ok(Some(contents)) => match serde_json::from_str::<UserSession>(&contents) {
                Ok(session) => session.normalized(),
                Err(err) => {
                    warn!(%err, "stored session is malformed, starting logged out");
                    UserSession::empty()
                }
            },
            Ok(None) => {
                debug!("no stored session");
                UserSession::empty()
            }
            Err(err) => {
                warn!(%err, "could not read stored session, starting logged out");
                UserSession::empty()
            }
        };

        Self { storage, session }
    }

    pub fn session(&self) -> &UserSession {
        &self.session
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Replaces the session wholesale and persists it. Nothing changes if persisting fails.
    pub fn set_user(
        &mut self,
        id: UserId,
        role: Role,
        name: Option<String>,
    ) -> Result<&UserSession, SessionError> {
        if id.is_empty() {
            return Err(SessionError::MissingId);
        }

        let session = UserSession {
            id,
            role: Some(role),
            name,
        };
        let contents = serde_json::to_string(&session)?;
        self.storage.save(&contents)?;

        info!(id = %session.id, %role, "session started");
        self.session = session;
        Ok(&self.session)
    }

    /// Logs out: resets to the empty session and forgets the stored one.
    pub fn clear_user(&mut self) -> Result<(), SessionError> {
        self.session = UserSession::empty();
        self.storage.remove()?;
        info!("session cleared");
        Ok(())
    }

    /// Checks the id and role with the portal, then starts a session for whoever it says the
    /// user is.
    pub async fn log_in(
        &mut self,
        api: &impl PortalApi,
        id: UserId,
        role: Role,
    ) -> Result<&UserSession, LoginError> {
        let identity = api.login_check(&LoginRequest::new(id, role)).await?;
        Ok(self.set_identity(identity)?)
    }

    pub fn set_identity(&mut self, identity: Identity) -> Result<&UserSession, SessionError> {
        let (id, role, name) = identity.into_parts();
        self.set_user(id, role, name)
    }
}
