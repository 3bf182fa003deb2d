use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Role, UserId};

/// Body of a login check. There is no password: the portal only confirms the id exists with the
/// given role.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    id: UserId,
    role: Role,
}

impl LoginRequest {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("id", &self.id.as_str())
            .field("role", &self.role)
            .finish()
    }
}

/// Who the portal says the user is after a successful login check.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Identity {
    id: UserId,
    role: Role,
    #[serde(default)]
    name: Option<String>,
}

impl Identity {
    pub fn new(id: UserId, role: Role, name: Option<String>) -> Self {
        Self { id, role, name }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn into_parts(self) -> (UserId, Role, Option<String>) {
        (self.id, self.role, self.name)
    }
}
