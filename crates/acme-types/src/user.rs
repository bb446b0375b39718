//! User types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Parse a user ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for UserId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Sample user with a plaintext password, hashed before it reaches storage
#[derive(Clone, PartialEq, Eq)]
pub struct SeedUser {
    /// User ID
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Login email (unique)
    pub email: String,
    /// Plaintext password
    pub password: String,
}

impl std::fmt::Debug for SeedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedUser")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// User ready for storage: the password has already been hashed
#[derive(Clone, PartialEq, Eq)]
pub struct HashedUser {
    /// User ID
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Login email (unique)
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
}

impl std::fmt::Debug for HashedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashedUser")
            .field("id", &self.id)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
