// src/models/admin.rs

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contents of the `admins` collection, keyed by username.
pub type AdminMap = BTreeMap<String, Admin>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Admin,
}

/// Represents one entry of the `admins` collection.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub id: String,

    /// Unique username.
    pub username: String,

    /// Argon2 password hash. Opaque to the store.
    pub password_hash: String,

    pub created_at: DateTime<Utc>,

    pub role: AdminRole,
}

/// Keeps the hash out of logs.
impl fmt::Debug for Admin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Admin")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("role", &self.role)
            .finish()
    }
}

/// Credentials for the super-admin account created on first run.
#[derive(Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
}
