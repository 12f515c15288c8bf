// src/models/user.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contents of the `users` collection, keyed by the stringified user id.
pub type UserMap = BTreeMap<String, User>;

/// A participant known to the web app or the bot.
/// Created on first contact and never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Numeric identity supplied by the front-end.
    pub id: i64,

    /// Display name used in reports.
    pub name: String,

    pub username: String,

    pub created_at: DateTime<Utc>,

    /// Refreshed on every contact.
    pub last_seen: DateTime<Utc>,

    /// Number of persisted submissions.
    #[serde(default)]
    pub tests_taken: u32,
}

impl User {
    /// A first-contact record: both timestamps set to `now`, no submissions yet.
    pub fn new(id: i64, display_name: &str, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: display_name.to_string(),
            username: display_name.to_string(),
            created_at: now,
            last_seen: now,
            tests_taken: 0,
        }
    }

    /// Key under which the user is stored.
    pub fn key(id: i64) -> String {
        id.to_string()
    }
}
