// src/services/admins.rs

use crate::{models::admin::Admin, store::Store};

/// Looks up an admin account. Checking the password against
/// `password_hash` is left to the login layer (see `utils::hash`).
pub async fn get_admin(store: &Store, username: &str) -> Option<Admin> {
    store.admins.load().await.remove(username)
}
