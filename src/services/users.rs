// src/services/users.rs

use chrono::Utc;

use crate::{error::AppError, models::user::User, store::Store};

/// Returns the user with `id`, creating it on first contact.
///
/// An existing user only gets `last_seen` refreshed; the display name given on
/// first contact is kept.
pub async fn get_or_create_user(
    store: &Store,
    id: i64,
    display_name: &str,
) -> Result<User, AppError> {
    let now = Utc::now();

    store
        .users
        .update(|users| {
            let user = users
                .entry(User::key(id))
                .and_modify(|u| {
                    tracing::debug!("Refreshing last_seen for user {}", id);
                    u.last_seen = now;
                })
                .or_insert_with(|| {
                    tracing::info!("Registering user {} ({})", id, display_name);
                    User::new(id, display_name, now)
                });
            Ok(user.clone())
        })
        .await
}

pub async fn get_user(store: &Store, id: i64) -> Option<User> {
    store.users.load().await.remove(&User::key(id))
}

/// Bumps `tests_taken` after a persisted submission.
/// Returns `false` for a user the store has never seen.
pub(crate) async fn record_submission(store: &Store, id: i64) -> Result<bool, AppError> {
    // NotFound aborts the update, so an unknown user leaves the document untouched.
    let outcome = store
        .users
        .update(|users| match users.get_mut(&User::key(id)) {
            Some(user) => {
                user.tests_taken += 1;
                Ok(())
            }
            None => Err(AppError::NotFound(format!("user {}", id))),
        })
        .await;

    match outcome {
        Ok(()) => Ok(true),
        Err(AppError::NotFound(_)) => Ok(false),
        Err(e) => Err(e),
    }
}
