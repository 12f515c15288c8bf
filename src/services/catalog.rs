// src/services/catalog.rs

use chrono::Utc;
use validator::Validate;

use crate::{
    error::AppError,
    models::test::{CreateTestRequest, Test},
    store::Store,
    utils::code::{insert_with_fresh_code, is_valid_code},
};

/// Creates a test under a freshly generated unique code.
///
/// Code generation and insertion share one critical section on `tests`, so
/// concurrent creations can never be handed the same code.
pub async fn create_test(store: &Store, payload: CreateTestRequest) -> Result<Test, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let now = Utc::now();

    let test = store
        .tests
        .update(move |tests| {
            let mut rng = rand::thread_rng();
            let code = insert_with_fresh_code(tests, &mut rng, |code| {
                payload.clone().into_test(code, now)
            })?;
            Ok(tests[&code].clone())
        })
        .await?;

    tracing::info!(
        "Created test {} '{}' with {} questions",
        test.code,
        test.title,
        test.total_questions
    );
    Ok(test)
}

pub async fn get_test_by_code(store: &Store, code: &str) -> Option<Test> {
    if !is_valid_code(code) {
        return None;
    }
    store.tests.load().await.remove(code)
}

/// The test behind `code`, provided it currently accepts submissions.
pub async fn get_active_test(store: &Store, code: &str) -> Result<Test, AppError> {
    let test = get_test_by_code(store, code)
        .await
        .ok_or(AppError::NotFound(format!("Test {} not found", code)))?;

    if !test.active {
        return Err(AppError::InactiveTest(format!("Test {} is not active", code)));
    }
    Ok(test)
}

/// All tests, oldest first.
pub async fn list_tests(store: &Store) -> Vec<Test> {
    let mut tests: Vec<Test> = store.tests.load().await.into_values().collect();
    tests.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    tests
}

/// Flips the active flag. Returns the new value.
pub async fn toggle_test_active(store: &Store, code: &str) -> Result<bool, AppError> {
    let active = store
        .tests
        .update(|tests| {
            let test = tests
                .get_mut(code)
                .ok_or(AppError::NotFound(format!("Test {} not found", code)))?;
            test.active = !test.active;
            Ok(test.active)
        })
        .await?;

    tracing::info!("Test {} is now {}", code, if active { "active" } else { "inactive" });
    Ok(active)
}

/// Removes a test. Results that reference it are kept.
pub async fn delete_test(store: &Store, code: &str) -> Result<(), AppError> {
    store
        .tests
        .update(|tests| {
            tests
                .remove(code)
                .map(|_| ())
                .ok_or(AppError::NotFound(format!("Test {} not found", code)))
        })
        .await?;

    tracing::info!("Deleted test {}", code);
    Ok(())
}
