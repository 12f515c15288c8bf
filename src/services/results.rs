// src/services/results.rs

use chrono::Utc;
use validator::Validate;

use crate::{
    error::AppError,
    models::exam_record::{ExamRecord, SubmitOutcome, SubmitResultRequest},
    scoring,
    services::{catalog::get_active_test, users::record_submission},
    statistics::newest_first,
    store::Store,
};

/// Scores a submission and persists it.
///
/// * Rejects malformed payloads, unknown codes and inactive tests before
///   anything is scored or written.
/// * Appends the result, then bumps the user's counter in a second critical
///   section. A failed counter write is logged and the outcome still returned,
///   leaving the counter one behind.
pub async fn submit_result(
    store: &Store,
    req: SubmitResultRequest,
) -> Result<SubmitOutcome, AppError> {
    if let Err(validation_errors) = req.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let test = get_active_test(store, &req.test_code).await?;
    let score = scoring::score(&test, &req.answers);

    let user_id = req.user_id;
    let submitted_at = Utc::now();
    let base_id = format!("{}_{}_{}", user_id, req.test_code, submitted_at.timestamp());

    let result_id = store
        .results
        .update(move |results| {
            let id = unique_result_id(results, &base_id);
            results.push(ExamRecord {
                id: id.clone(),
                user_id,
                test_code: req.test_code,
                answers: req.answers,
                score,
                submitted_at,
            });
            Ok(id)
        })
        .await?;

    tracing::info!(
        "User {} scored {:.1} on test {} ({})",
        user_id,
        score,
        test.code,
        result_id
    );

    // The result is already durable; counter failures are only logged.
    match record_submission(store, user_id).await {
        Ok(true) => {}
        Ok(false) => tracing::warn!("Result {} stored for unknown user {}", result_id, user_id),
        Err(e) => tracing::error!(
            "Result {} stored but tests_taken for user {} not updated: {}",
            result_id,
            user_id,
            e
        ),
    }

    Ok(SubmitOutcome { score, result_id })
}

/// A user's results, newest first, optionally capped at `limit`.
/// A limit of zero means no cap.
pub async fn list_results_by_user(
    store: &Store,
    user_id: i64,
    limit: Option<usize>,
) -> Vec<ExamRecord> {
    let results = store.results.load().await;
    let mine = newest_first(results.into_iter().filter(|r| r.user_id == user_id).collect());
    match limit {
        Some(limit) if limit > 0 => mine.into_iter().take(limit).collect(),
        _ => mine,
    }
}

/// Results for one test in submission order.
pub async fn list_results_by_test(store: &Store, test_code: &str) -> Vec<ExamRecord> {
    store
        .results
        .load()
        .await
        .into_iter()
        .filter(|r| r.test_code == test_code)
        .collect()
}

/// Every result, newest first.
pub async fn list_all_results(store: &Store) -> Vec<ExamRecord> {
    newest_first(store.results.load().await)
}

/// `base` if unused, otherwise the first free `base_n`.
fn unique_result_id(results: &[ExamRecord], base: &str) -> String {
    let taken = |candidate: &str| results.iter().any(|r| r.id == candidate);
    if !taken(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{}_{}", base, n))
        .find(|candidate| !taken(candidate.as_str()))
        .unwrap_or_else(|| base.to_string())
}
