// src/statistics.rs

//! Dashboard and report metrics derived from collection snapshots.

use std::collections::BTreeMap;

use crate::models::{
    exam_record::{ExamRecord, RecentResult},
    stats::{DashboardStats, DetailedStats},
    test::TestMap,
    user::{User, UserMap},
};

/// Inclusive upper bounds and labels of the score histogram.
const SCORE_BUCKETS: [(f64, &str); 5] = [
    (20.0, "0-20"),
    (40.0, "21-40"),
    (60.0, "41-60"),
    (80.0, "61-80"),
    (f64::INFINITY, "81-100"),
];

const UNKNOWN_USER: &str = "Unknown";
const UNKNOWN_TEST: &str = "Unknown Test";

pub fn dashboard_stats(tests: &TestMap, users: &UserMap, results: &[ExamRecord]) -> DashboardStats {
    let average_score = if results.is_empty() {
        0.0
    } else {
        let sum: f64 = results.iter().map(|r| r.score).sum();
        round_one_decimal(sum / results.len() as f64)
    };

    DashboardStats {
        total_tests: tests.len(),
        active_tests: tests.values().filter(|t| t.active).count(),
        total_users: users.len(),
        total_submissions: results.len(),
        average_score,
    }
}

pub fn detailed_stats(tests: &TestMap, results: &[ExamRecord]) -> DetailedStats {
    let mut score_distribution: BTreeMap<String, usize> = SCORE_BUCKETS
        .iter()
        .map(|(_, label)| (label.to_string(), 0))
        .collect();

    let mut test_popularity: BTreeMap<String, usize> = BTreeMap::new();

    for result in results {
        *score_distribution
            .entry(bucket_label(result.score).to_string())
            .or_default() += 1;

        let title = tests
            .get(&result.test_code)
            .map(|t| t.title.clone())
            .unwrap_or_else(|| format!("Test {}", result.test_code));
        *test_popularity.entry(title).or_default() += 1;
    }

    DetailedStats {
        score_distribution,
        test_popularity,
    }
}

/// The `limit` newest results, newest first, with user and test names attached.
pub fn recent_results(
    results: &[ExamRecord],
    users: &UserMap,
    tests: &TestMap,
    limit: usize,
) -> Vec<RecentResult> {
    newest_first(results.to_vec())
        .into_iter()
        .take(limit)
        .map(|record| {
            let user_name = users
                .get(&User::key(record.user_id))
                .map(|u| u.name.clone())
                .unwrap_or_else(|| UNKNOWN_USER.to_string());
            let test_title = tests
                .get(&record.test_code)
                .map(|t| t.title.clone())
                .unwrap_or_else(|| UNKNOWN_TEST.to_string());
            RecentResult {
                record,
                user_name,
                test_title,
            }
        })
        .collect()
}

/// Sorts by submission time, newest first. Ties keep append order.
pub fn newest_first(mut results: Vec<ExamRecord>) -> Vec<ExamRecord> {
    results.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    results
}

fn bucket_label(score: f64) -> &'static str {
    SCORE_BUCKETS
        .iter()
        .find(|(upper, _)| score <= *upper)
        .map(|(_, label)| *label)
        .unwrap_or("81-100")
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
