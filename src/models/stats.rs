// src/models/stats.rs

use std::collections::BTreeMap;

use serde::Serialize;

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_tests: usize,
    pub active_tests: usize,
    pub total_users: usize,
    pub total_submissions: usize,
    /// Mean score rounded to one decimal, 0 without submissions.
    pub average_score: f64,
}

/// Chart data for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedStats {
    /// Bucket label (`"0-20"` .. `"81-100"`) to number of results.
    pub score_distribution: BTreeMap<String, usize>,
    /// Test title to number of results referencing it.
    pub test_popularity: BTreeMap<String, usize>,
}
