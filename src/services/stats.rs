// src/services/stats.rs

//! Reporting entry points. Each collection is read in its own critical
//! section; the figures are not a cross-collection snapshot.

use crate::{
    models::{
        exam_record::RecentResult,
        stats::{DashboardStats, DetailedStats},
    },
    statistics,
    store::Store,
};

pub async fn dashboard_stats(store: &Store) -> DashboardStats {
    let tests = store.tests.load().await;
    let users = store.users.load().await;
    let results = store.results.load().await;
    statistics::dashboard_stats(&tests, &users, &results)
}

pub async fn detailed_stats(store: &Store) -> DetailedStats {
    let results = store.results.load().await;
    let tests = store.tests.load().await;
    statistics::detailed_stats(&tests, &results)
}

/// The `limit` newest results with user names and test titles.
pub async fn recent_results(store: &Store, limit: usize) -> Vec<RecentResult> {
    let results = store.results.load().await;
    let users = store.users.load().await;
    let tests = store.tests.load().await;
    statistics::recent_results(&results, &users, &tests, limit)
}
