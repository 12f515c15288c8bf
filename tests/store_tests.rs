// tests/store_tests.rs

use std::collections::HashSet;
use std::sync::Arc;

use assessment_core::{
    AppError,
    models::{
        admin::{AdminRole, AdminSeed},
        test::{AnswerKey, CreateTestRequest, ExpectedAnswer},
    },
    services::{admins, catalog, stats, users},
    store::{MemoryBackend, Store},
    utils::{code::is_valid_code, hash::verify_password},
};
use tempfile::TempDir;

/// Helper to open a fresh file-backed store in its own temp directory.
/// The directory lives as long as the returned guard.
async fn spawn_store() -> (Store, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = Store::open_dir(dir.path())
        .await
        .expect("Failed to open store");
    store
        .initialize_defaults(&seed())
        .await
        .expect("Failed to initialize collections");
    (store, dir)
}

fn seed() -> AdminSeed {
    AdminSeed {
        username: "root".to_string(),
        password: "password123".to_string(),
    }
}

fn create_request(title: &str) -> CreateTestRequest {
    let mut answer_key = AnswerKey::new();
    answer_key.insert("1".to_string(), ExpectedAnswer::single("A"));
    answer_key.insert("2".to_string(), ExpectedAnswer::split("X", "Y"));
    CreateTestRequest {
        title: title.to_string(),
        description: Some("Warm-up".to_string()),
        answer_key,
        time_limit: Some(20),
        active: None,
        created_by: "root".to_string(),
    }
}

#[tokio::test]
async fn initialize_creates_all_documents_and_seeds_admin() {
    // Arrange
    let (store, dir) = spawn_store().await;

    // Assert
    for name in ["tests", "users", "results", "admins"] {
        assert!(dir.path().join(format!("{}.json", name)).exists(), "{name}.json missing");
    }
    let raw = std::fs::read_to_string(dir.path().join("admins.json")).unwrap();
    assert!(!raw.contains("password123"), "password stored in plaintext");

    let admin = admins::get_admin(&store, "root").await.expect("Admin not seeded");
    assert_eq!(admin.role, AdminRole::SuperAdmin);
    assert!(verify_password("password123", &admin.password_hash).unwrap());
    assert!(admins::get_admin(&store, "nobody").await.is_none());
}

#[tokio::test]
async fn initialize_does_not_overwrite_existing_data() {
    // Arrange
    let (store, _dir) = spawn_store().await;
    catalog::create_test(&store, create_request("Algebra")).await.unwrap();
    let before = admins::get_admin(&store, "root").await.unwrap();

    // Act
    store
        .initialize_defaults(&AdminSeed {
            username: "other".to_string(),
            password: "changed".to_string(),
        })
        .await
        .unwrap();

    // Assert
    assert_eq!(catalog::list_tests(&store).await.len(), 1);
    assert_eq!(admins::get_admin(&store, "root").await.unwrap(), before);
    assert!(admins::get_admin(&store, "other").await.is_none());
}

#[tokio::test]
async fn data_survives_reopening() {
    // Arrange
    let (store, dir) = spawn_store().await;
    let test = catalog::create_test(&store, create_request("Algebra")).await.unwrap();
    users::get_or_create_user(&store, 42, "alice").await.unwrap();
    drop(store);

    // Act
    let reopened = Store::open_dir(dir.path()).await.unwrap();

    // Assert
    assert_eq!(catalog::get_test_by_code(&reopened, &test.code).await, Some(test));
    assert_eq!(users::get_user(&reopened, 42).await.unwrap().name, "alice");
}

#[tokio::test]
async fn corrupt_document_degrades_to_empty() {
    // Arrange
    let (store, dir) = spawn_store().await;
    std::fs::write(dir.path().join("tests.json"), "{ definitely not json").unwrap();

    // Act
    let tests = catalog::list_tests(&store).await;
    let dashboard = stats::dashboard_stats(&store).await;

    // Assert
    assert!(tests.is_empty());
    assert_eq!(dashboard.total_tests, 0);
}

#[tokio::test]
async fn get_or_create_user_creates_then_refreshes() {
    // Arrange
    let store = Store::in_memory();

    // Act
    let first = users::get_or_create_user(&store, 7, "bob").await.unwrap();
    let second = users::get_or_create_user(&store, 7, "robert").await.unwrap();

    // Assert
    assert_eq!(first.tests_taken, 0);
    assert_eq!(first.created_at, first.last_seen);
    assert_eq!(second.name, "bob");
    assert_eq!(second.created_at, first.created_at);
    assert!(second.last_seen >= first.last_seen);
    assert!(users::get_user(&store, 8).await.is_none());
}

#[tokio::test]
async fn create_test_assigns_code_and_counts_questions() {
    // Arrange
    let store = Store::in_memory();

    // Act
    let test = catalog::create_test(&store, create_request("Algebra")).await.unwrap();

    // Assert
    assert!(is_valid_code(&test.code));
    assert_eq!(test.total_questions, 2);
    assert!(test.active);
    assert_eq!(catalog::get_test_by_code(&store, &test.code).await, Some(test));
}

#[tokio::test]
async fn create_test_rejects_missing_fields() {
    // Arrange
    let store = Store::in_memory();
    let mut req = create_request("");
    req.answer_key = AnswerKey::new();

    // Act
    let result = catalog::create_test(&store, req).await;

    // Assert
    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert!(catalog::list_tests(&store).await.is_empty());
}

#[tokio::test]
async fn toggle_flips_once_per_call() {
    // Arrange
    let store = Store::in_memory();
    let test = catalog::create_test(&store, create_request("Algebra")).await.unwrap();

    // Act & Assert
    assert!(!catalog::toggle_test_active(&store, &test.code).await.unwrap());
    assert!(!catalog::get_test_by_code(&store, &test.code).await.unwrap().active);
    assert!(catalog::toggle_test_active(&store, &test.code).await.unwrap());
    assert!(catalog::get_test_by_code(&store, &test.code).await.unwrap().active);
}

#[tokio::test]
async fn toggle_and_delete_unknown_code_are_not_found() {
    let store = Store::in_memory();

    assert!(matches!(
        catalog::toggle_test_active(&store, "000000").await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        catalog::delete_test(&store, "000000").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn delete_removes_test() {
    // Arrange
    let store = Store::in_memory();
    let keep = catalog::create_test(&store, create_request("Keep")).await.unwrap();
    let gone = catalog::create_test(&store, create_request("Gone")).await.unwrap();

    // Act
    catalog::delete_test(&store, &gone.code).await.unwrap();

    // Assert
    assert!(catalog::get_test_by_code(&store, &gone.code).await.is_none());
    let remaining: Vec<String> = catalog::list_tests(&store)
        .await
        .into_iter()
        .map(|t| t.code)
        .collect();
    assert_eq!(remaining, vec![keep.code]);
}

#[tokio::test]
async fn failed_write_is_reported_not_swallowed() {
    // Arrange
    let backend = Arc::new(MemoryBackend::new());
    let store = Store::new(backend.clone());
    backend.set_read_only(true);

    // Act
    let created = catalog::create_test(&store, create_request("Algebra")).await;
    let user = users::get_or_create_user(&store, 1, "alice").await;

    // Assert
    assert!(matches!(created, Err(AppError::StorageError(_))));
    assert!(matches!(user, Err(AppError::StorageError(_))));
    assert!(catalog::list_tests(&store).await.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creations_get_distinct_codes() {
    // Arrange
    let (store, _dir) = spawn_store().await;
    let store = Arc::new(store);
    let n = 40;

    // Act
    let handles: Vec<_> = (0..n)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                catalog::create_test(&store, create_request(&format!("Test {i}")))
                    .await
                    .map(|t| t.code)
            })
        })
        .collect();

    let mut codes = HashSet::new();
    for handle in handles {
        codes.insert(handle.await.unwrap().unwrap());
    }

    // Assert: pairwise distinct and none lost to an overwrite
    assert_eq!(codes.len(), n);
    let stored: HashSet<String> = catalog::list_tests(&store)
        .await
        .into_iter()
        .map(|t| t.code)
        .collect();
    assert_eq!(stored, codes);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_user_contacts_are_not_lost() {
    // Arrange
    let store = Arc::new(Store::in_memory());
    let n = 50;

    // Act
    let handles: Vec<_> = (0..n)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                users::get_or_create_user(&store, i, &format!("user{i}")).await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // Assert
    assert_eq!(stats::dashboard_stats(&store).await.total_users, n as usize);
}
