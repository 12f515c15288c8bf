// src/store/mod.rs

pub mod backend;
pub mod collection;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;

use crate::error::AppError;
use crate::models::{
    admin::{Admin, AdminMap, AdminRole, AdminSeed},
    exam_record::ExamRecord,
    test::TestMap,
    user::UserMap,
};
use crate::utils::hash::hash_password;

pub use backend::{DocumentBackend, JsonFileBackend, MemoryBackend};
pub use collection::{Collection, CollectionName};

/// Handle to the four collections.
///
/// Services take `&Store`; share it between tasks with `Arc<Store>`.
pub struct Store {
    pub tests: Collection<TestMap>,
    pub users: Collection<UserMap>,
    pub results: Collection<Vec<ExamRecord>>,
    pub admins: Collection<AdminMap>,
}

impl Store {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            tests: Collection::new(CollectionName::Tests, backend.clone()),
            users: Collection::new(CollectionName::Users, backend.clone()),
            results: Collection::new(CollectionName::Results, backend.clone()),
            admins: Collection::new(CollectionName::Admins, backend),
        }
    }

    /// File-backed store rooted at `dir`, created if missing.
    pub async fn open_dir(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        tracing::debug!("Opening collection store at {}", dir.display());
        Ok(Self::new(Arc::new(JsonFileBackend::new(dir))))
    }

    /// Store over a fresh [`MemoryBackend`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// First-run setup: writes every collection that does not exist yet.
    ///
    /// Data collections start empty; `admins` starts with one super-admin whose
    /// password is hashed before it reaches storage.
    pub async fn initialize_defaults(&self, seed: &AdminSeed) -> Result<(), AppError> {
        self.tests.ensure_exists(|| Ok(TestMap::new())).await?;
        self.users.ensure_exists(|| Ok(UserMap::new())).await?;
        self.results.ensure_exists(|| Ok(Vec::new())).await?;

        if self.admins.exists().await? {
            return Ok(());
        }

        // Hash on the blocking pool, outside the admins lock.
        let password = seed.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::InternalError(format!("hashing task failed: {}", e)))??;

        let admin = Admin {
            id: seed.username.clone(),
            username: seed.username.clone(),
            password_hash,
            created_at: Utc::now(),
            role: AdminRole::SuperAdmin,
        };
        let mut admins = AdminMap::new();
        admins.insert(admin.username.clone(), admin);

        // Another initializer may have won the race since the check above.
        if self.admins.ensure_exists(|| Ok(admins)).await? {
            tracing::info!("Seeded super admin '{}'", seed.username);
        }

        Ok(())
    }
}
