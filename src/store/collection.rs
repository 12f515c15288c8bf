// src/store/collection.rs

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::store::backend::DocumentBackend;

/// The four independently persisted datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Tests,
    Users,
    Results,
    Admins,
}

impl CollectionName {
    /// Document name handed to the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Tests => "tests",
            CollectionName::Users => "users",
            CollectionName::Results => "results",
            CollectionName::Admins => "admins",
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named collection and its exclusion scope.
///
/// Every access goes through `lock`, so reads never interleave with a
/// read-modify-write on the same collection. Separate collections have
/// separate locks.
pub struct Collection<T> {
    name: CollectionName,
    backend: Arc<dyn DocumentBackend>,
    lock: Mutex<()>,
    _shape: PhantomData<fn() -> T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned + Default + Send,
{
    pub fn new(name: CollectionName, backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            name,
            backend,
            lock: Mutex::new(()),
            _shape: PhantomData,
        }
    }

    /// Current contents. Missing or corrupt documents read as empty.
    pub async fn load(&self) -> T {
        let _guard = self.lock.lock().await;
        self.read_snapshot().await
    }

    /// Replaces the contents with `snapshot`.
    pub async fn save(&self, snapshot: &T) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        self.write_snapshot(snapshot).await
    }

    /// Load, mutate and save as one critical section.
    ///
    /// If `mutate` fails nothing is written and its error is returned.
    pub async fn update<R, F>(&self, mutate: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut T) -> Result<R, AppError> + Send,
        R: Send,
    {
        let _guard = self.lock.lock().await;
        let mut snapshot = self.read_snapshot().await;
        let output = mutate(&mut snapshot)?;
        self.write_snapshot(&snapshot).await?;
        Ok(output)
    }

    /// Whether the document has ever been written.
    pub async fn exists(&self) -> Result<bool, AppError> {
        let _guard = self.lock.lock().await;
        Ok(self.backend.exists(self.name.as_str()).await?)
    }

    /// Writes the output of `initial` only if the document has never been
    /// written. Returns whether it did.
    pub async fn ensure_exists<F>(&self, initial: F) -> Result<bool, AppError>
    where
        F: FnOnce() -> Result<T, AppError> + Send,
    {
        let _guard = self.lock.lock().await;
        if self.backend.exists(self.name.as_str()).await? {
            return Ok(false);
        }
        let snapshot = initial()?;
        self.write_snapshot(&snapshot).await?;
        Ok(true)
    }

    async fn read_snapshot(&self) -> T {
        let bytes = match self.backend.read(self.name.as_str()).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return T::default(),
            Err(e) => {
                tracing::warn!(
                    "Failed to read collection '{}', treating as empty: {:?}",
                    self.name,
                    e
                );
                return T::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Collection '{}' is corrupt, treating as empty: {}", self.name, e);
                T::default()
            }
        }
    }

    async fn write_snapshot(&self, snapshot: &T) -> Result<(), AppError> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        self.backend
            .write(self.name.as_str(), &bytes)
            .await
            .map_err(|e| {
                tracing::error!("Failed to save collection '{}': {:?}", self.name, e);
                AppError::StorageError(format!("failed to save {}: {}", self.name, e))
            })
    }
}
