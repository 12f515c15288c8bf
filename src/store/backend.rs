// src/store/backend.rs

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

/// Durable home of the collection documents.
///
/// Implementations do not lock; exclusion is the job of [`super::Collection`].
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Raw document bytes, or `None` if the document was never written.
    async fn read(&self, name: &str) -> io::Result<Option<Vec<u8>>>;

    /// Replaces the whole document.
    async fn write(&self, name: &str, contents: &[u8]) -> io::Result<()>;

    async fn exists(&self, name: &str) -> io::Result<bool>;
}

/// One `<name>.json` file per collection inside `dir`.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }
}

#[async_trait]
impl DocumentBackend for JsonFileBackend {
    async fn read(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path_for(name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn write(&self, name: &str, contents: &[u8]) -> io::Result<()> {
        let target = self.path_for(name);
        let staging = self.dir.join(format!("{}.json.tmp", name));

        // Readers never observe a half-written document.
        let mut file = tokio::fs::File::create(&staging).await?;
        file.write_all(contents).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&staging, &target).await
    }

    async fn exists(&self, name: &str) -> io::Result<bool> {
        tokio::fs::try_exists(self.path_for(name)).await
    }
}

/// Keeps documents in process memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    documents: Mutex<HashMap<String, Vec<u8>>>,
    read_only: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every write fails with `PermissionDenied`.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Overwrites a document directly, bypassing the store.
    pub fn put_raw(&self, name: &str, contents: &[u8]) {
        self.lock_documents().insert(name.to_string(), contents.to_vec());
    }

    fn lock_documents(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A panic while holding the guard cannot leave a document half-written.
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    async fn read(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.lock_documents().get(name).cloned())
    }

    async fn write(&self, name: &str, contents: &[u8]) -> io::Result<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("backend is read-only, cannot write {}", name),
            ));
        }
        self.put_raw(name, contents);
        Ok(())
    }

    async fn exists(&self, name: &str) -> io::Result<bool> {
        Ok(self.lock_documents().contains_key(name))
    }
}
