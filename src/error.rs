// src/error.rs

use std::fmt;

/// Crate-wide error enum.
/// Expected absence on lookups is modelled with `Option`; these variants cover
/// the cases a caller has to act on.
#[derive(Debug)]
pub enum AppError {
    // Code or id absent on a mutation or submission
    NotFound(String),

    // Test exists but does not accept submissions
    InactiveTest(String),

    // Malformed or incomplete input
    BadRequest(String),

    // Generated test code already taken; retried internally
    Conflict(String),

    // Durable read/write could not complete
    StorageError(String),

    // Hashing facility failure or exhausted code space
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::InactiveTest(msg) => write!(f, "inactive test: {}", msg),
            AppError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            AppError::Conflict(msg) => write!(f, "conflict: {}", msg),
            AppError::StorageError(msg) => write!(f, "storage error: {}", msg),
            AppError::InternalError(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts I/O failures into `AppError::StorageError`.
/// Allows using `?` on backend reads and writes.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}

/// Snapshot (de)serialization only happens on the storage path.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}
