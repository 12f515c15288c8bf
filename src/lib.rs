// src/lib.rs

pub mod config;
pub mod error;
pub mod models;
pub mod scoring;
pub mod services;
pub mod statistics;
pub mod store;
pub mod utils;

// Re-export specific items for convenience
pub use error::AppError;
pub use store::Store;
