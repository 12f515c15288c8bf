// src/config.rs

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

/// Number of entries shown in the dashboard's recent results view.
pub const DEFAULT_RECENT_RESULTS: usize = 10;

/// Length of a generated test code.
pub const TEST_CODE_LENGTH: usize = 6;

const DEFAULT_ADMIN_PASSWORD: &str = "admin";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_dir: String,
    pub rust_log: String,
    pub admin_username: String,
    pub admin_password: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let admin_username = env::var("ADMIN_USERNAME")
            .unwrap_or_else(|_| "admin".to_string());

        let admin_password = env::var("ADMIN_PASSWORD")
            .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string());

        Self {
            data_dir,
            log_dir,
            rust_log,
            admin_username,
            admin_password,
        }
    }

    /// True when the seeded super-admin would get the built-in password.
    pub fn uses_default_admin_password(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }
}
