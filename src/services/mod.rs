// src/services/mod.rs

pub mod admins;
pub mod catalog;
pub mod results;
pub mod stats;
pub mod users;
