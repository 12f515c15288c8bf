// src/models/mod.rs

pub mod admin;
pub mod exam_record;
pub mod stats;
pub mod user;
