// src/services/mod.rs

pub mod analytics;
pub mod quiz_session;
pub mod report_export;
pub mod terminal;
