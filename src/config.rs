// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Default destination of the per-user CSV report.
pub const DEFAULT_REPORT_PATH: &str = "user_reports.csv";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub server_port: u16,
    pub report_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let server_port = env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let report_path = env::var("REPORT_PATH")
            .unwrap_or_else(|_| DEFAULT_REPORT_PATH.to_string());

        Self {
            database_url,
            rust_log,
            server_port,
            report_path,
        }
    }
}
