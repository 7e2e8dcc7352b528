// src/bootstrap.rs
//
// Startup steps shared by the server and the command-line binaries.

use std::{path::Path, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, fmt, fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::Config;

const CONNECT_RETRIES: u32 = 5;
const LOG_DIR: &str = "logs";

/// Logs to `console` and to a daily-rolling file under `logs/`.
///
/// The server passes `std::io::stdout`; the command-line binaries pass
/// `std::io::stderr` so stdout stays free for interactive use. Keep the
/// returned guard alive for as long as file logging should flush.
pub fn init_tracing<W>(config: &Config, file_name: &str, console: W) -> WorkerGuard
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (subscriber, guard) = build_subscriber(Path::new(LOG_DIR), file_name, &config.rust_log, console);
    subscriber.init();
    guard
}

fn build_subscriber<W>(
    log_dir: &Path,
    file_name: &str,
    filter: &str,
    console: W,
) -> (impl Subscriber + Send + Sync + use<W>, WorkerGuard)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let file_appender = tracing_appender::rolling::daily(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(filter);
    let console_layer = fmt::layer().with_writer(console).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer);

    (subscriber, guard)
}

/// Connects to PostgreSQL, retrying while the database is starting up,
/// then applies pending migrations.
pub async fn connect_and_migrate(config: &Config) -> Result<PgPool, sqlx::Error> {
    let mut retry_count = 0;
    let pool = loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => break pool,
            Err(e) => {
                retry_count += 1;
                if retry_count > CONNECT_RETRIES {
                    tracing::error!("Failed to connect to database after {} retries", CONNECT_RETRIES);
                    return Err(e);
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    };
    tracing::info!("Database connected...");

    tracing::info!("Running migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations applied successfully.");

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_layer_receives_events_and_console_is_pluggable() {
        let dir = tempfile::tempdir().unwrap();
        let (subscriber, guard) = build_subscriber(dir.path(), "test.log", "info", std::io::sink);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("written to the rolling file");
            tracing::debug!("filtered out");
        });
        drop(guard);

        let contents: String = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| std::fs::read_to_string(entry.unwrap().path()).unwrap())
            .collect();
        assert!(contents.contains("written to the rolling file"));
        assert!(!contents.contains("filtered out"));
    }
}
