pub mod app;
pub mod config;
pub mod profile;
pub mod watch;

use std::path::PathBuf;

use adrewards_db::Database;
use tracing_subscriber::EnvFilter;

use config::{AppConfig, SettingsManager};

/// Determine the data directory for the application.
/// Priority: ADREWARDS_DATA_DIR env var > ~/.adrewards
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ADREWARDS_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".adrewards")
}

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Install the global tracing subscriber, filtered by `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

/// Open the database, migrate settings, and load config.
pub fn init_foundation() -> Result<(Database, AppConfig, PathBuf), anyhow::Error> {
    load_dotenv();

    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;
    let db_path = dir.join("local.db");

    tracing::info!("Opening database at {}", db_path.display());
    let db = Database::open(&db_path)?;

    let sm = SettingsManager::new(db.clone());

    // Migrate settings from environment variables (one-time)
    if let Err(e) = sm.migrate_from_env() {
        tracing::error!("Failed to migrate from env: {e}");
    }

    sm.initialize_defaults()?;
    let config = AppConfig::load(&sm)?;

    tracing::info!(
        filter_by_interests = config.filter_by_interests,
        "Settings loaded"
    );
    Ok((db, config, dir))
}
