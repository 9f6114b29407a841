//! Persistence layer: SQLite pool, schema bootstrap, per-entity repositories
//! and the JSON document store for research listings.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub mod documents;
pub mod error;
pub mod models;
pub mod repositories;
pub mod research_store;
pub mod schema;

pub use error::StoreError;
pub use schema::initialize_schema;

pub type DbPool = sqlx::SqlitePool;

/// SQLite serialises writers, so a handful of connections is plenty.
const MAX_CONNECTIONS: u32 = 8;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a connection pool from a database URL such as `sqlite://data/app.db`.
///
/// The database file (and its parent directory) is created when missing.
/// Connections use write-ahead logging and enforce foreign keys.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
