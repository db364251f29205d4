//! Headliner Storage
//!
//! `SQLite` persistence layer for Headliner.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each feature owns its own queries
//!   (`players`, `artists`, `season_state`)
//! - **Catalog**: [`SqliteArtistCatalog`] serves the engine's artist lookups
//!   from the `artists` and `artist_performance` tables
//! - **Snapshots**: league, roster and clock state is written as one JSON
//!   document to `season_state`
//!
//! # Example
//!
//! ```rust,no_run
//! use headliner_storage::{create_pool, run_migrations};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://headliner.db").await?;
//! run_migrations(&pool).await?;
//!
//! let players = headliner_storage::players::get_all(&pool).await?;
//! # Ok(())
//! # }
//! ```

mod catalog;
mod error;

// Vertical slices
pub mod artists;
pub mod players;
pub mod season_state;

pub use catalog::SqliteArtistCatalog;
pub use error::{Result, StorageError};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup, before any query.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    tracing::debug!("Database migrations applied");
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://headliner.db`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!(database_url, "SQLite pool ready");
    Ok(pool)
}
