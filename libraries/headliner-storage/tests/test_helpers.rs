//! Test helpers and fixtures for storage integration tests
//!
//! Databases are REAL SQLite files in a temp dir (not in-memory) so
//! migrations, constraints and WAL mode behave as in production.

#![allow(dead_code)]

use headliner_core::types::{CreateArtist, CreatePlayer, PerformanceRecord, PlayerId};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = headliner_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        headliner_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Test fixture: Create a test player
pub async fn create_test_player(pool: &SqlitePool, username: &str) -> PlayerId {
    headliner_storage::players::create(
        pool,
        CreatePlayer {
            name: format!("{username} name"),
            username: username.to_string(),
        },
    )
    .await
    .expect("Failed to create test player")
    .id
}

/// Test fixture: Artist import payload
pub fn artist_payload(name: &str, price: u64, popularity: u32) -> CreateArtist {
    CreateArtist {
        name: name.to_string(),
        price,
        listeners: 2_000_000,
        popularity,
        performance: Vec::new(),
    }
}

/// Test fixture: Artist import payload with one recorded month
pub fn artist_with_month(name: &str, year: i32, month: u8, points: u64) -> CreateArtist {
    CreateArtist {
        performance: vec![PerformanceRecord {
            year,
            month,
            points,
        }],
        ..artist_payload(name, 100, 50)
    }
}
