//! SQLite-backed artist catalog

use crate::artists;
use async_trait::async_trait;
use headliner_core::error::{HeadlinerError, Result};
use headliner_core::traits::ArtistCatalog;
use headliner_core::types::{Artist, ArtistId, SeasonDate};
use headliner_core::projected_delta;
use sqlx::SqlitePool;

/// Artist catalog served from the `artists` tables
///
/// Performance deltas come from `artist_performance` when a row exists for
/// the period, and from [`projected_delta`] otherwise.
#[derive(Clone)]
pub struct SqliteArtistCatalog {
    pool: SqlitePool,
}

impl SqliteArtistCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArtistCatalog for SqliteArtistCatalog {
    async fn search(&self, term: &str, limit: usize) -> Result<Vec<Artist>> {
        Ok(artists::search(&self.pool, term, limit).await?)
    }

    async fn get(&self, id: ArtistId) -> Result<Artist> {
        artists::get_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| HeadlinerError::not_found("Artist", id))
    }

    async fn performance_delta(&self, id: ArtistId, period: SeasonDate) -> Result<u64> {
        if let Some(points) = artists::get_performance(&self.pool, id, period).await? {
            return Ok(points);
        }
        let artist = self.get(id).await?;
        Ok(projected_delta(&artist, period))
    }
}
