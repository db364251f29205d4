/// Core traits for Headliner
use crate::error::Result;
use crate::types::{Artist, ArtistId, SeasonDate};
use async_trait::async_trait;

/// Read-only access to artist metadata and monthly performance
///
/// Implemented by the SQLite catalog in `headliner-storage` and by
/// [`InMemoryCatalog`](crate::catalog::InMemoryCatalog) for fixtures.
/// The engine never calls an implementation directly; every call goes
/// through [`TimedCatalog`](crate::catalog::TimedCatalog).
#[async_trait]
pub trait ArtistCatalog: Send + Sync {
    /// Case-insensitive substring search on the artist name
    ///
    /// Results are ordered by popularity descending, then id ascending,
    /// and truncated to `limit`.
    async fn search(&self, term: &str, limit: usize) -> Result<Vec<Artist>>;

    /// Get an artist by ID
    ///
    /// # Errors
    /// Returns `NotFound` if the catalog has no such artist
    async fn get(&self, id: ArtistId) -> Result<Artist>;

    /// Points the artist earned in `period`
    ///
    /// Must be deterministic: the same artist and period always yield the
    /// same value.
    async fn performance_delta(&self, id: ArtistId, period: SeasonDate) -> Result<u64>;
}
