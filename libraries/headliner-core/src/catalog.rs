//! Artist catalog adapters
//!
//! - [`TimedCatalog`] bounds every lookup with a timeout so the engine never
//!   waits on a stalled backend.
//! - [`InMemoryCatalog`] is a fixture catalog with explicit deltas and an
//!   outage switch, used by tests and local runs.
//! - [`projected_delta`] is the shared fallback scoring formula.

use crate::error::{HeadlinerError, Result};
use crate::traits::ArtistCatalog;
use crate::types::{Artist, ArtistId, SeasonDate};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

/// Monthly listeners worth one point of base performance
const LISTENERS_PER_POINT: u64 = 100_000;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

fn fnv1a(bytes: impl IntoIterator<Item = u8>) -> u64 {
    bytes.into_iter().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Deterministic performance delta for an artist in a period
///
/// `base = popularity + listeners / 100_000`, and the result is
/// `base / 2` plus a per-period swing derived from an FNV-1a hash of
/// `(id, year, month)`, so it always lies in `[base / 2, base]`.
pub fn projected_delta(artist: &Artist, period: SeasonDate) -> u64 {
    let base = u64::from(artist.popularity) + artist.listeners / LISTENERS_PER_POINT;
    let half = base / 2;
    let seed = artist
        .id
        .to_le_bytes()
        .into_iter()
        .chain(period.year().to_le_bytes())
        .chain([period.month()]);
    half + fnv1a(seed) % (half + 1)
}

/// Sort and truncate search candidates the way every catalog must
pub fn rank_search_results(mut artists: Vec<Artist>, limit: usize) -> Vec<Artist> {
    artists.sort_by(|a, b| b.popularity.cmp(&a.popularity).then(a.id.cmp(&b.id)));
    artists.truncate(limit);
    artists
}

/// Catalog wrapper that turns slow or failing lookups into `CatalogUnavailable`
#[derive(Clone)]
pub struct TimedCatalog {
    inner: Arc<dyn ArtistCatalog>,
    timeout: Duration,
}

impl TimedCatalog {
    pub fn new(inner: Arc<dyn ArtistCatalog>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T>> + Send,
    ) -> Result<T> {
        if let Ok(result) = tokio::time::timeout(self.timeout, call).await {
            result
        } else {
            tracing::warn!(
                operation,
                timeout_ms = self.timeout.as_millis() as u64,
                "Artist catalog timed out"
            );
            Err(HeadlinerError::catalog_unavailable(format!(
                "{operation} timed out after {}ms",
                self.timeout.as_millis()
            )))
        }
    }
}

#[async_trait]
impl ArtistCatalog for TimedCatalog {
    async fn search(&self, term: &str, limit: usize) -> Result<Vec<Artist>> {
        self.bounded("search", self.inner.search(term, limit)).await
    }

    async fn get(&self, id: ArtistId) -> Result<Artist> {
        self.bounded("get", self.inner.get(id)).await
    }

    async fn performance_delta(&self, id: ArtistId, period: SeasonDate) -> Result<u64> {
        self.bounded("performance_delta", self.inner.performance_delta(id, period))
            .await
    }
}

/// In-process catalog backed by maps
#[derive(Default)]
pub struct InMemoryCatalog {
    artists: RwLock<BTreeMap<ArtistId, Artist>>,
    deltas: RwLock<HashMap<(ArtistId, SeasonDate), u64>>,
    offline: AtomicBool,
    latency_ms: AtomicU64,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artists(artists: impl IntoIterator<Item = Artist>) -> Self {
        let catalog = Self::new();
        for artist in artists {
            catalog.insert(artist);
        }
        catalog
    }

    /// Add or replace an artist
    pub fn insert(&self, artist: Artist) {
        self.artists
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(artist.id, artist);
    }

    /// Change an artist's price; returns false if the artist is unknown
    pub fn set_price(&self, id: ArtistId, price: u64) -> bool {
        let mut artists = self.artists.write().unwrap_or_else(PoisonError::into_inner);
        match artists.get_mut(&id) {
            Some(artist) => {
                artist.price = price;
                true
            }
            None => false,
        }
    }

    /// Pin the delta for one artist and period
    pub fn set_delta(&self, id: ArtistId, period: SeasonDate, points: u64) {
        self.deltas
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((id, period), points);
    }

    /// Simulate an outage: every call fails with `CatalogUnavailable`
    pub fn set_available(&self, available: bool) {
        self.offline.store(!available, Ordering::SeqCst);
    }

    /// Delay every call, to exercise timeouts
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    async fn check_reachable(&self) -> Result<()> {
        let latency = self.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(HeadlinerError::catalog_unavailable("catalog offline"));
        }
        Ok(())
    }

    fn lookup(&self, id: ArtistId) -> Result<Artist> {
        self.artists
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or_else(|| HeadlinerError::not_found("Artist", id))
    }
}

#[async_trait]
impl ArtistCatalog for InMemoryCatalog {
    async fn search(&self, term: &str, limit: usize) -> Result<Vec<Artist>> {
        self.check_reachable().await?;
        let needle = term.trim().to_lowercase();
        let candidates = self
            .artists
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|artist| artist.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(rank_search_results(candidates, limit))
    }

    async fn get(&self, id: ArtistId) -> Result<Artist> {
        self.check_reachable().await?;
        self.lookup(id)
    }

    async fn performance_delta(&self, id: ArtistId, period: SeasonDate) -> Result<u64> {
        self.check_reachable().await?;
        let pinned = self
            .deltas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(id, period))
            .copied();
        match pinned {
            Some(points) => Ok(points),
            None => Ok(projected_delta(&self.lookup(id)?, period)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist(id: ArtistId, name: &str, popularity: u32, listeners: u64) -> Artist {
        Artist {
            id,
            name: name.to_string(),
            price: 100,
            listeners,
            popularity,
        }
    }

    #[test]
    fn projected_delta_is_deterministic_and_bounded() {
        let a = artist(1, "Phoebe Bridgers", 80, 4_000_000);
        let period = SeasonDate::new(4, 2024).unwrap();
        let base = 80 + 40;

        let first = projected_delta(&a, period);
        assert_eq!(first, projected_delta(&a, period));
        assert!((base / 2..=base).contains(&first), "delta {first} outside range");
    }

    #[test]
    fn projected_delta_varies_by_period() {
        let a = artist(7, "Big Thief", 70, 2_500_000);
        let start = SeasonDate::new(1, 2024).unwrap();
        let deltas: std::collections::HashSet<u64> =
            std::iter::successors(Some(start), |d| Some(d.next()))
                .take(12)
                .map(|period| projected_delta(&a, period))
                .collect();
        assert!(deltas.len() > 1, "a full year should not score flat");
    }

    #[test]
    fn zero_base_scores_zero() {
        let a = artist(3, "Unknown", 0, 10);
        assert_eq!(projected_delta(&a, SeasonDate::new(1, 2024).unwrap()), 0);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_ranked() {
        let catalog = InMemoryCatalog::with_artists([
            artist(1, "The National", 60, 0),
            artist(2, "National Parks", 30, 0),
            artist(3, "Mitski", 90, 0),
            artist(4, "NATIONAL Anthem", 60, 0),
        ]);

        let results = catalog.search("national", 10).await.unwrap();
        let ids: Vec<_> = results.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 4, 2]);

        let limited = catalog.search("", 2).await.unwrap();
        assert_eq!(limited.iter().map(|a| a.id).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[tokio::test]
    async fn pinned_delta_overrides_projection() {
        let catalog = InMemoryCatalog::with_artists([artist(1, "Lorde", 85, 0)]);
        let period = SeasonDate::new(2, 2024).unwrap();
        catalog.set_delta(1, period, 999);
        assert_eq!(catalog.performance_delta(1, period).await.unwrap(), 999);
    }

    #[tokio::test]
    async fn get_missing_artist_is_not_found() {
        let catalog = InMemoryCatalog::new();
        let err = catalog.get(42).await.unwrap_err();
        assert!(matches!(err, HeadlinerError::NotFound { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn timed_catalog_reports_slow_backend_as_unavailable() {
        let inner = Arc::new(InMemoryCatalog::with_artists([artist(1, "Slow", 10, 0)]));
        inner.set_latency(Duration::from_secs(5));
        let timed = TimedCatalog::new(inner, Duration::from_millis(100));

        let err = timed.get(1).await.unwrap_err();
        assert!(matches!(err, HeadlinerError::CatalogUnavailable(_)));
    }

    #[tokio::test]
    async fn timed_catalog_passes_through_fast_calls() {
        let inner = Arc::new(InMemoryCatalog::with_artists([artist(1, "Fast", 10, 0)]));
        let timed = TimedCatalog::new(inner.clone(), Duration::from_secs(1));
        assert_eq!(timed.get(1).await.unwrap().name, "Fast");

        inner.set_available(false);
        assert!(matches!(
            timed.get(1).await.unwrap_err(),
            HeadlinerError::CatalogUnavailable(_)
        ));
    }
}
