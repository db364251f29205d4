/// Shared application state
use crate::config::ServerConfig;
use crate::error::Result;
use crate::services::CredentialService;
use headliner_core::{ArtistCatalog, LeagueEngine, SeasonClock};
use headliner_storage::{season_state, SqliteArtistCatalog};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<LeagueEngine>,
    pub pool: SqlitePool,
    pub credentials: Arc<CredentialService>,
    persist_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        engine: Arc<LeagueEngine>,
        pool: SqlitePool,
        credentials: Arc<CredentialService>,
    ) -> Self {
        Self {
            engine,
            pool,
            credentials,
            persist_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Build state over the SQLite artist catalog
    pub async fn initialize(pool: SqlitePool, config: &ServerConfig) -> Result<Self> {
        let catalog = Arc::new(SqliteArtistCatalog::new(pool.clone()));
        Self::with_catalog(pool, catalog, config).await
    }

    /// Build state over any catalog, restoring the last saved season if one exists
    pub async fn with_catalog(
        pool: SqlitePool,
        catalog: Arc<dyn ArtistCatalog>,
        config: &ServerConfig,
    ) -> Result<Self> {
        let engine = match season_state::load(&pool).await? {
            Some(snapshot) => {
                tracing::info!(date = %snapshot.date, "Restoring saved season");
                let clock = Arc::new(SeasonClock::new(snapshot.date));
                LeagueEngine::restore(catalog, clock, config.engine_config(), snapshot)?
            }
            None => {
                let start = config.start_date()?;
                tracing::info!(date = %start, "Starting new season");
                let clock = Arc::new(SeasonClock::new(start));
                LeagueEngine::new(catalog, clock, config.engine_config())
            }
        };

        let credentials = CredentialService::new(config.auth.bcrypt_cost);
        Ok(Self::new(Arc::new(engine), pool, Arc::new(credentials)))
    }

    /// Write the current engine state to the database
    ///
    /// Called after every mutating request. Saves are serialized so an
    /// older snapshot never overwrites a newer one. A failed save is
    /// logged and the request still succeeds; the next save catches up.
    pub async fn persist(&self) {
        let _guard = self.persist_lock.lock().await;
        let snapshot = self.engine.snapshot().await;
        if let Err(err) = season_state::save(&self.pool, &snapshot).await {
            tracing::error!(error = %err, "Failed to save season state");
        }
    }
}
