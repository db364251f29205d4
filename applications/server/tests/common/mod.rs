//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use headliner_core::{Artist, InMemoryCatalog, PlayerId};
use headliner_server::{config::ServerConfig, create_router, state::AppState};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Test app over a real temporary SQLite file and an in-memory catalog
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub pool: SqlitePool,
    pub catalog: Arc<InMemoryCatalog>,
    pub config: ServerConfig,
    _temp_dir: TempDir,
}

pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.auth.bcrypt_cost = 4;
    config.season.catalog_timeout_ms = 500;
    config
}

pub fn artist(id: i64, name: &str, price: u64, popularity: u32) -> Artist {
    Artist {
        id,
        name: name.to_string(),
        price,
        listeners: 1_500_000,
        popularity,
    }
}

pub fn fixture_catalog() -> Arc<InMemoryCatalog> {
    Arc::new(InMemoryCatalog::with_artists([
        artist(1, "Phoebe Bridgers", 300, 80),
        artist(2, "Big Thief", 250, 70),
        artist(3, "Mitski", 400, 90),
        artist(4, "Japanese Breakfast", 150, 60),
        artist(5, "Soccer Mommy", 100, 40),
    ]))
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = headliner_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");
        headliner_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let catalog = fixture_catalog();
        let config = test_config();
        let state = AppState::with_catalog(pool.clone(), catalog.clone(), &config)
            .await
            .expect("Failed to build state");

        Self {
            router: create_router(state.clone()),
            state,
            pool,
            catalog,
            config,
            _temp_dir: temp_dir,
        }
    }

    /// Rebuild state from the same database, as a server restart would
    pub async fn restart(&self) -> Router {
        let state = AppState::with_catalog(self.pool.clone(), self.catalog.clone(), &self.config)
            .await
            .expect("Failed to rebuild state");
        create_router(state)
    }

    /// Send a request and return status plus parsed JSON body
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        send_to(&self.router, method, uri, body).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    /// Register a player through the API and return their id
    pub async fn register(&self, name: &str, username: &str) -> PlayerId {
        let (status, body) = self
            .post(
                "/api/players",
                json!({
                    "player_name": name,
                    "username": username,
                    "password": fixtures::PASSWORD,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");
        body["playerId"].as_i64().expect("playerId missing")
    }

    /// Create a league through the API and return its id
    pub async fn create_league(&self, name: &str, owner_id: PlayerId) -> i64 {
        let (status, body) = self
            .post(
                "/api/leagues",
                json!({ "leagueName": name, "ownerId": owner_id }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create league failed: {body}");
        body["leagueId"].as_i64().expect("leagueId missing")
    }

    /// Roster id of a player in a league
    pub async fn roster_of(&self, player_id: PlayerId, league_id: i64) -> i64 {
        let (_, body) = self.get(&format!("/api/rosters?playerId={player_id}")).await;
        body.as_array()
            .expect("roster list")
            .iter()
            .find(|r| r["leagueId"].as_i64() == Some(league_id))
            .and_then(|r| r["rosterId"].as_i64())
            .expect("roster not found")
    }
}

pub async fn send_to(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().uri(uri).method(method);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Test credentials
pub mod fixtures {
    pub const PASSWORD: &str = "TestPassword123!";
}
