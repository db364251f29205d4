/// API route modules
pub mod artists;
pub mod auth;
pub mod health;
pub mod leagues;
pub mod players;
pub mod rosters;
pub mod season;
pub mod standings;

use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    routing::{delete, get, post, put},
    Json, Router,
};
use headliner_core::{Player, PlayerId};
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashMap;

/// All API routes, to be nested under `/api`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        // Players
        .route("/players", get(players::list_players))
        .route("/players", post(players::create_player))
        .route("/players/:id", delete(players::delete_player))
        .route("/players/:id/password", put(players::update_password))
        .route("/login", post(auth::login))
        // Artists
        .route("/artists/search", get(artists::search_artists))
        // Leagues
        .route("/leagues", get(leagues::list_leagues))
        .route("/leagues", post(leagues::create_league))
        .route("/leagues/:id/join", post(leagues::join_league))
        .route("/leagues/:id/leave", post(leagues::leave_league))
        .route("/leagues/:id/transfer", post(leagues::transfer_league))
        .route("/standings/:league_id", get(standings::get_standings))
        // Rosters
        .route("/rosters", get(rosters::list_rosters))
        .route("/rosters/:id", delete(rosters::delete_roster))
        .route("/rosters/:id/artists", get(rosters::list_roster_artists))
        .route("/rosters/:id/artists", post(rosters::add_artist))
        .route(
            "/rosters/:id/artists/:artist_id",
            delete(rosters::remove_artist),
        )
        // Season
        .route("/current-date", get(season::current_date))
        .route("/advance-month", post(season::advance_month))
        .route("/reconcile", post(season::reconcile))
}

/// JSON body extractor whose rejections use the API error shape
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// `{ "message": ... }` acknowledgement body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Look up a player or fail with 404
pub(crate) async fn require_player(pool: &SqlitePool, player_id: PlayerId) -> Result<Player> {
    headliner_storage::players::get_by_id(pool, player_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Player not found: {player_id}")))
}

/// Display names of every player, keyed by id
pub(crate) async fn player_names(pool: &SqlitePool) -> Result<HashMap<PlayerId, String>> {
    Ok(headliner_storage::players::get_all(pool)
        .await?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect())
}
