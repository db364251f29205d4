/// Player account API routes
use super::{require_player, ApiJson, MessageResponse};
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use headliner_core::{CreatePlayer, Player, PlayerId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreatePlayerRequest {
    pub player_name: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayerResponse {
    pub message: String,
    pub player_id: PlayerId,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub player_id: PlayerId,
    pub player_name: String,
    pub username: String,
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        Self {
            player_id: player.id,
            player_name: player.name,
            username: player.username,
        }
    }
}

/// GET /api/players
pub async fn list_players(State(app_state): State<AppState>) -> Result<Json<Vec<PlayerResponse>>> {
    let players = headliner_storage::players::get_all(&app_state.pool).await?;
    Ok(Json(players.into_iter().map(PlayerResponse::from).collect()))
}

/// POST /api/players
/// Register a player with a password
pub async fn create_player(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<CreatePlayerRequest>,
) -> Result<Json<CreatePlayerResponse>> {
    let password_hash = app_state.credentials.hash_password(&req.password)?;
    let player = headliner_storage::players::create_with_credentials(
        &app_state.pool,
        CreatePlayer {
            name: req.player_name,
            username: req.username,
        },
        &password_hash,
    )
    .await?;

    tracing::info!(player_id = player.id, username = %player.username, "Player registered");
    Ok(Json(CreatePlayerResponse {
        message: "Player created successfully".to_string(),
        player_id: player.id,
    }))
}

/// DELETE /api/players/:id
/// Delete a player, their rosters and every league they own
pub async fn delete_player(
    Path(id): Path<PlayerId>,
    State(app_state): State<AppState>,
) -> Result<Json<MessageResponse>> {
    require_player(&app_state.pool, id).await?;
    headliner_storage::players::delete(&app_state.pool, id).await?;

    let removal = app_state.engine.remove_player(id).await;
    app_state.persist().await;

    tracing::info!(
        player_id = id,
        deleted_leagues = removal.deleted_leagues.len(),
        released_rosters = removal.released_rosters.len(),
        "Player deleted"
    );
    Ok(MessageResponse::new("Player deleted successfully"))
}

/// PUT /api/players/:id/password
pub async fn update_password(
    Path(id): Path<PlayerId>,
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<UpdatePasswordRequest>,
) -> Result<Json<MessageResponse>> {
    require_player(&app_state.pool, id).await?;
    let password_hash = app_state.credentials.hash_password(&req.password)?;
    headliner_storage::players::set_password_hash(&app_state.pool, id, &password_hash).await?;

    tracing::info!(player_id = id, "Password updated");
    Ok(MessageResponse::new("Password updated successfully"))
}
