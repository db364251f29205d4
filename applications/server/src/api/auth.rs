/// Login API route
use super::{players::PlayerResponse, ApiJson};
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub player: PlayerResponse,
}

fn invalid_login() -> ServerError {
    ServerError::Auth("Invalid username or password".to_string())
}

/// POST /api/login
///
/// Checks the password and returns the player. No session or token is issued.
pub async fn login(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let player = headliner_storage::players::get_by_username(&app_state.pool, &req.username)
        .await?
        .ok_or_else(invalid_login)?;

    let password_hash = headliner_storage::players::get_password_hash(&app_state.pool, player.id)
        .await?
        .ok_or_else(invalid_login)?;

    if !app_state
        .credentials
        .verify_password(&req.password, &password_hash)?
    {
        tracing::debug!(player_id = player.id, "Rejected login");
        return Err(invalid_login());
    }

    tracing::info!(player_id = player.id, "Player logged in");
    Ok(Json(LoginResponse {
        player: player.into(),
    }))
}
