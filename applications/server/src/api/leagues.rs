/// League API routes
use super::{player_names, require_player, ApiJson, MessageResponse};
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use headliner_core::{LeagueId, PlayerId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeagueRequest {
    pub league_name: String,
    pub owner_id: PlayerId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeagueResponse {
    pub league_id: LeagueId,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRequest {
    pub player_id: PlayerId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub new_owner_id: PlayerId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaguePlayer {
    pub player_id: PlayerId,
    pub player_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueResponse {
    pub league_id: LeagueId,
    pub league_name: String,
    pub owner_id: PlayerId,
    pub owner_name: String,
    pub player_count: usize,
    pub players: Vec<LeaguePlayer>,
}

/// GET /api/leagues
pub async fn list_leagues(State(app_state): State<AppState>) -> Result<Json<Vec<LeagueResponse>>> {
    let names = player_names(&app_state.pool).await?;
    let name_of = |id: PlayerId| names.get(&id).cloned().unwrap_or_default();

    let leagues = app_state
        .engine
        .leagues()
        .await
        .into_iter()
        .map(|league| LeagueResponse {
            league_id: league.id,
            league_name: league.name,
            owner_id: league.owner_id,
            owner_name: name_of(league.owner_id),
            player_count: league.members.len(),
            players: league
                .members
                .into_iter()
                .map(|player_id| LeaguePlayer {
                    player_id,
                    player_name: name_of(player_id),
                })
                .collect(),
        })
        .collect();

    Ok(Json(leagues))
}

/// POST /api/leagues
/// Create a league; the owner gets the first roster
pub async fn create_league(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<CreateLeagueRequest>,
) -> Result<Json<CreateLeagueResponse>> {
    require_player(&app_state.pool, req.owner_id).await?;

    let league = app_state
        .engine
        .create_league(&req.league_name, req.owner_id)
        .await?;
    app_state.persist().await;

    Ok(Json(CreateLeagueResponse {
        league_id: league.id,
        message: "League created successfully".to_string(),
    }))
}

/// POST /api/leagues/:id/join
pub async fn join_league(
    Path(id): Path<LeagueId>,
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<MembershipRequest>,
) -> Result<Json<MessageResponse>> {
    require_player(&app_state.pool, req.player_id).await?;

    app_state.engine.join_league(id, req.player_id).await?;
    app_state.persist().await;

    Ok(MessageResponse::new("Joined league successfully"))
}

/// POST /api/leagues/:id/leave
pub async fn leave_league(
    Path(id): Path<LeagueId>,
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<MembershipRequest>,
) -> Result<Json<MessageResponse>> {
    app_state.engine.leave_league(id, req.player_id).await?;
    app_state.persist().await;

    Ok(MessageResponse::new("Left league successfully"))
}

/// POST /api/leagues/:id/transfer
/// Ownership transfer is not supported; always 501 (or 404 for an unknown league)
pub async fn transfer_league(
    Path(id): Path<LeagueId>,
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<TransferRequest>,
) -> Result<Json<MessageResponse>> {
    app_state
        .engine
        .transfer_ownership(id, req.new_owner_id)
        .await?;
    Ok(MessageResponse::new("Ownership transferred"))
}
