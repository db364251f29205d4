/// Roster API routes
use super::{artists::ArtistResponse, ApiJson, MessageResponse};
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use headliner_core::{ArtistId, PlayerId, RosterId, RosterSummary};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterQuery {
    pub player_id: Option<PlayerId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddArtistRequest {
    pub artist_id: ArtistId,
}

/// GET /api/rosters?playerId=
pub async fn list_rosters(
    State(app_state): State<AppState>,
    Query(query): Query<RosterQuery>,
) -> Result<Json<Vec<RosterSummary>>> {
    let player_id = query
        .player_id
        .ok_or_else(|| ServerError::BadRequest("playerId is required".to_string()))?;
    Ok(Json(app_state.engine.rosters_for_player(player_id).await))
}

/// GET /api/rosters/:id/artists
pub async fn list_roster_artists(
    Path(id): Path<RosterId>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ArtistResponse>>> {
    let artists = app_state.engine.roster_artists(id).await?;
    Ok(Json(artists.into_iter().map(ArtistResponse::from).collect()))
}

/// POST /api/rosters/:id/artists
pub async fn add_artist(
    Path(id): Path<RosterId>,
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<AddArtistRequest>,
) -> Result<Json<MessageResponse>> {
    app_state.engine.add_artist(id, req.artist_id).await?;
    app_state.persist().await;

    Ok(MessageResponse::new("Artist added to roster"))
}

/// DELETE /api/rosters/:id/artists/:artist_id
pub async fn remove_artist(
    Path((id, artist_id)): Path<(RosterId, ArtistId)>,
    State(app_state): State<AppState>,
) -> Result<Json<MessageResponse>> {
    app_state.engine.remove_artist(id, artist_id).await?;
    app_state.persist().await;

    Ok(MessageResponse::new("Artist removed from roster"))
}

/// DELETE /api/rosters/:id
/// Same rules as leaving the league: the owner's roster cannot be deleted
pub async fn delete_roster(
    Path(id): Path<RosterId>,
    State(app_state): State<AppState>,
) -> Result<Json<MessageResponse>> {
    app_state.engine.delete_roster(id).await?;
    app_state.persist().await;

    Ok(MessageResponse::new("Roster deleted"))
}
