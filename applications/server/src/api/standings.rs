/// League standings API route
use super::player_names;
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use headliner_core::{LeagueId, PlayerId};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingResponse {
    pub rank: usize,
    pub player_id: PlayerId,
    pub player_name: String,
    pub points: u64,
}

/// GET /api/standings/:league_id
pub async fn get_standings(
    Path(league_id): Path<LeagueId>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<StandingResponse>>> {
    let table = app_state.engine.standings(league_id).await?;
    let names = player_names(&app_state.pool).await?;

    Ok(Json(
        table
            .into_iter()
            .map(|row| StandingResponse {
                rank: row.rank,
                player_id: row.player_id,
                player_name: names.get(&row.player_id).cloned().unwrap_or_default(),
                points: row.points,
            })
            .collect(),
    ))
}
