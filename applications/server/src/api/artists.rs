/// Artist search API route
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use headliner_core::{Artist, ArtistId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub term: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistResponse {
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub price: u64,
    pub listeners: u64,
    pub popularity: u32,
}

impl From<Artist> for ArtistResponse {
    fn from(artist: Artist) -> Self {
        Self {
            artist_id: artist.id,
            artist_name: artist.name,
            price: artist.price,
            listeners: artist.listeners,
            popularity: artist.popularity,
        }
    }
}

/// GET /api/artists/search?term=&limit=
pub async fn search_artists(
    State(app_state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ArtistResponse>>> {
    let artists = app_state
        .engine
        .search_artists(&query.term, query.limit)
        .await?;
    Ok(Json(artists.into_iter().map(ArtistResponse::from).collect()))
}
