/// Season calendar API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, Json};
use headliner_core::{ReconcileReport, SeasonDate};
use serde::Serialize;

/// `{ month, year, month_name }`
#[derive(Debug, Serialize)]
pub struct DateResponse {
    pub month: u8,
    pub year: i32,
    pub month_name: &'static str,
}

impl From<SeasonDate> for DateResponse {
    fn from(date: SeasonDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
            month_name: date.month_name(),
        }
    }
}

/// GET /api/current-date
pub async fn current_date(State(app_state): State<AppState>) -> Json<DateResponse> {
    Json(app_state.engine.current_date().into())
}

/// POST /api/advance-month
///
/// The month always advances. If some rosters could not be scored the
/// response is 503 with the new date and the rosters left pending.
pub async fn advance_month(State(app_state): State<AppState>) -> Result<Json<DateResponse>> {
    let report = app_state.engine.advance_month().await;
    app_state.persist().await;

    let date = report.into_result().map_err(ServerError::from)?;
    Ok(Json(date.into()))
}

/// POST /api/reconcile
/// Retry scoring for rosters left incomplete by earlier advances
pub async fn reconcile(State(app_state): State<AppState>) -> Json<ReconcileReport> {
    let report = app_state.engine.reconcile().await;
    app_state.persist().await;
    Json(report)
}
