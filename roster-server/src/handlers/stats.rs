use axum::extract::State;
use axum::Json;

use crate::dto::StatsResponse;
use crate::error::ApiResult;
use crate::AppState;

/// GET /stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<StatsResponse>> {
    let stats = state.stats.snapshot().await?;
    Ok(Json(stats.into()))
}

/// GET /ping (also /health)
pub async fn health() -> &'static str {
    "pong"
}
