use axum::{extract::State, Json};

use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::domain::ranking::RankingEntry;

/// Current ranking, recomputed from all finished matches
///
/// GET /api/results/ranking
pub async fn get_ranking(State(service): State<AppState>) -> Result<Json<Vec<RankingEntry>>, ApiError> {
    let ranking = service.ranking().await?;
    Ok(Json(ranking))
}
