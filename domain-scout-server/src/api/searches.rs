//! Search audit endpoints.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use domain_scout_lib::SearchAudit;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct RecentParams {
    pub limit: Option<usize>,
}

/// Most recent audit rows, newest first. Default limit 10.
pub async fn recent(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecentParams>,
) -> Result<Json<Vec<SearchAudit>>, ApiError> {
    let limit = params.limit.unwrap_or(10).min(100);
    let searches = state.store.recent_searches(limit).await?;
    Ok(Json(searches))
}
