//! Domain endpoints: generation, single checks, and persisted reads.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use domain_scout_lib::{
    DomainCandidate, DomainFilters, DomainMetrics, QuoteSet, SortBy,
};

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub query: String,
    #[serde(default)]
    pub filters: DomainFilters,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainListResponse {
    pub domains: Vec<DomainCandidate>,
    pub total: usize,
}

/// Run the full pipeline for one query.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<DomainListResponse>, ApiError> {
    let domains = state
        .selector
        .generate(&request.query, &request.filters)
        .await?;

    info!(query = %request.query, total = domains.len(), "generated candidates");

    Ok(Json(DomainListResponse {
        total: domains.len(),
        domains,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    pub domain: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub domain: String,
    pub is_available: bool,
    /// Resolution source: registrar label, probe label, or heuristic marker
    pub registrar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub premium: bool,
    pub quotes: QuoteSet,
    /// The refreshed persisted row, when this name was generated before
    pub record: Option<DomainCandidate>,
    pub metrics: DomainMetrics,
}

/// Resolve and price a single domain, bypassing variation generation.
pub async fn check(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, ApiError> {
    if request.domain.trim().is_empty() {
        return Err(ApiError::validation("Domain is required"));
    }

    let outcome = state.selector.check(request.domain.trim()).await?;

    Ok(Json(CheckResponse {
        domain: outcome.domain,
        is_available: outcome.availability.available,
        registrar: outcome.availability.source,
        price: outcome.availability.price,
        premium: outcome.availability.premium,
        quotes: outcome.quotes,
        record: outcome.record,
        metrics: outcome.metrics,
    }))
}

/// Query-string shape for `/api/domains/search`. Extensions arrive
/// comma-separated; everything else maps straight onto the filter set.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchParams {
    pub q: Option<String>,
    pub extensions: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub available_only: Option<bool>,
    pub max_length: Option<usize>,
    pub sort_by: Option<SortBy>,
}

impl SearchParams {
    fn into_filters(self) -> (String, DomainFilters) {
        let extensions = self.extensions.map(|raw| {
            raw.split(',')
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect::<Vec<_>>()
        });

        (
            self.q.unwrap_or_default(),
            DomainFilters {
                extensions,
                min_price: self.min_price,
                max_price: self.max_price,
                available_only: self.available_only,
                max_length: self.max_length,
                target_count: None,
                sort_by: self.sort_by,
            },
        )
    }
}

/// Filtered read over previously persisted candidates. No fresh
/// resolution happens on this path.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<DomainListResponse>, ApiError> {
    let (query, filters) = params.into_filters();

    let domains = state.store.search_domains(&query, &filters).await?;

    Ok(Json(DomainListResponse {
        total: domains.len(),
        domains,
    }))
}

/// One candidate by surrogate id.
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<DomainCandidate>, ApiError> {
    let domain = state
        .store
        .domain(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Domain", id))?;

    Ok(Json(domain))
}
