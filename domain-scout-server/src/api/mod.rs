//! HTTP API surface.
//!
//! Route layout mirrors the web client's expectations:
//!
//! - `POST /api/domains/generate` - run the full pipeline for a query
//! - `POST /api/domains/check` - resolve and price one domain
//! - `GET  /api/domains/search` - filtered read over persisted candidates
//! - `GET  /api/domains/{id}` - one candidate by id
//! - `GET  /api/searches/recent` - newest audit rows

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_scout_lib::{
    AvailabilityResolver, CandidateSelector, DomainStore, ExtensionCatalog, MemoryStore,
    RegistrarTable, ScoutConfig, ScoutError,
};

mod domains;
mod error;
mod searches;

pub use error::ApiError;

/// Shared application state: the pipeline plus its store, built once at
/// startup. Catalog and registrar tables inside the selector are read-only
/// after this point.
pub struct AppState {
    pub selector: CandidateSelector,
    pub store: Arc<dyn DomainStore>,
}

impl AppState {
    /// Wire the pipeline from resolved configuration.
    pub fn from_config(config: &ScoutConfig) -> Result<Self, ScoutError> {
        let store: Arc<dyn DomainStore> = Arc::new(MemoryStore::new());
        Self::with_store(config, store)
    }

    /// Wire the pipeline over a caller-provided store implementation.
    pub fn with_store(
        config: &ScoutConfig,
        store: Arc<dyn DomainStore>,
    ) -> Result<Self, ScoutError> {
        let resolver = AvailabilityResolver::new(config.resolver.clone())?;
        let selector = CandidateSelector::new(
            resolver,
            ExtensionCatalog::builtin(),
            RegistrarTable::with_affiliates(config.affiliates.clone()),
            store.clone(),
            config.selection.clone(),
        );

        Ok(Self { selector, store })
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    Router::new()
        .route("/api/domains/generate", post(domains::generate))
        .route("/api/domains/check", post(domains::check))
        .route("/api/domains/search", get(domains::search))
        .route("/api/domains/{id}", get(domains::get_by_id))
        .route("/api/searches/recent", get(searches::recent))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
