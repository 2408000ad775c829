//! # Domain Scout Library
//!
//! Turns a free-text business idea into a bounded, filtered, persisted set
//! of purchasable domain candidates.
//!
//! The pipeline: keyword extraction → name variation generation →
//! availability resolution (registry lookup, DNS/HTTP presence probe, or
//! heuristic estimate; first definite answer wins) → per-registrar
//! pricing aggregation → selection with filters and a result budget →
//! persistence through the result store.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_scout_lib::{
//!     AvailabilityResolver, CandidateSelector, DomainFilters, ExtensionCatalog,
//!     MemoryStore, RegistrarTable, ResolverConfig, SelectionConfig,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let selector = CandidateSelector::new(
//!         AvailabilityResolver::new(ResolverConfig::default())?,
//!         ExtensionCatalog::builtin(),
//!         RegistrarTable::default(),
//!         Arc::new(MemoryStore::new()),
//!         SelectionConfig::default(),
//!     );
//!
//!     let domains = selector.generate("tech startup", &DomainFilters::default()).await?;
//!     for domain in &domains {
//!         println!("{} - ${:.2} via {}", domain.name, domain.price, domain.registrar);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Accuracy
//!
//! Availability is best-effort by design. Check the
//! [`AvailabilityResult::source`] label: registry lookups and presence
//! probes are verified observations; `"Estimated (Heuristic)"` marks a
//! statistical guess made when no external source was reachable.

// Re-export the public API surface
pub use catalog::{split_domain, validate_domain, Extension, ExtensionCatalog, PRIMARY_EXTENSION};
pub use config::{
    load_file, AffiliatesFileConfig, FileConfig, ResolverFileConfig, ScoutConfig,
    SelectionFileConfig, ServerFileConfig,
};
pub use error::ScoutError;
pub use keywords::{extract_keywords, generate_variations, STEM_PREFIXES, STEM_SUFFIXES};
pub use metrics::{calculate_metrics, DomainMetrics};
pub use registrars::{AffiliateIds, Registrar, RegistrarTable};
pub use resolver::{
    AvailabilityResolver, HeuristicScorer, PresenceProbe, RegistryLookup, ResolveStrategy,
    ResolverConfig, WELL_KNOWN_BRANDS,
};
pub use selector::{sorted, validate_filters, CandidateSelector, DomainCheck, SelectionConfig};
pub use store::{DomainStore, MemoryStore};
pub use types::{
    AvailabilityResult, DomainCandidate, DomainFilters, NewDomain, NewSearchAudit, QuoteSet,
    RegistrarQuote, SearchAudit, SortBy,
};

// Internal modules
mod catalog;
mod config;
mod error;
mod keywords;
mod metrics;
mod registrars;
mod resolver;
mod selector;
mod store;
mod types;

/// Type alias for convenience
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
