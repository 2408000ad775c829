//! Core data types for domain candidate generation.
//!
//! This module defines the data structures that flow through the pipeline:
//! availability results, registrar quotes, persisted candidates, audit rows,
//! and the filter set accepted by the selector. Serialized field names use
//! camelCase to match the web client's wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of resolving one fully-qualified domain name.
///
/// Produced fresh per resolution call and never cached across requests.
/// The `source` label identifies which cascade stage answered, so callers
/// can distinguish verified lookups from heuristic estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResult {
    /// The domain that was resolved (e.g., "example.com")
    pub domain: String,

    /// Whether the domain appears available for registration
    pub available: bool,

    /// Which stage answered: a registrar label, a probe label, or a
    /// heuristic marker such as "Estimated (Heuristic)"
    pub source: String,

    /// Premium price reported by the registry lookup, if any.
    /// Never set on unavailable domains.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Whether the registry flagged the name as premium
    pub premium: bool,
}

impl AvailabilityResult {
    /// The conservative fallback used when a batch member fails outright:
    /// report the domain as available so it is surfaced rather than lost.
    pub fn conservative(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            available: true,
            source: "unknown".to_string(),
            price: None,
            premium: false,
        }
    }
}

/// One registrar's price and purchase link for a specific domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrarQuote {
    /// Registrar display name (also the key in quote maps)
    pub registrar: String,

    /// List price for this domain's extension, in USD
    pub price: f64,

    /// Search/checkout URL, with affiliate tracking when configured
    pub affiliate_link: String,

    /// Logo identifier for the client
    pub logo: String,

    /// Whether the link carries an affiliate tracking parameter
    pub has_affiliate: bool,
}

/// The full per-registrar quote table for one domain, plus the best pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSet {
    /// Quotes keyed by registrar name (BTreeMap keeps output deterministic)
    pub quotes: BTreeMap<String, RegistrarQuote>,

    /// The quote with the minimum price (ties broken by registrar name)
    pub best: RegistrarQuote,
}

/// A generated domain candidate, as persisted by the result store.
///
/// Created once per generation request and immutable thereafter, except
/// `is_available`/`checked_at` which an explicit re-check may update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainCandidate {
    /// Surrogate id assigned by the store
    pub id: u64,

    /// Fully qualified name including the extension (e.g., "getcloud.com")
    pub name: String,

    /// The extension, dot included (e.g., ".com")
    pub extension: String,

    /// Best available price in USD (minimum registrar quote, else the
    /// catalog base price)
    pub price: f64,

    /// Whether the name appeared available at `checked_at`
    pub is_available: bool,

    /// Premium pricing flag
    pub is_premium: bool,

    /// Label of the best-price registrar, or the resolution source for
    /// taken domains
    pub registrar: String,

    /// Purchase link for the best-price registrar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate_link: Option<String>,

    /// Per-registrar quote table
    pub registrar_quotes: BTreeMap<String, RegistrarQuote>,

    /// Short marketing description derived from the query keywords
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Query keywords this candidate was generated from
    pub tags: Vec<String>,

    /// Character count of the full name, extension included
    pub length: usize,

    /// When availability was last determined
    pub checked_at: DateTime<Utc>,
}

/// Insert shape for a domain candidate; the store assigns `id` and
/// `checked_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDomain {
    pub name: String,
    pub extension: String,
    pub price: f64,
    pub is_available: bool,
    pub is_premium: bool,
    pub registrar: String,
    pub affiliate_link: Option<String>,
    pub registrar_quotes: BTreeMap<String, RegistrarQuote>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

/// One append-only audit row per generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAudit {
    pub id: u64,
    pub query: String,
    pub filters: DomainFilters,
    pub results_count: usize,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for an audit row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSearchAudit {
    pub query: String,
    pub filters: DomainFilters,
    pub results_count: usize,
}

/// Filter set accepted by generation and search calls.
///
/// All fields are optional; absent fields leave that dimension
/// unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomainFilters {
    /// Restrict to these extensions (dot included, e.g., [".com", ".io"])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    /// Minimum acceptable price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,

    /// Maximum acceptable price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,

    /// Only keep candidates that resolved as available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_only: Option<bool>,

    /// Maximum full-name length in characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Result-count budget for a generation call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_count: Option<usize>,

    /// Presentation ordering: applied downstream, never affects which
    /// candidates are selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
}

impl DomainFilters {
    /// Whether the availability filter is active.
    pub fn available_only(&self) -> bool {
        self.available_only.unwrap_or(false)
    }
}

/// Presentation-layer sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    /// Keep generation order
    #[serde(rename = "relevance")]
    Relevance,

    /// Cheapest first
    #[serde(rename = "price-asc")]
    PriceAsc,

    /// Most expensive first
    #[serde(rename = "price-desc")]
    PriceDesc,

    /// Shortest name first
    #[serde(rename = "length")]
    Length,

    /// Lexicographic by name
    #[serde(rename = "alphabetical")]
    Alphabetical,
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortBy::Relevance => write!(f, "relevance"),
            SortBy::PriceAsc => write!(f, "price-asc"),
            SortBy::PriceDesc => write!(f, "price-desc"),
            SortBy::Length => write!(f, "length"),
            SortBy::Alphabetical => write!(f, "alphabetical"),
        }
    }
}

/// Round a price to whole cents.
///
/// Prices in this system are display/compare values; rounding at
/// construction keeps repeated aggregation byte-identical.
pub(crate) fn round_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}
