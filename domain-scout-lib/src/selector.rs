//! Candidate selection: the per-query orchestration of the pipeline.
//!
//! One generation call runs extract → generate → resolve/price →
//! filter/cap → persist, start to finish. Concurrency exists only inside
//! the resolver's batching; everything else here is synchronous, in-memory
//! transformation plus the final persistence calls.
//!
//! Failure semantics: resolver degradation for an individual stem ×
//! extension pair excludes that candidate and nothing more. Only empty
//! input and store failures abort the call.

use crate::catalog::{split_domain, validate_domain, ExtensionCatalog};
use crate::error::ScoutError;
use crate::keywords::{extract_keywords, generate_variations};
use crate::metrics::{calculate_metrics, DomainMetrics};
use crate::registrars::RegistrarTable;
use crate::resolver::AvailabilityResolver;
use crate::store::DomainStore;
use crate::types::{
    AvailabilityResult, DomainCandidate, DomainFilters, NewDomain, NewSearchAudit, QuoteSet,
    SearchAudit, SortBy,
};
use std::sync::Arc;
use tracing::info;

/// Candidates priced above this are flagged premium.
const PREMIUM_PRICE_THRESHOLD: f64 = 30.0;

/// Result-count budgets for a generation call.
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Budget when no availability filter is active
    pub default_target: usize,

    /// Larger budget under `availableOnly`, since more candidates will be
    /// discarded
    pub available_only_target: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            default_target: 60,
            available_only_target: 100,
        }
    }
}

/// Outcome of a single-domain check.
#[derive(Debug, Clone)]
pub struct DomainCheck {
    pub domain: String,
    pub availability: AvailabilityResult,
    pub quotes: QuoteSet,
    /// The existing persisted row, refreshed; `None` when the domain was
    /// never generated
    pub record: Option<DomainCandidate>,
    pub metrics: DomainMetrics,
}

/// Orchestrates one query through the full pipeline.
pub struct CandidateSelector {
    resolver: AvailabilityResolver,
    catalog: ExtensionCatalog,
    registrars: RegistrarTable,
    store: Arc<dyn DomainStore>,
    selection: SelectionConfig,
}

impl CandidateSelector {
    pub fn new(
        resolver: AvailabilityResolver,
        catalog: ExtensionCatalog,
        registrars: RegistrarTable,
        store: Arc<dyn DomainStore>,
        selection: SelectionConfig,
    ) -> Self {
        Self {
            resolver,
            catalog,
            registrars,
            store,
            selection,
        }
    }

    /// Generate, filter, and persist candidates for one query.
    ///
    /// Returns the persisted rows in selection order. The response always
    /// mirrors stored rows; nothing is returned that was not written.
    pub async fn generate(
        &self,
        query: &str,
        filters: &DomainFilters,
    ) -> Result<Vec<DomainCandidate>, ScoutError> {
        validate_filters(filters, &self.catalog)?;

        let tokens = extract_keywords(query);
        if tokens.is_empty() {
            return Err(ScoutError::EmptyQuery);
        }

        let stems = generate_variations(&tokens);
        if stems.is_empty() {
            return Err(ScoutError::EmptyQuery);
        }

        let target = filters.target_count.unwrap_or(if filters.available_only() {
            self.selection.available_only_target
        } else {
            self.selection.default_target
        });

        let extensions = self.catalog.ordered_subset(filters.extensions.as_deref());
        let tags = dedup_tokens(&tokens);
        let description = format!("Perfect for {} related businesses", tags.join(", "));

        let mut accepted: Vec<DomainCandidate> = Vec::new();

        'stems: for stem in &stems {
            let fqdns: Vec<String> = extensions
                .iter()
                .map(|ext| format!("{}{}", stem, ext.suffix))
                .collect();

            let availabilities = self.resolver.resolve_batch(&fqdns).await;

            for (ext, availability) in extensions.iter().zip(availabilities) {
                if filters.available_only() && !availability.available {
                    continue;
                }

                let quotes =
                    self.registrars
                        .price_quotes(&availability.domain, &ext.suffix, &self.catalog);
                let price = quotes.best.price;

                if filters.min_price.is_some_and(|min| price < min) {
                    continue;
                }
                if filters.max_price.is_some_and(|max| price > max) {
                    continue;
                }
                if filters
                    .max_length
                    .is_some_and(|max| availability.domain.len() > max)
                {
                    continue;
                }

                // Storage failure is fatal: the response must mirror rows
                let row = self
                    .store
                    .create_domain(NewDomain {
                        name: availability.domain.clone(),
                        extension: ext.suffix.clone(),
                        price,
                        is_available: availability.available,
                        is_premium: availability.premium || price > PREMIUM_PRICE_THRESHOLD,
                        registrar: if availability.available {
                            quotes.best.registrar.clone()
                        } else {
                            availability.source.clone()
                        },
                        affiliate_link: Some(quotes.best.affiliate_link.clone()),
                        registrar_quotes: quotes.quotes,
                        description: Some(description.clone()),
                        tags: tags.clone(),
                    })
                    .await?;

                accepted.push(row);

                if accepted.len() >= target {
                    break 'stems;
                }
            }
        }

        self.store
            .create_search(NewSearchAudit {
                query: query.to_string(),
                filters: filters.clone(),
                results_count: accepted.len(),
            })
            .await?;

        info!(
            query,
            results = accepted.len(),
            target,
            "generation completed"
        );

        Ok(accepted)
    }

    /// Single-domain path through the same resolver and aggregator,
    /// bypassing variation generation.
    ///
    /// Refreshes the persisted row when one exists; never creates one.
    pub async fn check(&self, domain: &str) -> Result<DomainCheck, ScoutError> {
        validate_domain(domain)?;

        let availability = self.resolver.resolve(domain).await;

        // validate_domain guarantees a dot is present
        let extension = split_domain(domain)
            .map(|(_, ext)| ext.to_string())
            .ok_or_else(|| ScoutError::invalid_domain(domain, "missing extension"))?;

        let quotes = self
            .registrars
            .price_quotes(domain, &extension, &self.catalog);

        let record = self
            .store
            .update_availability(domain, availability.available)
            .await?;

        Ok(DomainCheck {
            domain: domain.to_string(),
            metrics: calculate_metrics(domain),
            availability,
            quotes,
            record,
        })
    }
}

/// Reject malformed filter sets before any pipeline work happens.
pub fn validate_filters(
    filters: &DomainFilters,
    catalog: &ExtensionCatalog,
) -> Result<(), ScoutError> {
    if let (Some(min), Some(max)) = (filters.min_price, filters.max_price) {
        if min > max {
            return Err(ScoutError::invalid_filter(format!(
                "minPrice {} exceeds maxPrice {}",
                min, max
            )));
        }
    }

    if let Some(extensions) = &filters.extensions {
        if extensions.is_empty() {
            return Err(ScoutError::invalid_filter("extensions list is empty"));
        }
        for extension in extensions {
            if !catalog.contains(extension) {
                return Err(ScoutError::invalid_filter(format!(
                    "unsupported extension '{}'",
                    extension
                )));
            }
        }
    }

    if filters.target_count == Some(0) {
        return Err(ScoutError::invalid_filter("targetCount must be positive"));
    }

    Ok(())
}

/// Presentation-layer sorting: a pure, stable, non-mutating transform.
///
/// Applied downstream of selection: it reorders a returned set, never
/// changes which candidates were selected.
pub fn sorted(candidates: &[DomainCandidate], sort: SortBy) -> Vec<DomainCandidate> {
    let mut out = candidates.to_vec();
    match sort {
        SortBy::Relevance => {}
        SortBy::PriceAsc => out.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortBy::PriceDesc => out.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortBy::Length => out.sort_by_key(|d| d.length),
        SortBy::Alphabetical => out.sort_by(|a, b| a.name.cmp(&b.name)),
    }
    out
}

fn dedup_tokens(tokens: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tokens
        .iter()
        .filter(|t| seen.insert(t.as_str()))
        .cloned()
        .collect()
}
