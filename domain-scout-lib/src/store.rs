//! Result store interface and in-memory implementation.
//!
//! The store is an external collaborator consumed through a deliberately
//! narrow create/read interface. The pipeline treats it as its system of
//! record: a generation call only returns candidates that were durably
//! written, so store failures are fatal to the call.
//!
//! Writes are append/upsert-only with no cross-row transactional
//! requirement: each candidate row and the audit row are independent.

use crate::error::ScoutError;
use crate::selector::sorted;
use crate::types::{
    DomainCandidate, DomainFilters, NewDomain, NewSearchAudit, SearchAudit, SortBy,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Narrow persistence interface for domain rows and search audits.
#[async_trait]
pub trait DomainStore: Send + Sync {
    /// Persist a new domain candidate; the store assigns id and timestamp.
    async fn create_domain(&self, new_domain: NewDomain) -> Result<DomainCandidate, ScoutError>;

    /// Fetch one candidate by surrogate id.
    async fn domain(&self, id: u64) -> Result<Option<DomainCandidate>, ScoutError>;

    /// Fetch one candidate by full name.
    async fn domain_by_name(&self, name: &str) -> Result<Option<DomainCandidate>, ScoutError>;

    /// Update availability of an existing row (re-check), refreshing its
    /// `checked_at`. Returns the updated row, or `None` when no row with
    /// that name exists.
    async fn update_availability(
        &self,
        name: &str,
        is_available: bool,
    ) -> Result<Option<DomainCandidate>, ScoutError>;

    /// Filtered read over previously persisted candidates. No fresh
    /// resolution happens here.
    async fn search_domains(
        &self,
        query: &str,
        filters: &DomainFilters,
    ) -> Result<Vec<DomainCandidate>, ScoutError>;

    /// Append one audit row.
    async fn create_search(&self, audit: NewSearchAudit) -> Result<SearchAudit, ScoutError>;

    /// Most recent audit rows, newest first.
    async fn recent_searches(&self, limit: usize) -> Result<Vec<SearchAudit>, ScoutError>;
}

#[derive(Default)]
struct MemoryInner {
    domains: HashMap<u64, DomainCandidate>,
    searches: Vec<SearchAudit>,
    next_domain_id: u64,
    next_search_id: u64,
}

/// In-memory store. The reference implementation for tests and
/// single-process deployments; production deployments swap in a database-
/// backed implementation of [`DomainStore`].
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DomainStore for MemoryStore {
    async fn create_domain(&self, new_domain: NewDomain) -> Result<DomainCandidate, ScoutError> {
        let mut inner = self.inner.write().await;
        inner.next_domain_id += 1;
        let id = inner.next_domain_id;

        let candidate = DomainCandidate {
            id,
            length: new_domain.name.len(),
            name: new_domain.name,
            extension: new_domain.extension,
            price: new_domain.price,
            is_available: new_domain.is_available,
            is_premium: new_domain.is_premium,
            registrar: new_domain.registrar,
            affiliate_link: new_domain.affiliate_link,
            registrar_quotes: new_domain.registrar_quotes,
            description: new_domain.description,
            tags: new_domain.tags,
            checked_at: Utc::now(),
        };

        inner.domains.insert(id, candidate.clone());
        Ok(candidate)
    }

    async fn domain(&self, id: u64) -> Result<Option<DomainCandidate>, ScoutError> {
        let inner = self.inner.read().await;
        Ok(inner.domains.get(&id).cloned())
    }

    async fn domain_by_name(&self, name: &str) -> Result<Option<DomainCandidate>, ScoutError> {
        let inner = self.inner.read().await;
        Ok(inner.domains.values().find(|d| d.name == name).cloned())
    }

    async fn update_availability(
        &self,
        name: &str,
        is_available: bool,
    ) -> Result<Option<DomainCandidate>, ScoutError> {
        let mut inner = self.inner.write().await;
        let id = inner.domains.values().find(|d| d.name == name).map(|d| d.id);

        match id {
            Some(id) => {
                let domain = inner
                    .domains
                    .get_mut(&id)
                    .ok_or_else(|| ScoutError::storage("row vanished during update"))?;
                domain.is_available = is_available;
                domain.checked_at = Utc::now();
                Ok(Some(domain.clone()))
            }
            None => Ok(None),
        }
    }

    async fn search_domains(
        &self,
        query: &str,
        filters: &DomainFilters,
    ) -> Result<Vec<DomainCandidate>, ScoutError> {
        let inner = self.inner.read().await;

        let mut results: Vec<DomainCandidate> = inner
            .domains
            .values()
            .filter(|d| !filters.available_only() || d.is_available)
            .filter(|d| match &filters.extensions {
                Some(extensions) => extensions.iter().any(|e| e == &d.extension),
                None => true,
            })
            .filter(|d| filters.min_price.map_or(true, |min| d.price >= min))
            .filter(|d| filters.max_price.map_or(true, |max| d.price <= max))
            .filter(|d| filters.max_length.map_or(true, |max| d.length <= max))
            .filter(|d| {
                if query.is_empty() {
                    return true;
                }
                let term = query.to_lowercase();
                d.name.to_lowercase().contains(&term)
                    || d.tags.iter().any(|t| t.to_lowercase().contains(&term))
                    || d.description
                        .as_deref()
                        .map(|desc| desc.to_lowercase().contains(&term))
                        .unwrap_or(false)
            })
            .cloned()
            .collect();

        // Insertion order, so presentation sorting stays stable across calls
        results.sort_by_key(|d| d.id);

        Ok(sorted(&results, filters.sort_by.unwrap_or(SortBy::Relevance)))
    }

    async fn create_search(&self, audit: NewSearchAudit) -> Result<SearchAudit, ScoutError> {
        let mut inner = self.inner.write().await;
        inner.next_search_id += 1;

        let row = SearchAudit {
            id: inner.next_search_id,
            query: audit.query,
            filters: audit.filters,
            results_count: audit.results_count,
            created_at: Utc::now(),
        };

        inner.searches.push(row.clone());
        Ok(row)
    }

    async fn recent_searches(&self, limit: usize) -> Result<Vec<SearchAudit>, ScoutError> {
        let inner = self.inner.read().await;
        Ok(inner.searches.iter().rev().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn new_domain(name: &str, extension: &str, price: f64, available: bool) -> NewDomain {
        NewDomain {
            name: name.to_string(),
            extension: extension.to_string(),
            price,
            is_available: available,
            is_premium: price > 30.0,
            registrar: "Porkbun".to_string(),
            affiliate_link: None,
            registrar_quotes: BTreeMap::new(),
            description: Some("Perfect for testing related businesses".to_string()),
            tags: vec!["testing".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_length() {
        let store = MemoryStore::new();
        let row = store
            .create_domain(new_domain("getcloud.com", ".com", 10.73, true))
            .await
            .unwrap();
        assert_eq!(row.id, 1);
        assert_eq!(row.length, "getcloud.com".len());

        let fetched = store.domain(row.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "getcloud.com");
    }

    #[tokio::test]
    async fn test_lookup_by_name_and_recheck() {
        let store = MemoryStore::new();
        store
            .create_domain(new_domain("getcloud.com", ".com", 10.73, true))
            .await
            .unwrap();

        let updated = store
            .update_availability("getcloud.com", false)
            .await
            .unwrap()
            .unwrap();
        assert!(!updated.is_available);

        let missing = store.update_availability("absent.com", false).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_search_filters_compose() {
        let store = MemoryStore::new();
        store
            .create_domain(new_domain("getcloud.com", ".com", 10.73, true))
            .await
            .unwrap();
        store
            .create_domain(new_domain("cloudhub.io", ".io", 48.88, true))
            .await
            .unwrap();
        store
            .create_domain(new_domain("takencloud.com", ".com", 10.73, false))
            .await
            .unwrap();

        let filters = DomainFilters {
            available_only: Some(true),
            extensions: Some(vec![".com".to_string()]),
            ..Default::default()
        };
        let results = store.search_domains("", &filters).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "getcloud.com");

        let filters = DomainFilters {
            max_price: Some(20.0),
            ..Default::default()
        };
        let results = store.search_domains("", &filters).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_search_matches_name_tags_description() {
        let store = MemoryStore::new();
        store
            .create_domain(new_domain("getcloud.com", ".com", 10.73, true))
            .await
            .unwrap();

        assert_eq!(store.search_domains("cloud", &DomainFilters::default()).await.unwrap().len(), 1);
        assert_eq!(store.search_domains("testing", &DomainFilters::default()).await.unwrap().len(), 1);
        assert_eq!(store.search_domains("nomatch", &DomainFilters::default()).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_recent_searches_newest_first() {
        let store = MemoryStore::new();
        for query in ["first", "second", "third"] {
            store
                .create_search(NewSearchAudit {
                    query: query.to_string(),
                    filters: DomainFilters::default(),
                    results_count: 0,
                })
                .await
                .unwrap();
        }

        let recent = store.recent_searches(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].query, "third");
        assert_eq!(recent[1].query, "second");
    }
}
