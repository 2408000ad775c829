//! Availability resolution for fully-qualified domain names.
//!
//! The resolver's public contract is total: given a domain it always
//! produces an [`AvailabilityResult`] within bounded time and never
//! surfaces an error to the caller. Internally it runs an ordered cascade
//! of strategies, each of which may answer definitively, declare itself
//! not applicable, or fail; failure just moves the cascade along.
//!
//! Cascade order:
//! 1. Registry lookup: authoritative paid API, only when an API key is
//!    configured.
//! 2. Presence probe: DNS records, then HTTP reachability.
//! 3. Heuristic estimate: always answers. Results from this stage are
//!    labeled estimates, not ground truth; inspect
//!    [`AvailabilityResult::source`] to tell them apart.

mod heuristic;
mod lookup;
mod probe;

pub use heuristic::{HeuristicScorer, WELL_KNOWN_BRANDS};
pub use lookup::RegistryLookup;
pub use probe::PresenceProbe;

use crate::error::ScoutError;
use crate::types::AvailabilityResult;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// One stage of the resolution cascade.
///
/// `Ok(Some(_))` is a definite answer, `Ok(None)` means the stage is not
/// applicable to this domain, and `Err(_)` means the stage failed; the
/// cascade continues in both non-answer cases.
#[async_trait]
pub trait ResolveStrategy: Send + Sync {
    /// Short stage name for logging.
    fn name(&self) -> &'static str;

    /// Attempt to resolve availability for one domain.
    async fn attempt(&self, domain: &str) -> Result<Option<AvailabilityResult>, ScoutError>;
}

/// Configuration for the availability resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// API key for the registry lookup service. Absent ⇒ the lookup stage
    /// is skipped entirely.
    pub lookup_api_key: Option<String>,

    /// Base URL of the registry lookup service
    pub lookup_api_url: String,

    /// Timeout for one registry lookup request
    pub lookup_timeout: Duration,

    /// Whether the DNS/HTTP presence probe runs. Disable for offline
    /// deployments; the heuristic then answers everything.
    pub probe_enabled: bool,

    /// Timeout for each probe lookup
    pub probe_timeout: Duration,

    /// How many domains resolve concurrently within one batch
    pub batch_width: usize,

    /// Pause between batches, to respect upstream rate limits
    pub batch_delay: Duration,

    /// Base seed mixed into the heuristic jitter; fix it to make heuristic
    /// verdicts reproducible in tests
    pub heuristic_seed: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            lookup_api_key: None,
            lookup_api_url: "https://domain-availability.whoisxmlapi.com/api/v1".to_string(),
            lookup_timeout: Duration::from_secs(3),
            probe_enabled: true,
            probe_timeout: Duration::from_secs(2),
            batch_width: 3,
            batch_delay: Duration::from_millis(250),
            heuristic_seed: 0,
        }
    }
}

impl ResolverConfig {
    /// Offline profile: no registry lookup, no network probe. Every
    /// resolution is answered by the heuristic stage. Used in tests and
    /// air-gapped deployments.
    pub fn offline() -> Self {
        Self {
            probe_enabled: false,
            batch_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Set the registry lookup API key.
    pub fn with_lookup_key<K: Into<String>>(mut self, key: K) -> Self {
        self.lookup_api_key = Some(key.into());
        self
    }

    /// Enable or disable the presence probe.
    pub fn with_probe(mut self, enabled: bool) -> Self {
        self.probe_enabled = enabled;
        self
    }

    /// Set the batch width. Clamped to 1-10 to keep external call rates
    /// polite.
    pub fn with_batch_width(mut self, width: usize) -> Self {
        self.batch_width = width.clamp(1, 10);
        self
    }

    /// Set the inter-batch delay.
    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Set the heuristic jitter seed.
    pub fn with_heuristic_seed(mut self, seed: u64) -> Self {
        self.heuristic_seed = seed;
        self
    }
}

/// Cascading availability resolver with bounded batch concurrency.
pub struct AvailabilityResolver {
    config: ResolverConfig,
    strategies: Vec<Box<dyn ResolveStrategy>>,
}

impl AvailabilityResolver {
    /// Build the resolver from configuration. The strategy list reflects
    /// what is configured: lookup (keyed), probe (enabled), and always the
    /// heuristic terminator.
    pub fn new(config: ResolverConfig) -> Result<Self, ScoutError> {
        let mut strategies: Vec<Box<dyn ResolveStrategy>> = Vec::new();

        if let Some(key) = &config.lookup_api_key {
            strategies.push(Box::new(RegistryLookup::new(
                &config.lookup_api_url,
                key,
                config.lookup_timeout,
            )?));
        }

        if config.probe_enabled {
            strategies.push(Box::new(PresenceProbe::new(config.probe_timeout)?));
        }

        strategies.push(Box::new(HeuristicScorer::new(config.heuristic_seed)));

        Ok(Self { config, strategies })
    }

    /// Build a resolver with an explicit strategy list. Primarily for
    /// tests that need to inject failing or canned stages.
    pub fn with_strategies(
        config: ResolverConfig,
        strategies: Vec<Box<dyn ResolveStrategy>>,
    ) -> Self {
        Self { config, strategies }
    }

    /// Resolve one domain. Total: degradation inside the cascade never
    /// reaches the caller, and a resolver left without any answering
    /// strategy falls back to the conservative default.
    pub async fn resolve(&self, domain: &str) -> AvailabilityResult {
        match self.try_resolve(domain).await {
            Ok(result) => result,
            Err(e) => {
                warn!(domain, error = %e, "resolution failed, using conservative default");
                AvailabilityResult::conservative(domain)
            }
        }
    }

    /// Run the cascade, surfacing an error only when no strategy answered.
    pub(crate) async fn try_resolve(&self, domain: &str) -> Result<AvailabilityResult, ScoutError> {
        for strategy in &self.strategies {
            match strategy.attempt(domain).await {
                Ok(Some(result)) => {
                    debug!(domain, stage = strategy.name(), source = %result.source, available = result.available, "resolved");
                    return Ok(result);
                }
                Ok(None) => {
                    debug!(domain, stage = strategy.name(), "stage not applicable");
                }
                Err(e) => {
                    debug!(domain, stage = strategy.name(), error = %e, "stage failed, falling through");
                }
            }
        }

        Err(ScoutError::internal(format!(
            "no resolution strategy answered for {}",
            domain
        )))
    }

    /// Resolve many domains with bounded concurrency.
    ///
    /// Domains are processed in fixed-width batches with a short delay
    /// between batches. Output order matches input order. A member whose
    /// resolution fails maps to the conservative default; partial failure
    /// never aborts sibling lookups.
    pub async fn resolve_batch(&self, domains: &[String]) -> Vec<AvailabilityResult> {
        let width = self.config.batch_width.max(1);
        let mut results = Vec::with_capacity(domains.len());

        let chunks: Vec<&[String]> = domains.chunks(width).collect();
        let last = chunks.len().saturating_sub(1);

        for (index, chunk) in chunks.into_iter().enumerate() {
            let outcomes =
                futures::future::join_all(chunk.iter().map(|domain| self.try_resolve(domain)))
                    .await;

            for (domain, outcome) in chunk.iter().zip(outcomes) {
                results.push(outcome.unwrap_or_else(|e| {
                    warn!(domain, error = %e, "batch member failed, using conservative default");
                    AvailabilityResult::conservative(domain)
                }));
            }

            if index < last && !self.config.batch_delay.is_zero() {
                tokio::time::sleep(self.config.batch_delay).await;
            }
        }

        results
    }

    /// The configuration this resolver was built with.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingStrategy;

    #[async_trait]
    impl ResolveStrategy for FailingStrategy {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn attempt(&self, domain: &str) -> Result<Option<AvailabilityResult>, ScoutError> {
            Err(ScoutError::network(format!("injected failure for {}", domain)))
        }
    }

    struct TakenStrategy;

    #[async_trait]
    impl ResolveStrategy for TakenStrategy {
        fn name(&self) -> &'static str {
            "taken"
        }

        async fn attempt(&self, domain: &str) -> Result<Option<AvailabilityResult>, ScoutError> {
            Ok(Some(AvailabilityResult {
                domain: domain.to_string(),
                available: false,
                source: "Canned".to_string(),
                price: None,
                premium: false,
            }))
        }
    }

    fn offline_resolver() -> AvailabilityResolver {
        AvailabilityResolver::new(ResolverConfig::offline()).unwrap()
    }

    #[tokio::test]
    async fn test_offline_resolver_always_answers() {
        let resolver = offline_resolver();
        let result = resolver.resolve("somefreshname.dev").await;
        assert_eq!(result.domain, "somefreshname.dev");
        assert_eq!(result.source, "Estimated (Heuristic)");
    }

    #[tokio::test]
    async fn test_failed_stage_falls_through_to_next() {
        let resolver = AvailabilityResolver::with_strategies(
            ResolverConfig::offline(),
            vec![Box::new(FailingStrategy), Box::new(TakenStrategy)],
        );
        let result = resolver.resolve("example.com").await;
        assert!(!result.available);
        assert_eq!(result.source, "Canned");
    }

    #[tokio::test]
    async fn test_all_stages_failing_yields_conservative_default() {
        let resolver = AvailabilityResolver::with_strategies(
            ResolverConfig::offline(),
            vec![Box::new(FailingStrategy)],
        );
        let result = resolver.resolve("example.com").await;
        assert!(result.available);
        assert_eq!(result.source, "unknown");
    }

    #[tokio::test]
    async fn test_batch_preserves_order_and_length() {
        let resolver = offline_resolver();
        let domains: Vec<String> = (0..7).map(|i| format!("candidate{}.io", i)).collect();
        let results = resolver.resolve_batch(&domains).await;
        assert_eq!(results.len(), 7);
        for (domain, result) in domains.iter().zip(&results) {
            assert_eq!(domain, &result.domain);
        }
    }

    #[tokio::test]
    async fn test_batch_failing_member_gets_default_without_aborting_siblings() {
        // Every member fails, and every member still yields a result
        let resolver = AvailabilityResolver::with_strategies(
            ResolverConfig::offline(),
            vec![Box::new(FailingStrategy)],
        );
        let domains: Vec<String> = (0..5).map(|i| format!("candidate{}.io", i)).collect();
        let results = resolver.resolve_batch(&domains).await;
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.available && r.source == "unknown"));
    }

    struct PoisonStrategy;

    #[async_trait]
    impl ResolveStrategy for PoisonStrategy {
        fn name(&self) -> &'static str {
            "poison"
        }

        async fn attempt(&self, domain: &str) -> Result<Option<AvailabilityResult>, ScoutError> {
            if domain.contains("poison") {
                return Err(ScoutError::network("injected failure"));
            }
            Ok(Some(AvailabilityResult {
                domain: domain.to_string(),
                available: false,
                source: "Canned".to_string(),
                price: None,
                premium: false,
            }))
        }
    }

    #[tokio::test]
    async fn test_batch_single_failure_maps_to_default_only() {
        let resolver = AvailabilityResolver::with_strategies(
            ResolverConfig::offline(),
            vec![Box::new(PoisonStrategy)],
        );
        let domains: Vec<String> = vec![
            "alpha.com".to_string(),
            "poisoned.com".to_string(),
            "bravo.com".to_string(),
            "delta.com".to_string(),
        ];

        let results = resolver.resolve_batch(&domains).await;
        assert_eq!(results.len(), domains.len());

        // The failing member degrades to the conservative default
        assert!(results[1].available);
        assert_eq!(results[1].source, "unknown");

        // Its siblings are untouched
        for result in [&results[0], &results[2], &results[3]] {
            assert!(!result.available);
            assert_eq!(result.source, "Canned");
        }
    }

    #[tokio::test]
    async fn test_batch_empty_input() {
        let resolver = offline_resolver();
        let results = resolver.resolve_batch(&[]).await;
        assert!(results.is_empty());
    }

    #[test]
    fn test_batch_width_clamped() {
        let config = ResolverConfig::default().with_batch_width(500);
        assert_eq!(config.batch_width, 10);
        let config = ResolverConfig::default().with_batch_width(0);
        assert_eq!(config.batch_width, 1);
    }
}
