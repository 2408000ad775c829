//! Presence probe stage: infer registration from observable footprint.
//!
//! A domain with DNS records or a reachable web server is certainly
//! registered, even when no authoritative source is available. The probe
//! walks record types in fixed order (A, AAAA, MX, NS) and falls back to
//! an HTTP/HTTPS reachability check only when DNS gave no authoritative
//! answer at all.
//!
//! Negative DNS answers (NXDOMAIN / no records) are evidence of
//! availability. Transport failures are not: if every lookup fails to
//! even reach a nameserver, the stage reports failure and the cascade
//! moves on rather than guessing.

use crate::error::ScoutError;
use crate::resolver::ResolveStrategy;
use crate::types::AvailabilityResult;
use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig as DnsConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::TokioAsyncResolver;
use std::time::Duration;
use tracing::debug;

/// Source label when no DNS footprint was found.
const NO_RECORDS_SOURCE: &str = "No DNS Records";

/// Outcome of a single record-type lookup.
enum ProbeSignal {
    /// Records exist; the domain is registered
    Present,
    /// Authoritative negative; no such records
    Absent,
    /// Could not reach DNS at all
    Unreachable,
}

/// DNS + HTTP presence probe.
pub struct PresenceProbe {
    resolver: TokioAsyncResolver,
    http_client: reqwest::Client,
}

impl PresenceProbe {
    /// Create a probe with the given per-lookup timeout.
    pub fn new(timeout: Duration) -> Result<Self, ScoutError> {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 1; // single attempt for speed; the cascade has fallbacks

        let resolver = TokioAsyncResolver::tokio(DnsConfig::default(), opts);

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ScoutError::network_with_source("Failed to create probe HTTP client", e.to_string())
            })?;

        Ok(Self {
            resolver,
            http_client,
        })
    }

    async fn lookup_signal(&self, domain: &str, record: &str) -> ProbeSignal {
        let outcome = match record {
            "A" => self
                .resolver
                .ipv4_lookup(domain)
                .await
                .map(|l| l.iter().next().is_some()),
            "AAAA" => self
                .resolver
                .ipv6_lookup(domain)
                .await
                .map(|l| l.iter().next().is_some()),
            "MX" => self
                .resolver
                .mx_lookup(domain)
                .await
                .map(|l| l.iter().next().is_some()),
            _ => self
                .resolver
                .ns_lookup(domain)
                .await
                .map(|l| l.iter().next().is_some()),
        };

        match outcome {
            Ok(true) => ProbeSignal::Present,
            Ok(false) => ProbeSignal::Absent,
            Err(e) => match e.kind() {
                ResolveErrorKind::NoRecordsFound { .. } => ProbeSignal::Absent,
                _ => {
                    debug!(domain, record, error = %e, "DNS lookup unreachable");
                    ProbeSignal::Unreachable
                }
            },
        }
    }

    /// Reachability check over HTTP, then HTTPS. Any response at all,
    /// including error statuses, proves something is serving the name.
    async fn http_signal(&self, domain: &str) -> Option<&'static str> {
        if self
            .http_client
            .head(format!("http://{}", domain))
            .send()
            .await
            .is_ok()
        {
            return Some("Active Website");
        }

        if self
            .http_client
            .head(format!("https://{}", domain))
            .send()
            .await
            .is_ok()
        {
            return Some("Active Website (HTTPS)");
        }

        None
    }

    fn taken(domain: &str, source: &str) -> AvailabilityResult {
        AvailabilityResult {
            domain: domain.to_string(),
            available: false,
            source: source.to_string(),
            price: None,
            premium: false,
        }
    }
}

#[async_trait]
impl ResolveStrategy for PresenceProbe {
    fn name(&self) -> &'static str {
        "presence-probe"
    }

    async fn attempt(&self, domain: &str) -> Result<Option<AvailabilityResult>, ScoutError> {
        let ladder = [
            ("A", "Registered (DNS Verified)"),
            ("AAAA", "Registered (DNS Verified)"),
            ("MX", "Registered (MX Records)"),
            ("NS", "Registered (NS Records)"),
        ];

        let mut negatives = 0usize;

        for (record, label) in ladder {
            match self.lookup_signal(domain, record).await {
                ProbeSignal::Present => return Ok(Some(Self::taken(domain, label))),
                ProbeSignal::Absent => negatives += 1,
                ProbeSignal::Unreachable => {}
            }
        }

        if negatives > 0 {
            // At least one authoritative empty answer and no records
            // anywhere: nothing is delegated for this name.
            return Ok(Some(AvailabilityResult {
                domain: domain.to_string(),
                available: true,
                source: NO_RECORDS_SOURCE.to_string(),
                price: None,
                premium: false,
            }));
        }

        // DNS was entirely unreachable. A web server answering would still
        // prove registration; no answer proves nothing.
        if let Some(label) = self.http_signal(domain).await {
            return Ok(Some(Self::taken(domain, label)));
        }

        Err(ScoutError::probe(
            domain,
            "DNS unreachable and no HTTP response",
        ))
    }
}
