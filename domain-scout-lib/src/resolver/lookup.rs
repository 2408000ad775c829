//! Registry lookup stage: authoritative availability via a paid JSON API.
//!
//! Only active when an API key is configured. The response parser is
//! deliberately tolerant: lookup providers disagree on field names, so we
//! navigate the JSON for the handful of markers we care about instead of
//! binding a rigid schema.
//!
//! Rate limiting is terminal for a single resolution: a 429 yields an
//! immediate definite answer labeled "rate-limited" instead of an inline
//! retry, so a storm of candidates does not pile retries onto an upstream
//! that is already shedding load.

use crate::error::ScoutError;
use crate::resolver::ResolveStrategy;
use crate::types::{round_cents, AvailabilityResult};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

/// Source label attached when the upstream rejects us for rate reasons.
pub const RATE_LIMITED_SOURCE: &str = "rate-limited";

/// Source label for verified-available answers.
const VERIFIED_SOURCE: &str = "Registry Lookup";

/// Client for the registry lookup API.
pub struct RegistryLookup {
    http_client: reqwest::Client,
    api_url: String,
    api_key: String,
    timeout: Duration,
}

impl RegistryLookup {
    /// Create a lookup client for the given endpoint and key.
    pub fn new(api_url: &str, api_key: &str, timeout: Duration) -> Result<Self, ScoutError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout + Duration::from_secs(2)) // buffer over the logical timeout
            .build()
            .map_err(|e| {
                ScoutError::network_with_source("Failed to create lookup HTTP client", e.to_string())
            })?;

        Ok(Self {
            http_client,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            timeout,
        })
    }

    async fn query(&self, domain: &str) -> Result<AvailabilityResult, ScoutError> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("domainName", domain),
                ("outputFormat", "JSON"),
            ])
            .send()
            .await
            .map_err(|e| ScoutError::lookup(domain, format!("Request failed: {}", e)))?;

        match response.status() {
            StatusCode::OK => {
                let json = response.json::<serde_json::Value>().await.map_err(|e| {
                    ScoutError::lookup(domain, format!("Failed to parse JSON: {}", e))
                })?;
                Ok(interpret_response(domain, &json))
            }
            StatusCode::NOT_FOUND => {
                // No record for the domain means it is not registered
                Ok(AvailabilityResult {
                    domain: domain.to_string(),
                    available: true,
                    source: VERIFIED_SOURCE.to_string(),
                    price: None,
                    premium: false,
                })
            }
            StatusCode::TOO_MANY_REQUESTS => Ok(AvailabilityResult {
                domain: domain.to_string(),
                available: false,
                source: RATE_LIMITED_SOURCE.to_string(),
                price: None,
                premium: false,
            }),
            code => Err(ScoutError::lookup_with_status(
                domain,
                format!("Lookup server returned error: {}", code),
                code.as_u16(),
            )),
        }
    }
}

#[async_trait]
impl ResolveStrategy for RegistryLookup {
    fn name(&self) -> &'static str {
        "registry-lookup"
    }

    async fn attempt(&self, domain: &str) -> Result<Option<AvailabilityResult>, ScoutError> {
        let result = tokio::time::timeout(self.timeout, self.query(domain))
            .await
            .map_err(|_| ScoutError::timeout("registry lookup", self.timeout))??;
        Ok(Some(result))
    }
}

/// Interpret a 200 response body.
///
/// Explicit "not registered" markers mean available; everything else is
/// treated as unavailable, labeled with the registrar name when the
/// response carries one. Premium price information is only honored for
/// available names; unavailable results never carry a resolver price.
fn interpret_response(domain: &str, json: &serde_json::Value) -> AvailabilityResult {
    if is_available_marker(json) {
        let premium = json_bool(json, "premium").unwrap_or(false);
        let price = json_f64(json, "price").map(round_cents);
        return AvailabilityResult {
            domain: domain.to_string(),
            available: true,
            source: VERIFIED_SOURCE.to_string(),
            price,
            premium,
        };
    }

    AvailabilityResult {
        domain: domain.to_string(),
        available: false,
        source: registrar_label(json).unwrap_or_else(|| "Registered".to_string()),
        price: None,
        premium: false,
    }
}

/// Look for any of the availability markers providers use.
fn is_available_marker(json: &serde_json::Value) -> bool {
    let status = json
        .pointer("/DomainInfo/domainAvailability")
        .or_else(|| json.get("domainAvailability"))
        .or_else(|| json.get("status"))
        .and_then(|v| v.as_str());

    if let Some(status) = status {
        let status = status.to_lowercase();
        return status == "available" || status == "not registered" || status == "free";
    }

    json.get("available").and_then(|v| v.as_bool()).unwrap_or(false)
}

/// Extract a registrar display name from the handful of shapes seen in the
/// wild.
fn registrar_label(json: &serde_json::Value) -> Option<String> {
    json.pointer("/registrar/name")
        .or_else(|| json.get("registrarName"))
        .or_else(|| json.pointer("/DomainInfo/registrarName"))
        .and_then(|v| v.as_str())
        .map(String::from)
}

fn json_bool(json: &serde_json::Value, key: &str) -> Option<bool> {
    json.get(key).and_then(|v| v.as_bool())
}

fn json_f64(json: &serde_json::Value, key: &str) -> Option<f64> {
    json.get(key).and_then(|v| v.as_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpret_available_status_string() {
        let json = serde_json::json!({
            "DomainInfo": { "domainAvailability": "AVAILABLE", "domainName": "fresh.io" }
        });
        let result = interpret_response("fresh.io", &json);
        assert!(result.available);
        assert_eq!(result.source, "Registry Lookup");
    }

    #[test]
    fn test_interpret_registered_with_registrar_label() {
        let json = serde_json::json!({
            "status": "registered",
            "registrar": { "name": "MarkMonitor Inc." }
        });
        let result = interpret_response("google.com", &json);
        assert!(!result.available);
        assert_eq!(result.source, "MarkMonitor Inc.");
        assert!(result.price.is_none());
    }

    #[test]
    fn test_interpret_registered_without_registrar() {
        let json = serde_json::json!({ "status": "registered" });
        let result = interpret_response("taken.com", &json);
        assert!(!result.available);
        assert_eq!(result.source, "Registered");
    }

    #[test]
    fn test_interpret_premium_price_only_when_available() {
        let json = serde_json::json!({
            "status": "available",
            "premium": true,
            "price": 349.999
        });
        let result = interpret_response("brand.com", &json);
        assert!(result.available);
        assert!(result.premium);
        assert_eq!(result.price, Some(350.0));

        // Same premium fields on a registered answer are ignored
        let json = serde_json::json!({
            "status": "registered",
            "premium": true,
            "price": 349.99
        });
        let result = interpret_response("brand.com", &json);
        assert!(!result.available);
        assert!(!result.premium);
        assert!(result.price.is_none());
    }

    #[test]
    fn test_interpret_boolean_available_field() {
        let json = serde_json::json!({ "available": true });
        assert!(interpret_response("x.com", &json).available);

        let json = serde_json::json!({ "available": false });
        assert!(!interpret_response("x.com", &json).available);
    }

    #[test]
    fn test_unrecognized_body_defaults_to_unavailable() {
        // Fail closed: an answer we cannot read is not evidence of
        // availability
        let json = serde_json::json!({ "unexpected": "shape" });
        assert!(!interpret_response("x.com", &json).available);
    }
}
