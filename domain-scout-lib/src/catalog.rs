//! Extension catalog: the supported TLDs and their baseline list prices.
//!
//! Loaded once at process start and immutable afterwards. The catalog also
//! defines iteration priority: the primary extension is always evaluated
//! before the others for a given stem.

use serde::{Deserialize, Serialize};

/// The extension evaluated first for every stem.
pub const PRIMARY_EXTENSION: &str = ".com";

/// Baseline price used when a domain's extension is not in the catalog
/// (single-domain checks can name arbitrary TLDs).
pub const DEFAULT_BASE_PRICE: f64 = 12.99;

/// A supported TLD with its baseline list price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    /// Suffix with the dot included (e.g., ".com")
    pub suffix: String,

    /// Baseline list price in USD, used when no registrar quote exists
    pub base_price: f64,
}

/// Immutable table of supported extensions, in iteration priority order.
#[derive(Debug, Clone)]
pub struct ExtensionCatalog {
    entries: Vec<Extension>,
}

impl ExtensionCatalog {
    /// The built-in catalog. The primary extension comes first; the rest
    /// follow in fixed priority order.
    pub fn builtin() -> Self {
        let entries = [
            (".com", 12.99),
            (".net", 14.99),
            (".org", 13.99),
            (".io", 39.99),
            (".co", 29.99),
            (".tech", 49.99),
            (".app", 19.99),
            (".dev", 17.99),
        ]
        .into_iter()
        .map(|(suffix, base_price)| Extension {
            suffix: suffix.to_string(),
            base_price,
        })
        .collect();

        Self { entries }
    }

    /// All catalog entries in priority order.
    pub fn entries(&self) -> &[Extension] {
        &self.entries
    }

    /// Look up an extension by suffix (dot included).
    pub fn get(&self, suffix: &str) -> Option<&Extension> {
        self.entries.iter().find(|e| e.suffix == suffix)
    }

    /// Whether the catalog lists the given suffix.
    pub fn contains(&self, suffix: &str) -> bool {
        self.get(suffix).is_some()
    }

    /// Baseline price for a suffix, falling back to [`DEFAULT_BASE_PRICE`]
    /// for extensions outside the catalog.
    pub fn base_price(&self, suffix: &str) -> f64 {
        self.get(suffix)
            .map(|e| e.base_price)
            .unwrap_or(DEFAULT_BASE_PRICE)
    }

    /// Resolve the extensions a request may iterate, in priority order.
    ///
    /// With no restriction the whole catalog is returned. A restriction
    /// keeps only catalog-listed suffixes, reordered so the primary
    /// extension still comes first. Unknown suffixes in the restriction
    /// are ignored here; filter validation rejects them earlier.
    pub fn ordered_subset(&self, restriction: Option<&[String]>) -> Vec<&Extension> {
        match restriction {
            None => self.entries.iter().collect(),
            Some(allowed) => self
                .entries
                .iter()
                .filter(|e| allowed.iter().any(|a| a == &e.suffix))
                .collect(),
        }
    }
}

impl Default for ExtensionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Split a fully qualified domain into its stem and extension.
///
/// The extension is everything from the last dot (e.g., "shop.example.io"
/// splits into "shop.example" and ".io"). Returns `None` when there is no
/// dot or either side is empty.
pub fn split_domain(domain: &str) -> Option<(&str, &str)> {
    let idx = domain.rfind('.')?;
    let (stem, ext) = domain.split_at(idx);
    if stem.is_empty() || ext.len() < 2 {
        return None;
    }
    Some((stem, ext))
}

/// Validate a fully qualified domain name.
///
/// Basic RFC-shape checks: total length, at least one dot, label lengths,
/// allowed characters, no leading/trailing dots or hyphens.
pub fn validate_domain(domain: &str) -> Result<(), crate::error::ScoutError> {
    let invalid = |reason: &str| crate::error::ScoutError::invalid_domain(domain, reason);

    if domain.is_empty() {
        return Err(invalid("domain cannot be empty"));
    }
    if domain.len() < 4 || domain.len() > 253 {
        return Err(invalid("domain length out of range"));
    }
    if !domain.contains('.') {
        return Err(invalid("domain must include an extension"));
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain cannot start or end with a dot"));
    }

    for label in domain.split('.') {
        if label.is_empty() || label.len() > 63 {
            return Err(invalid("label length out of range"));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(invalid("label cannot start or end with a hyphen"));
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(invalid("label contains invalid characters"));
        }
    }

    Ok(())
}
