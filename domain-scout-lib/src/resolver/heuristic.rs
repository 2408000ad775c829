//! Heuristic estimate stage: structural availability scoring.
//!
//! The cascade terminator. When neither an authoritative lookup nor a
//! network probe is feasible, availability is estimated from the shape of
//! the name itself. This is explicitly a labeled guess, not a ground-truth
//! check; results carry the "Estimated (Heuristic)" source so callers can
//! tell.
//!
//! The jitter term is drawn from a PRNG seeded with a configured base seed
//! mixed with the domain name, so a given deployment produces the same
//! verdict for the same name on every call. Tests pin the seed.

use crate::catalog::split_domain;
use crate::error::ScoutError;
use crate::resolver::ResolveStrategy;
use crate::types::AvailabilityResult;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hash::{Hash, Hasher};

/// Source label for heuristic estimates.
pub const HEURISTIC_SOURCE: &str = "Estimated (Heuristic)";

/// Source label for names containing a well-known brand.
pub const BRAND_SOURCE: &str = "Registered (Well-Known Brand)";

/// Names containing any of these substrings are treated as certainly
/// taken, with probability 1, no jitter involved.
pub const WELL_KNOWN_BRANDS: &[&str] = &[
    "google",
    "facebook",
    "amazon",
    "apple",
    "microsoft",
    "netflix",
    "youtube",
    "instagram",
    "twitter",
    "linkedin",
    "paypal",
    "ebay",
    "walmart",
    "spotify",
];

/// Common dictionary words: names containing them are more likely taken.
const DICTIONARY_WORDS: &[&str] = &[
    "app", "web", "shop", "tech", "online", "store", "cloud", "data", "news", "blog", "game",
    "music", "photo", "video", "food", "travel", "health", "money",
];

/// Extensions common enough that presence adds no availability signal.
const COMMON_EXTENSIONS: &[&str] = &[".com", ".net", ".org"];

/// Threshold the availability score must reach.
const AVAILABLE_THRESHOLD: f64 = 0.5;

/// Structural availability estimator.
pub struct HeuristicScorer {
    seed: u64,
}

impl HeuristicScorer {
    /// Create a scorer with the given jitter base seed.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Estimate availability for one fully-qualified domain name.
    pub fn assess(&self, domain: &str) -> AvailabilityResult {
        let (stem, extension) = split_domain(domain).unwrap_or((domain, ""));

        if WELL_KNOWN_BRANDS.iter().any(|brand| stem.contains(brand)) {
            return AvailabilityResult {
                domain: domain.to_string(),
                available: false,
                source: BRAND_SOURCE.to_string(),
                price: None,
                premium: false,
            };
        }

        let mut score: f64 = 0.6;

        if stem.len() <= 6 {
            score += 0.08;
        }
        if stem.contains('-') {
            score += 0.12;
        }
        if stem.chars().any(|c| c.is_ascii_digit()) {
            score += 0.08;
        }
        if !COMMON_EXTENSIONS.contains(&extension) {
            score += 0.15;
        }
        if extension == ".com" {
            score -= 0.15;
        }
        if DICTIONARY_WORDS.iter().any(|word| stem.contains(word)) {
            score -= 0.1;
        }

        // Jitter in [-0.2, 0.2], reproducible per (seed, domain)
        let mut rng = StdRng::seed_from_u64(self.seed ^ domain_hash(domain));
        let jitter = rng.random::<f64>() * 0.4 - 0.2;

        AvailabilityResult {
            domain: domain.to_string(),
            available: score + jitter >= AVAILABLE_THRESHOLD,
            source: HEURISTIC_SOURCE.to_string(),
            price: None,
            premium: false,
        }
    }
}

#[async_trait]
impl ResolveStrategy for HeuristicScorer {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    async fn attempt(&self, domain: &str) -> Result<Option<AvailabilityResult>, ScoutError> {
        Ok(Some(self.assess(domain)))
    }
}

/// Deterministic hash of the domain name.
///
/// `DefaultHasher::new()` uses fixed keys, so the value is stable across
/// processes, as required for reproducible verdicts.
fn domain_hash(domain: &str) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    domain.hash(&mut hasher);
    hasher.finish()
}
