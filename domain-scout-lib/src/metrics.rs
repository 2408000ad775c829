//! Domain quality metrics.
//!
//! Structural scoring for a candidate name: SEO friendliness, brandability,
//! memorability, typability, and a rough keyword category. All scores are
//! 0-100 and computed purely from the name itself; no external data.

use crate::catalog::split_domain;
use serde::{Deserialize, Serialize};

/// Quality metrics for one domain name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainMetrics {
    /// Stem length in characters (extension excluded)
    pub length: usize,
    pub seo_score: u32,
    pub brandability: u32,
    pub memorability: u32,
    /// No hyphens and no digits
    pub is_typable: bool,
    pub has_hyphens: bool,
    pub has_digits: bool,
    pub category: String,
}

const COMMON_WORDS: &[&str] = &[
    "app", "web", "tech", "hub", "pro", "plus", "best", "top", "smart", "quick", "easy", "fast",
    "cool", "new", "good", "great", "super", "ultra", "mega",
];

/// Compute quality metrics for a fully qualified domain name.
pub fn calculate_metrics(domain: &str) -> DomainMetrics {
    let stem = split_domain(domain).map(|(stem, _)| stem).unwrap_or(domain);

    DomainMetrics {
        length: stem.len(),
        seo_score: seo_score(stem),
        brandability: brandability(stem),
        memorability: memorability(stem),
        is_typable: !stem.contains('-') && !stem.chars().any(|c| c.is_ascii_digit()),
        has_hyphens: stem.contains('-'),
        has_digits: stem.chars().any(|c| c.is_ascii_digit()),
        category: categorize(stem).to_string(),
    }
}

fn clamp_score(score: i32) -> u32 {
    score.clamp(0, 100) as u32
}

fn contains_common_word(stem: &str) -> bool {
    COMMON_WORDS.iter().any(|word| stem.contains(word))
}

fn seo_score(stem: &str) -> u32 {
    let mut score: i32 = 50;

    // 8-15 characters is the sweet spot for search snippets
    match stem.len() {
        8..=15 => score += 20,
        0..=7 => score += 10,
        21.. => score -= 20,
        _ => {}
    }

    if !stem.contains('-') {
        score += 10;
    }
    if !stem.chars().any(|c| c.is_ascii_digit()) {
        score += 10;
    }
    if contains_common_word(stem) {
        score += 10;
    }

    clamp_score(score)
}

fn brandability(stem: &str) -> u32 {
    let mut score: i32 = 50;

    match stem.len() {
        0..=8 => score += 25,
        9..=12 => score += 15,
        _ => score -= 10,
    }

    // Pronounceable names sit around 30-50% vowels
    let vowels = stem.chars().filter(|c| "aeiou".contains(*c)).count();
    if stem.is_empty() {
        return clamp_score(score);
    }
    let vowel_ratio = vowels as f64 / stem.len() as f64;
    if (0.3..=0.5).contains(&vowel_ratio) {
        score += 15;
    }

    if !stem.chars().any(|c| c.is_ascii_digit()) {
        score += 10;
    }
    if !stem.contains('-') {
        score += 10;
    }

    clamp_score(score)
}

fn memorability(stem: &str) -> u32 {
    let mut score: i32 = 50;

    match stem.len() {
        0..=6 => score += 30,
        7..=10 => score += 20,
        11..=15 => score += 10,
        _ => {}
    }

    let has_repeating = stem
        .as_bytes()
        .windows(2)
        .any(|pair| pair[0] == pair[1]);
    if has_repeating {
        score += 15;
    }

    if contains_common_word(stem) {
        score += 10;
    }

    clamp_score(score)
}

const CATEGORIES: &[(&str, &[&str])] = &[
    ("tech", &["tech", "app", "web", "digital", "online", "cyber", "net", "soft", "code", "dev"]),
    ("business", &["biz", "pro", "corp", "company", "enterprise", "solutions", "services", "group"]),
    ("lifestyle", &["life", "style", "living", "home", "family", "personal", "daily", "wellness"]),
    ("creative", &["art", "design", "creative", "studio", "media", "photo", "video", "music"]),
    ("health", &["health", "fit", "wellness", "medical", "care", "therapy", "nutrition"]),
    ("education", &["learn", "edu", "school", "training", "course", "academy", "knowledge"]),
    ("finance", &["finance", "money", "invest", "bank", "pay", "budget", "wealth", "fund"]),
    ("travel", &["travel", "trip", "vacation", "journey", "explore", "adventure", "tour"]),
    ("food", &["food", "recipe", "cook", "kitchen", "restaurant", "cafe", "meal", "taste"]),
    ("shopping", &["shop", "store", "market", "buy", "sell", "deal", "discount", "sale"]),
];

fn categorize(stem: &str) -> &'static str {
    for (category, keywords) in CATEGORIES {
        if keywords.iter().any(|keyword| stem.contains(keyword)) {
            return category;
        }
    }
    "general"
}
