//! Keyword extraction and name variation generation.
//!
//! The first two pipeline stages: normalize a free-text query into tokens,
//! then expand tokens into a larger set of candidate name stems via a fixed
//! prefix/suffix vocabulary and pairwise combination.
//!
//! Generation order matters. Downstream selection consumes stems in the
//! order produced here and stops once its result budget is reached, so
//! earlier stems (raw tokens before affixed forms, affixed forms before
//! pair combinations) are systematically favored.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Prefixes tried before each token when generating variations.
pub const STEM_PREFIXES: [&str; 10] = [
    "get", "my", "the", "best", "top", "pro", "smart", "quick", "fast", "easy",
];

/// Suffixes tried after each token when generating variations.
pub const STEM_SUFFIXES: [&str; 10] = [
    "hub", "lab", "pro", "zone", "spot", "base", "link", "space", "world", "place",
];

fn non_word_pattern() -> &'static Regex {
    static NON_WORD: OnceLock<Regex> = OnceLock::new();
    NON_WORD.get_or_init(|| Regex::new(r"[^a-z0-9\s]").expect("static pattern"))
}

/// Extract keyword tokens from a raw query string.
///
/// Lowercases, strips everything that is not alphanumeric or whitespace,
/// splits on whitespace, and drops empty fragments. Duplicates are
/// preserved here; [`generate_variations`] deduplicates the final stem set.
///
/// An empty return value means the query had no usable content; callers
/// must reject the request rather than proceed.
pub fn extract_keywords(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let cleaned = non_word_pattern().replace_all(&lowered, "");

    cleaned
        .split_whitespace()
        .map(|word| word.to_string())
        .collect()
}

/// Validate a candidate stem (a name fragment without the TLD).
///
/// Minimum two characters, alphanumeric plus interior hyphens only.
pub(crate) fn is_valid_stem(stem: &str) -> bool {
    if stem.len() < 2 {
        return false;
    }

    if stem.starts_with('-') || stem.ends_with('-') {
        return false;
    }

    stem.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Expand keyword tokens into an ordered, deduplicated stem set.
///
/// For each token: the raw token, then every `prefix+token`, then every
/// `token+suffix`. Then for every unordered pair of distinct tokens, both
/// concatenation orders. First occurrence wins on duplicates. No cap is
/// applied here; bounding the result set is the selector's job.
pub fn generate_variations(tokens: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut stems: Vec<String> = Vec::new();

    fn push(stem: String, seen: &mut HashSet<String>, stems: &mut Vec<String>) {
        if is_valid_stem(&stem) && seen.insert(stem.clone()) {
            stems.push(stem);
        }
    }

    for token in tokens {
        push(token.clone(), &mut seen, &mut stems);

        for prefix in STEM_PREFIXES {
            push(format!("{}{}", prefix, token), &mut seen, &mut stems);
        }

        for suffix in STEM_SUFFIXES {
            push(format!("{}{}", token, suffix), &mut seen, &mut stems);
        }
    }

    for i in 0..tokens.len() {
        for j in (i + 1)..tokens.len() {
            push(
                format!("{}{}", tokens[i], tokens[j]),
                &mut seen,
                &mut stems,
            );
            push(
                format!("{}{}", tokens[j], tokens[i]),
                &mut seen,
                &mut stems,
            );
        }
    }

    stems
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Extraction ──────────────────────────────────────────────────

    #[test]
    fn test_extract_basic() {
        assert_eq!(extract_keywords("tech startup"), vec!["tech", "startup"]);
    }

    #[test]
    fn test_extract_lowercases() {
        assert_eq!(extract_keywords("Tech STARTUP"), vec!["tech", "startup"]);
    }

    #[test]
    fn test_extract_strips_punctuation() {
        assert_eq!(
            extract_keywords("tech-startup! (2024 edition)"),
            vec!["techstartup", "2024", "edition"]
        );
    }

    #[test]
    fn test_extract_collapses_whitespace() {
        assert_eq!(extract_keywords("  tech \t  startup  "), vec!["tech", "startup"]);
    }

    #[test]
    fn test_extract_preserves_duplicates() {
        assert_eq!(extract_keywords("go go gadget"), vec!["go", "go", "gadget"]);
    }

    #[test]
    fn test_extract_empty_inputs() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("!!! ??? ---").is_empty());
        assert!(extract_keywords("   ").is_empty());
    }

    #[test]
    fn test_extract_unicode_punctuation_removed() {
        assert_eq!(extract_keywords("café crème"), vec!["caf", "crme"]);
    }

    // ── Variations ──────────────────────────────────────────────────

    #[test]
    fn test_variations_single_token_count() {
        let tokens = vec!["cloud".to_string()];
        let stems = generate_variations(&tokens);
        // 1 raw + 10 prefixed + 10 suffixed, no pairs
        assert_eq!(stems.len(), 21);
        assert_eq!(stems[0], "cloud");
        assert!(stems.contains(&"getcloud".to_string()));
        assert!(stems.contains(&"cloudhub".to_string()));
    }

    #[test]
    fn test_variations_pair_combinations_both_orders() {
        let tokens = vec!["tech".to_string(), "startup".to_string()];
        let stems = generate_variations(&tokens);
        assert!(stems.contains(&"techstartup".to_string()));
        assert!(stems.contains(&"startuptech".to_string()));
    }

    #[test]
    fn test_variations_lower_bound_before_dedup() {
        // n + 2n*10 + 2*C(n,2) distinct stems for tokens that share no
        // affixed collisions
        let tokens = vec!["alpha".to_string(), "bravo".to_string(), "delta".to_string()];
        let stems = generate_variations(&tokens);
        let n = 3;
        assert_eq!(stems.len(), n + 2 * n * 10 + n * (n - 1));
    }

    #[test]
    fn test_variations_no_duplicates() {
        // "pro" as a token collides with both the "pro" prefix and suffix
        let tokens = vec!["pro".to_string(), "link".to_string()];
        let stems = generate_variations(&tokens);
        let unique: HashSet<&String> = stems.iter().collect();
        assert_eq!(unique.len(), stems.len());
    }

    #[test]
    fn test_variations_first_occurrence_order() {
        let tokens = vec!["tech".to_string()];
        let stems = generate_variations(&tokens);
        // Raw token first, then prefixed in vocabulary order
        assert_eq!(stems[0], "tech");
        assert_eq!(stems[1], "gettech");
        assert_eq!(stems[2], "mytech");
        // Suffixed forms follow all prefixed forms
        assert_eq!(stems[11], "techhub");
    }

    #[test]
    fn test_variations_duplicate_tokens_collapse() {
        let tokens = vec!["go".to_string(), "go".to_string()];
        let stems = generate_variations(&tokens);
        // Second "go" contributes nothing new; pair "gogo" appears once
        assert_eq!(stems.iter().filter(|s| *s == "go").count(), 1);
        assert_eq!(stems.iter().filter(|s| *s == "gogo").count(), 1);
    }

    #[test]
    fn test_variations_single_char_token_dropped_raw_but_affixed() {
        let tokens = vec!["a".to_string()];
        let stems = generate_variations(&tokens);
        // "a" alone is too short to be a stem, but "geta" etc. are fine
        assert!(!stems.contains(&"a".to_string()));
        assert!(stems.contains(&"geta".to_string()));
    }

    #[test]
    fn test_is_valid_stem() {
        assert!(is_valid_stem("cloud"));
        assert!(is_valid_stem("tech-hub"));
        assert!(is_valid_stem("app42"));

        assert!(!is_valid_stem(""));
        assert!(!is_valid_stem("a"));
        assert!(!is_valid_stem("-cloud"));
        assert!(!is_valid_stem("cloud-"));
        assert!(!is_valid_stem("cloud.com"));
    }
}
