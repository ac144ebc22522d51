use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::core::lexicon::Lexicon;
use crate::models::{PreprocessedQuery, PriceRange};

/// Guest counts outside this range are treated as noise
const GUEST_COUNT_MIN: u32 = 10;
const GUEST_COUNT_MAX: u32 = 10_000;

/// Typo corrections require an edit distance strictly below this
const MAX_CORRECTION_DISTANCE: usize = 3;

/// Words this short are never corrected ("dj", "bbq")
const MIN_CORRECTION_LEN: usize = 4;

/// Synonyms appended per matching token
const MAX_SYNONYMS_PER_WORD: usize = 2;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("invalid non-word pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace pattern"));
static PRICE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\$\s*(\d[\d,]*)\s*(?:-|to)\s*\$\s*(\d[\d,]*)").expect("invalid price pattern")
});
static PRICE_MAX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:under|less\s+than|below|max)\s*\$\s*(\d[\d,]*)")
        .expect("invalid price pattern")
});
static PRICE_MIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:over|more\s+than|above|min)\s*\$\s*(\d[\d,]*)")
        .expect("invalid price pattern")
});
static GUEST_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    // No lookbehind in the regex crate: a leading group excludes digits that
    // belong to a larger number or a dollar amount
    Regex::new(r"(?i)(?:^|[^$\d])(\d[\d,]*)\s*(?:people|guests|attendees|persons)?\b")
        .expect("invalid guest pattern")
});
static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    // Capitalized phrase after in/near/at, optionally ending in a state
    // abbreviation. The phrase stops at the first lowercase token, which
    // covers the boundary words (for/with/under/over) and digits.
    Regex::new(r"\b(?:in|near|at)\s+([A-Z][a-zA-Z]*(?:\s+[A-Z][a-zA-Z]*)*(?:,?\s+[A-Z]{2}\b)?)")
        .expect("invalid location pattern")
});

/// Deterministic query preprocessor
///
/// Normalizes text, corrects typos against the domain vocabulary, appends
/// synonyms, and extracts price/guest/location entities from the original
/// query. Pure: the same input always yields the same output.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    lexicon: Arc<Lexicon>,
}

impl Preprocessor {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Run the full preprocessing pass. Never fails; entities that are not
    /// present in the query come back as `None`.
    pub fn preprocess(&self, raw_query: &str) -> PreprocessedQuery {
        let normalized = normalize(raw_query);
        let corrected = self.correct_typos(&normalized);
        let with_synonyms = self.expand_synonyms(&corrected);

        PreprocessedQuery {
            original: raw_query.to_string(),
            normalized,
            corrected,
            with_synonyms,
            price_range: extract_price_range(raw_query),
            guest_count: extract_guest_count(raw_query),
            location: extract_location(raw_query),
        }
    }

    /// Replace each word longer than 3 characters with the closest
    /// vocabulary entry at edit distance 1 or 2. Ties resolve to the
    /// earliest vocabulary entry; exact matches are kept as-is.
    fn correct_typos(&self, normalized: &str) -> String {
        normalized
            .split_whitespace()
            .map(|word| self.correct_word(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn correct_word(&self, word: &str) -> String {
        if word.chars().count() < MIN_CORRECTION_LEN {
            return word.to_string();
        }

        let mut best: Option<(&str, usize)> = None;
        for entry in self.lexicon.vocabulary() {
            let distance = levenshtein(word, entry);
            if distance == 0 {
                return word.to_string();
            }
            if distance < MAX_CORRECTION_DISTANCE
                && best.map(|(_, d)| distance < d).unwrap_or(true)
            {
                best = Some((entry.as_str(), distance));
            }
        }

        match best {
            Some((entry, _)) => entry.to_string(),
            None => word.to_string(),
        }
    }

    /// Append up to the first two synonyms for each token, then drop
    /// duplicate tokens keeping first-seen order.
    fn expand_synonyms(&self, corrected: &str) -> String {
        let mut expanded: Vec<&str> = Vec::new();
        for word in corrected.split_whitespace() {
            expanded.push(word);
            if let Some(synonyms) = self.lexicon.synonyms_for(word) {
                for synonym in synonyms.iter().take(MAX_SYNONYMS_PER_WORD) {
                    expanded.push(synonym.as_str());
                }
            }
        }

        let mut seen = HashSet::new();
        expanded
            .into_iter()
            .filter(|word| seen.insert(*word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Lowercase, strip everything but word characters/whitespace/hyphens,
/// collapse whitespace, trim.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    let collapsed = WHITESPACE.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// Classic Levenshtein edit distance
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b_len {
        matrix[0][j] = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}

/// Extract a price range from the original query text.
///
/// "$A-$B" / "$A to $B" beats "under $A", which beats "over $A".
pub fn extract_price_range(text: &str) -> Option<PriceRange> {
    if let Some(caps) = PRICE_RANGE.captures(text) {
        let min = parse_amount(&caps[1])?;
        let max = parse_amount(&caps[2])?;
        return Some(PriceRange {
            min: Some(min),
            max: Some(max),
        });
    }
    if let Some(caps) = PRICE_MAX.captures(text) {
        return Some(PriceRange {
            min: None,
            max: Some(parse_amount(&caps[1])?),
        });
    }
    if let Some(caps) = PRICE_MIN.captures(text) {
        return Some(PriceRange {
            min: Some(parse_amount(&caps[1])?),
            max: None,
        });
    }
    None
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse::<f64>().ok()
}

/// Extract a guest count from the original query text.
///
/// Takes the first integer (optionally suffixed with people/guests/
/// attendees/persons) that falls inside [10, 10000]; anything outside the
/// range is ignored.
pub fn extract_guest_count(text: &str) -> Option<u32> {
    for caps in GUEST_COUNT.captures_iter(text) {
        let Ok(count) = caps[1].replace(',', "").parse::<u32>() else {
            continue;
        };
        if (GUEST_COUNT_MIN..=GUEST_COUNT_MAX).contains(&count) {
            return Some(count);
        }
    }
    None
}

/// Extract a location phrase from the original query text.
///
/// Best-effort heuristic: a run of capitalized words after in/near/at,
/// optionally ending with a state abbreviation. Boundary words (for, with,
/// under, over) and digits are lowercase or non-alphabetic, so they end the
/// run naturally. Known to over- and under-match; callers treat this as a
/// weak signal.
pub fn extract_location(text: &str) -> Option<String> {
    LOCATION
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn preprocessor() -> Preprocessor {
        Preprocessor::new(Arc::new(Lexicon::default_domain()))
    }

    #[test]
    fn test_preprocess_is_deterministic() {
        let pre = preprocessor();
        let first = pre.preprocess("Rustic barn weding for 150 people under $5000 in Austin TX");
        let second = pre.preprocess("Rustic barn weding for 150 people under $5000 in Austin TX");
        assert_eq!(first, second);
    }

    #[test]
    fn test_normalize_strips_punctuation_and_collapses_whitespace() {
        assert_eq!(normalize("  Fancy,   Wedding! Venue?  "), "fancy wedding venue");
        // Hyphens survive normalization
        assert_eq!(normalize("photo-booth"), "photo-booth");
    }

    #[test]
    fn test_typo_correction_seafod() {
        let pre = preprocessor();
        let result = pre.preprocess("seafod catering");
        assert_eq!(result.corrected, "seafood catering");
    }

    #[test]
    fn test_short_words_never_corrected() {
        let pre = preprocessor();
        // "dj" is distance 2 from several entries but too short to touch
        let result = pre.preprocess("dj for party");
        assert!(result.corrected.starts_with("dj"));
    }

    #[test]
    fn test_exact_vocabulary_word_unchanged() {
        let pre = preprocessor();
        let result = pre.preprocess("vegan catering");
        assert_eq!(result.corrected, "vegan catering");
    }

    #[test]
    fn test_correction_tie_resolves_to_earliest_entry() {
        let lexicon = Lexicon::new(
            vec!["barn".to_string(), "band".to_string()],
            HashMap::new(),
            vec![],
            vec![],
        );
        let pre = Preprocessor::new(Arc::new(lexicon));
        // "bann" is distance 1 from both "barn" and "band"
        let result = pre.preprocess("bann");
        assert_eq!(result.corrected, "barn");
    }

    #[test]
    fn test_words_beyond_distance_two_kept() {
        let pre = preprocessor();
        let result = pre.preprocess("zzzzzzz catering");
        assert_eq!(result.corrected, "zzzzzzz catering");
    }

    #[test]
    fn test_synonym_expansion_appends_first_two() {
        let pre = preprocessor();
        let result = pre.preprocess("wedding venue");
        let tokens: Vec<&str> = result.with_synonyms.split_whitespace().collect();
        assert_eq!(
            tokens,
            vec!["wedding", "marriage", "nuptials", "venue", "location", "space"]
        );
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        let pre = preprocessor();
        let result = pre.preprocess("wedding wedding venue wedding");
        let tokens: Vec<&str> = result.with_synonyms.split_whitespace().collect();
        assert_eq!(
            tokens,
            vec!["wedding", "marriage", "nuptials", "venue", "location", "space"]
        );
    }

    #[test]
    fn test_price_under() {
        let range = extract_price_range("catering under $5000").unwrap();
        assert_eq!(range.min, None);
        assert_eq!(range.max, Some(5000.0));
    }

    #[test]
    fn test_price_range_with_to() {
        let range = extract_price_range("venue $2000 to $5000").unwrap();
        assert_eq!(range.min, Some(2000.0));
        assert_eq!(range.max, Some(5000.0));
    }

    #[test]
    fn test_price_range_with_dash_and_commas() {
        let range = extract_price_range("packages $2,500-$4,000").unwrap();
        assert_eq!(range.min, Some(2500.0));
        assert_eq!(range.max, Some(4000.0));
    }

    #[test]
    fn test_price_over() {
        let range = extract_price_range("premium options over $1000").unwrap();
        assert_eq!(range.min, Some(1000.0));
        assert_eq!(range.max, None);
    }

    #[test]
    fn test_price_absent() {
        assert_eq!(extract_price_range("garden party catering"), None);
    }

    #[test]
    fn test_guest_count_basic() {
        assert_eq!(extract_guest_count("150 people"), Some(150));
    }

    #[test]
    fn test_guest_count_below_floor() {
        assert_eq!(extract_guest_count("5 people"), None);
    }

    #[test]
    fn test_guest_count_above_ceiling() {
        assert_eq!(extract_guest_count("for 99999 guests"), None);
    }

    #[test]
    fn test_guest_count_skips_dollar_amounts() {
        // 5000 belongs to the price, not the guest count
        assert_eq!(extract_guest_count("wedding under $5000 for 120 guests"), Some(120));
    }

    #[test]
    fn test_location_simple() {
        assert_eq!(
            extract_location("wedding in San Diego for 100 guests"),
            Some("San Diego".to_string())
        );
    }

    #[test]
    fn test_location_with_state_abbreviation() {
        assert_eq!(
            extract_location("venue near Austin TX under $3000"),
            Some("Austin TX".to_string())
        );
    }

    #[test]
    fn test_location_requires_capitalization() {
        assert_eq!(extract_location("venue in texas"), None);
    }

    #[test]
    fn test_levenshtein_known_distances() {
        assert_eq!(levenshtein("seafod", "seafood"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_entities_extracted_from_original_text() {
        let pre = preprocessor();
        let result = pre.preprocess("Barbecue in Portland for 80 guests under $2,000");
        assert_eq!(result.location, Some("Portland".to_string()));
        assert_eq!(result.guest_count, Some(80));
        let range = result.price_range.unwrap();
        assert_eq!(range.max, Some(2000.0));
    }
}
