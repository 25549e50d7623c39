use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]+").expect("valid word regex"));

/// Common function words ignored by keyword matching
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "shall", "should", "may", "might", "can", "could", "of",
    "in", "to", "for", "on", "with", "at", "by", "from", "about", "into", "through", "during",
    "before", "after", "above", "below", "between", "out", "off", "over", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how", "all", "each",
    "every", "both", "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only",
    "own", "same", "so", "than", "too", "very", "and", "but", "or", "if", "what", "which", "who",
    "whom", "this", "that", "these", "those", "i", "me", "my", "myself", "we", "our", "ours",
    "ourselves", "you", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "her", "hers", "herself", "it", "its", "itself", "they", "them", "their", "theirs",
    "themselves", "am", "s", "t", "d", "ll", "ve", "re",
];

static STOP_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Lowercase alphabetic words of `text`
#[must_use]
pub fn words(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Words of `text` minus stop words. A question made only of stop words keeps
/// all of them, so that it can still match something.
#[must_use]
pub fn extract_keywords(text: &str) -> HashSet<String> {
    let all = words(text);
    let filtered: HashSet<String> = all
        .iter()
        .filter(|word| !STOP_SET.contains(word.as_str()))
        .cloned()
        .collect();
    if filtered.is_empty() {
        all
    } else {
        filtered
    }
}
