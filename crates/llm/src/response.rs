use once_cell::sync::Lazy;
use regex::Regex;

static THINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<think>[\s\S]*?</think>\s*").expect("valid think regex"));
static ORPHAN_THINK_CLOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[\s\S]*?</think>\s*").expect("valid think regex"));

/// Strip reasoning blocks (`<think>…</think>`) that some local models emit.
#[must_use]
pub fn clean_response(text: &str) -> String {
    let cleaned = THINK_RE.replace_all(text, "");
    let cleaned = cleaned.trim();
    if cleaned.to_lowercase().contains("</think>") {
        return ORPHAN_THINK_CLOSE_RE.replace(cleaned, "").trim().to_string();
    }
    cleaned.to_string()
}
