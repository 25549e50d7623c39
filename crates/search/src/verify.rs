//! Quote verification.
//!
//! Every quote in an answer is reduced to a few word windows; a quote counts
//! as verified when one window appears (case-insensitively) in the
//! transcripts the answer was written from. Blockquote lines of unverified
//! quotes are followed by an [`UNVERIFIED_MARKER`] line.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};

pub const UNVERIFIED_MARKER: &str = "[unverified]";

const MIN_PHRASE_WORDS: usize = 8;
const MAX_PHRASE_WORDS: usize = 12;
const MIN_SHORT_QUOTE_WORDS: usize = 4;
const MAX_PHRASES: usize = 3;

static INLINE_QUOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]{20,})""#).expect("valid inline quote regex"));

fn blockquote_text(line: &str) -> Option<&str> {
    let stripped = line.trim();
    stripped
        .starts_with('>')
        .then(|| stripped.trim_start_matches(['>', ' ']).trim())
}

/// Quotes in `text`: each run of blockquote lines joined into one quote, then
/// every double-quoted span of at least 20 characters.
#[must_use]
pub fn extract_quotes(text: &str) -> Vec<String> {
    let mut quotes = Vec::new();
    let mut run: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        match blockquote_text(line) {
            Some(quoted) => run.push(quoted),
            None if !run.is_empty() => {
                quotes.push(run.join(" "));
                run.clear();
            }
            None => {}
        }
    }
    if !run.is_empty() {
        quotes.push(run.join(" "));
    }

    quotes.extend(
        INLINE_QUOTE_RE
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string()),
    );
    quotes
}

/// Word windows used to look a quote up.
///
/// Short quotes (up to 12 words) are used whole when they have at least 4
/// words. Longer ones yield up to 3 windows of at most 12 words, spread over
/// the quote.
#[must_use]
pub fn key_phrases(quote: &str) -> Vec<String> {
    let words: Vec<&str> = quote.split_whitespace().collect();
    let n = words.len();
    if n <= MAX_PHRASE_WORDS {
        return if n >= MIN_SHORT_QUOTE_WORDS {
            vec![words.join(" ")]
        } else {
            Vec::new()
        };
    }

    let step = ((n - MIN_PHRASE_WORDS) / 3).max(1);
    (0..=n - MIN_PHRASE_WORDS)
        .step_by(step)
        .take(MAX_PHRASES)
        .map(|start| words[start..(start + MAX_PHRASE_WORDS).min(n)].join(" "))
        .collect()
}

/// Mark blockquotes of `answer` that cannot be found in `transcripts`.
///
/// The answer comes back unchanged when there are no transcripts or every
/// quote checks out. Inline quotes are checked but never annotated.
#[must_use]
pub fn verify_quotes(answer: &str, transcripts: &BTreeMap<String, String>) -> String {
    if transcripts.is_empty() {
        return answer.to_string();
    }

    let haystack = transcripts
        .values()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase();

    let unverified: HashSet<String> = extract_quotes(answer)
        .into_iter()
        .filter(|quote| {
            let phrases = key_phrases(quote);
            !phrases.is_empty()
                && !phrases
                    .iter()
                    .any(|phrase| haystack.contains(&phrase.to_lowercase()))
        })
        .collect();

    if unverified.is_empty() {
        return answer.to_string();
    }
    log::warn!("{} quotes could not be found in the transcripts", unverified.len());

    let mut lines = Vec::new();
    for line in answer.split('\n') {
        lines.push(line);
        let Some(quoted) = blockquote_text(line) else {
            continue;
        };
        if !quoted.is_empty() && unverified.iter().any(|quote| quote.contains(quoted)) {
            lines.push(UNVERIFIED_MARKER);
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn transcripts(text: &str) -> BTreeMap<String, String> {
        BTreeMap::from([("2026-02-13_1501".to_string(), text.to_string())])
    }

    #[test]
    fn test_extract_blockquote_run() {
        let text = "Intro\n> first line\n>  second line\nAfter";
        assert_eq!(extract_quotes(text), vec!["first line second line"]);
    }

    #[test]
    fn test_extract_separate_runs_and_trailing_run() {
        let text = "> one\ntext\n> two";
        assert_eq!(extract_quotes(text), vec!["one", "two"]);
    }

    #[test]
    fn test_extract_inline_quotes() {
        let text = r#"She said "we will ship the beta in March" and "ok"."#;
        assert_eq!(extract_quotes(text), vec!["we will ship the beta in March"]);
    }

    #[test]
    fn test_nested_marker_is_stripped() {
        assert_eq!(extract_quotes(">> > deep quote"), vec!["deep quote"]);
    }

    #[test]
    fn test_key_phrases_short() {
        assert_eq!(key_phrases("too short"), Vec::<String>::new());
        assert_eq!(key_phrases("one two three four"), vec!["one two three four"]);
    }

    #[test]
    fn test_key_phrases_long_windows() {
        let quote = (1..=20).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let phrases = key_phrases(&quote);
        // step = (20 - 8) / 3 = 4, starts 0, 4, 8
        assert_eq!(phrases.len(), 3);
        assert!(phrases[0].starts_with("w1 "));
        assert!(phrases[0].ends_with(" w12"));
        assert!(phrases[1].starts_with("w5 "));
        assert!(phrases[2].starts_with("w9 "));
        assert!(phrases[2].ends_with(" w20"));
    }

    #[test]
    fn test_key_phrases_thirteen_words() {
        let quote = (1..=13).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let phrases = key_phrases(&quote);
        // step = 1, starts 0, 1, 2
        assert_eq!(phrases.len(), 3);
        assert!(phrases[2].starts_with("w3 "));
        assert!(phrases[2].ends_with(" w13"));
    }

    #[test]
    fn test_verified_quote_left_alone() {
        let answer = "Anna agreed.\n> We should move the launch to March";
        let result = verify_quotes(
            answer,
            &transcripts("[00:01] Anna: we should move the launch to March, honestly."),
        );
        assert_eq!(result, answer);
    }

    #[test]
    fn test_fabricated_quote_marked() {
        let answer = "Summary:\n> The budget was approved by everyone\nDone.";
        let result = verify_quotes(answer, &transcripts("We talked about hiring."));
        assert_eq!(
            result,
            "Summary:\n> The budget was approved by everyone\n[unverified]\nDone."
        );
    }

    #[test]
    fn test_every_line_of_unverified_run_marked() {
        let answer = "> The budget was approved\n> by every single person";
        let result = verify_quotes(answer, &transcripts("Nothing like that."));
        assert_eq!(
            result,
            "> The budget was approved\n[unverified]\n> by every single person\n[unverified]"
        );
    }

    #[test]
    fn test_unverified_inline_quote_not_annotated() {
        let answer = r#"He said "the budget was approved by everyone here" today."#;
        let result = verify_quotes(answer, &transcripts("Nothing like that."));
        assert_eq!(result, answer);
    }

    #[test]
    fn test_no_transcripts_returns_answer() {
        let answer = "> Made up words that nobody said";
        assert_eq!(verify_quotes(answer, &BTreeMap::new()), answer);
    }

    #[test]
    fn test_short_quotes_ignored() {
        let answer = "> yes indeed";
        assert_eq!(verify_quotes(answer, &transcripts("no")), answer);
    }
}
