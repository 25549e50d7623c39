use crate::error::Result;
use crate::keywords::{extract_keywords, words};
use crate::progress::Progress;
use crate::prompts::{find_prompt, FIND_SYSTEM};
use crate::rank::rank;
use once_cell::sync::Lazy;
use recall_chunker::{chunk_by_budget, estimate_tokens, TokenBudget, RELEVANCE_OVERHEAD};
use recall_corpus::MeetingRecord;
use recall_llm::ChatClient;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;

static RELEVANT_OBJECT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\{[^{}]*"relevant"[^{}]*\}"#).expect("valid relevant-object regex")
});

static ARRAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[.*?\]").expect("valid array regex"));

/// Extract meeting ids from a Stage 1 reply.
///
/// Tries, in order: the whole reply as `{"relevant": [...]}`, the first
/// embedded object mentioning `"relevant"`, then the first bare array.
/// Returns `None` when nothing parses.
#[must_use]
pub fn parse_relevant_ids(response: &str) -> Option<Vec<String>> {
    if let Some(ids) = serde_json::from_str::<Value>(response)
        .ok()
        .and_then(|value| relevant_field(&value))
    {
        return Some(ids);
    }

    if let Some(ids) = RELEVANT_OBJECT_RE
        .find(response)
        .and_then(|m| serde_json::from_str::<Value>(m.as_str()).ok())
        .and_then(|value| relevant_field(&value))
    {
        return Some(ids);
    }

    ARRAY_RE
        .find(response)
        .and_then(|m| serde_json::from_str::<Value>(m.as_str()).ok())
        .and_then(|value| value.as_array().map(|items| stringify_ids(items)))
}

fn relevant_field(value: &Value) -> Option<Vec<String>> {
    value
        .as_object()?
        .get("relevant")?
        .as_array()
        .map(|items| stringify_ids(items))
}

fn stringify_ids(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

/// Stage 1: ask the model which meetings may answer `question`.
///
/// Summaries are sent in budget-sized batches. A batch whose reply cannot be
/// parsed counts entirely as relevant; ids the batch never showed are
/// dropped. When no batch names anything, meetings sharing a keyword with the
/// question are used instead. The result is ranked best-first.
pub async fn find_relevant<C>(
    client: &C,
    question: &str,
    records: &[MeetingRecord],
    context_size: usize,
    progress: &dyn Progress,
) -> Result<Vec<MeetingRecord>>
where
    C: ChatClient + ?Sized,
{
    let summaries = records
        .iter()
        .map(MeetingRecord::read_summary)
        .collect::<recall_corpus::Result<Vec<_>>>()?;

    let entries: Vec<String> = records
        .iter()
        .zip(&summaries)
        .map(|(record, summary)| format!("## [{}]\n{}", record.id, summary))
        .collect();

    let budget = TokenBudget::from_context(context_size, RELEVANCE_OVERHEAD);
    let chunks = chunk_by_budget(
        (0..entries.len()).collect(),
        budget,
        |&idx: &usize| estimate_tokens(&entries[idx]),
    );
    let total = chunks.len();
    log::debug!(
        "Relevance search: {} meetings in {} batches (budget {} tokens)",
        records.len(),
        total,
        budget.tokens()
    );

    let mut relevant_ids: HashSet<&str> = HashSet::new();
    for (i, chunk) in chunks.iter().enumerate() {
        if total > 1 {
            progress.update(&format!("Searching meetings (batch {}/{})", i + 1, total));
        }

        let known: HashSet<&str> = chunk
            .items()
            .iter()
            .map(|&idx| records[idx].id.as_str())
            .collect();
        let batch = chunk
            .items()
            .iter()
            .map(|&idx| entries[idx].as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let response = client
            .chat(FIND_SYSTEM, &find_prompt(question, &batch), true)
            .await?;

        match parse_relevant_ids(&response) {
            Some(ids) => {
                let before = relevant_ids.len();
                for id in &ids {
                    if let Some(&known_id) = known.get(id.as_str()) {
                        relevant_ids.insert(known_id);
                    }
                }
                log::debug!(
                    "Batch {}/{}: model named {} ids, {} new",
                    i + 1,
                    total,
                    ids.len(),
                    relevant_ids.len() - before
                );
            }
            None => {
                log::warn!(
                    "Batch {}/{}: unparseable relevance reply, keeping all {} meetings",
                    i + 1,
                    total,
                    known.len()
                );
                relevant_ids.extend(known);
            }
        }
    }

    if relevant_ids.is_empty() {
        let matches = keyword_matches(question, records, &summaries)?;
        if !matches.is_empty() {
            progress.update("Falling back to keyword search");
            log::info!(
                "Model found nothing relevant, keyword fallback matched {} meetings",
                matches.len()
            );
            return Ok(rank(question, matches));
        }
        log::info!("No relevant meetings found");
        return Ok(Vec::new());
    }

    let candidates: Vec<(MeetingRecord, String)> = records
        .iter()
        .zip(summaries)
        .filter(|(record, _)| relevant_ids.contains(record.id.as_str()))
        .map(|(record, summary)| (record.clone(), summary))
        .collect();
    log::info!("Relevance search kept {} of {} meetings", candidates.len(), records.len());

    Ok(rank(question, candidates))
}

/// Meetings whose summary, or failing that transcript, shares a keyword with
/// `question`. Unranked, in input order.
pub fn keyword_fallback(question: &str, records: &[MeetingRecord]) -> Result<Vec<MeetingRecord>> {
    let summaries = records
        .iter()
        .map(MeetingRecord::read_summary)
        .collect::<recall_corpus::Result<Vec<_>>>()?;
    Ok(keyword_matches(question, records, &summaries)?
        .into_iter()
        .map(|(record, _)| record)
        .collect())
}

fn keyword_matches(
    question: &str,
    records: &[MeetingRecord],
    summaries: &[String],
) -> Result<Vec<(MeetingRecord, String)>> {
    let keywords = extract_keywords(question);
    if keywords.is_empty() {
        return Ok(Vec::new());
    }

    let mut matches = Vec::new();
    for (record, summary) in records.iter().zip(summaries) {
        let hit = if shares_keyword(&keywords, summary) {
            true
        } else {
            match record.read_transcript()? {
                Some(transcript) => shares_keyword(&keywords, &transcript),
                None => false,
            }
        };
        if hit {
            matches.push((record.clone(), summary.clone()));
        }
    }
    Ok(matches)
}

fn shares_keyword(keywords: &HashSet<String>, text: &str) -> bool {
    let text_words = words(text);
    keywords.iter().any(|k| text_words.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_clean_json() {
        assert_eq!(
            parse_relevant_ids(r#"{"relevant": ["a", "b"]}"#),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_parse_json_in_prose() {
        let reply = "Sure! Here you go:\n{\"relevant\": [\"2026-02-13_1501\"]}\nHope that helps.";
        assert_eq!(
            parse_relevant_ids(reply),
            Some(vec!["2026-02-13_1501".to_string()])
        );
    }

    #[test]
    fn test_parse_bare_array() {
        assert_eq!(
            parse_relevant_ids("The meetings are [\"x\", \"y\"]."),
            Some(vec!["x".to_string(), "y".to_string()])
        );
    }

    #[test]
    fn test_parse_empty_relevant() {
        assert_eq!(parse_relevant_ids(r#"{"relevant": []}"#), Some(vec![]));
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert_eq!(parse_relevant_ids("I could not decide."), None);
        assert_eq!(parse_relevant_ids(""), None);
    }

    #[test]
    fn test_parse_object_without_relevant_falls_through() {
        assert_eq!(parse_relevant_ids(r#"{"meetings": 3}"#), None);
    }

    #[test]
    fn test_parse_non_string_ids_are_stringified() {
        assert_eq!(
            parse_relevant_ids(r#"{"relevant": [1, true, "z"]}"#),
            Some(vec!["1".to_string(), "true".to_string(), "z".to_string()])
        );
    }

    #[test]
    fn test_parse_wrong_relevant_type_uses_later_array() {
        // "relevant" is a string, so the object is rejected; the array wins
        let reply = r#"{"relevant": "none"} but maybe ["q"]"#;
        assert_eq!(parse_relevant_ids(reply), Some(vec!["q".to_string()]));
    }
}
