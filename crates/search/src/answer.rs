use crate::error::Result;
use crate::prompts::{answer_prompt, ANSWER_SYSTEM};
use recall_chunker::{estimate_tokens, TokenBudget, ANSWER_OVERHEAD};
use recall_corpus::MeetingRecord;
use recall_llm::ChatClient;
use serde::Serialize;
use std::collections::BTreeMap;

/// Returned in place of a model answer when no transcript could be sent
pub const NO_TRANSCRIPT_MESSAGE: &str = "No transcript text available for the relevant meetings.";

/// Stage 2 output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub text: String,

    /// Relevant meetings left out, either without a transcript or over budget
    pub skipped: usize,
}

/// Stage 2: answer `question` from the transcripts of `relevant`, best-first.
///
/// Transcripts are added while they fit the answer budget; one that does not
/// fit is skipped and later, smaller ones are still tried. When nothing fits
/// the model is not called.
pub async fn answer_from_transcripts<C>(
    client: &C,
    question: &str,
    relevant: &[MeetingRecord],
    context_size: usize,
) -> Result<Answer>
where
    C: ChatClient + ?Sized,
{
    let budget = TokenBudget::from_context(context_size, ANSWER_OVERHEAD);
    let mut parts = Vec::new();
    let mut used = 0usize;
    let mut skipped = 0usize;

    for record in relevant {
        let Some(transcript) = record.read_transcript()? else {
            log::debug!("{}: no transcript", record.id);
            skipped += 1;
            continue;
        };

        let entry = format!("## [{}] {}\n{}", record.id, record.display_name, transcript);
        let tokens = estimate_tokens(&entry);
        if !budget.fits(used, tokens) {
            log::debug!(
                "{}: transcript of {} tokens does not fit ({}/{} used)",
                record.id,
                tokens,
                used,
                budget.tokens()
            );
            skipped += 1;
            continue;
        }

        used += tokens;
        parts.push(entry);
    }

    if parts.is_empty() {
        log::info!("No transcript fits the answer budget, skipping the model call");
        return Ok(Answer {
            text: NO_TRANSCRIPT_MESSAGE.to_string(),
            skipped,
        });
    }

    log::info!(
        "Answering from {} transcripts ({} tokens, {} skipped)",
        parts.len(),
        used,
        skipped
    );
    let prompt = answer_prompt(question, &parts.join("\n\n"));
    let text = client.chat(ANSWER_SYSTEM, &prompt, false).await?;

    Ok(Answer { text, skipped })
}

/// Transcript text of every record that has one, keyed by meeting id
pub fn load_transcripts(records: &[MeetingRecord]) -> Result<BTreeMap<String, String>> {
    let mut transcripts = BTreeMap::new();
    for record in records {
        if let Some(text) = record.read_transcript()? {
            transcripts.insert(record.id.clone(), text);
        }
    }
    Ok(transcripts)
}
