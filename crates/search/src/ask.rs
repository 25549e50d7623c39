use crate::answer::{answer_from_transcripts, load_transcripts, Answer};
use crate::error::Result;
use crate::progress::Progress;
use crate::relevance::find_relevant;
use crate::verify::verify_quotes;
use recall_corpus::{discover, MeetingRecord};
use recall_llm::ChatClient;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Context window assumed when neither the caller nor the backend provides one
pub const DEFAULT_CONTEXT_SIZE: usize = 8192;

/// Per-query knobs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AskOptions {
    /// Inclusive `YYYY-MM-DD` lower bound on meeting dates
    pub since: Option<String>,

    /// Keep only the newest `limit` meetings (0 = no limit)
    pub limit: Option<usize>,

    /// Model context window in tokens; `None` or 0 asks the backend
    pub context_size: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AskOutcome {
    NoMeetings,
    NoRelevant,
    Answered {
        relevant: Vec<MeetingRecord>,
        answer: Answer,
    },
}

/// Result of one query; `Display` renders the user-facing report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AskReport {
    /// Meetings considered in Stage 1
    pub searched: usize,

    /// Meeting folders without a summary
    pub skipped_summaries: usize,

    pub outcome: AskOutcome,
}

/// Run the full pipeline for `question` over the meetings under `root`.
pub async fn ask<C>(
    client: &C,
    root: &Path,
    question: &str,
    options: &AskOptions,
    progress: &dyn Progress,
) -> Result<AskReport>
where
    C: ChatClient + ?Sized,
{
    let found = discover(root, options.since.as_deref(), options.limit)?;
    let searched = found.records.len();
    let skipped_summaries = found.skipped;

    if found.records.is_empty() {
        return Ok(AskReport {
            searched,
            skipped_summaries,
            outcome: AskOutcome::NoMeetings,
        });
    }

    let context_size = resolve_context_size(client, options.context_size).await;
    log::debug!("Using a context window of {context_size} tokens");

    progress.update(&format!("Searching {searched} meetings"));
    let relevant = find_relevant(client, question, &found.records, context_size, progress).await?;
    if relevant.is_empty() {
        return Ok(AskReport {
            searched,
            skipped_summaries,
            outcome: AskOutcome::NoRelevant,
        });
    }

    progress.update("Analyzing transcripts");
    let mut answer = answer_from_transcripts(client, question, &relevant, context_size).await?;
    answer.text = verify_quotes(&answer.text, &load_transcripts(&relevant)?);

    Ok(AskReport {
        searched,
        skipped_summaries,
        outcome: AskOutcome::Answered { relevant, answer },
    })
}

async fn resolve_context_size<C>(client: &C, requested: Option<usize>) -> usize
where
    C: ChatClient + ?Sized,
{
    if let Some(size) = requested.filter(|&size| size > 0) {
        return size;
    }
    match client.context_window().await {
        Some(size) if size > 0 => size,
        _ => DEFAULT_CONTEXT_SIZE,
    }
}

impl fmt::Display for AskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.outcome == AskOutcome::NoMeetings {
            return writeln!(f, "No meetings found.");
        }

        if self.skipped_summaries > 0 {
            writeln!(
                f,
                "({} meetings without summaries were skipped)",
                self.skipped_summaries
            )?;
        }

        match &self.outcome {
            AskOutcome::NoMeetings => Ok(()),
            AskOutcome::NoRelevant => writeln!(f, "No relevant meetings found for your question."),
            AskOutcome::Answered { relevant, answer } => {
                writeln!(f, "Found {} relevant meetings:", relevant.len())?;
                for record in relevant {
                    writeln!(f, "  - {}", record.display_name)?;
                }
                if answer.skipped > 0 {
                    writeln!(
                        f,
                        "({} transcripts did not fit within context budget, they were skipped)",
                        answer.skipped
                    )?;
                }
                writeln!(f, "{}", answer.text)
            }
        }
    }
}
