//! Prompt templates for both stages.

pub const FIND_SYSTEM: &str = "You are a search assistant for a personal archive of meeting notes. \
You decide which meetings are relevant to a question, using only the meeting summaries provided. \
You reply with JSON only.";

pub const ANSWER_SYSTEM: &str = "You are a meeting research assistant. \
You answer questions using only the meeting transcripts provided, and you quote them verbatim.";

/// Stage 1 prompt: the question plus a batch of `## [id]` summary entries.
#[must_use]
pub fn find_prompt(question: &str, summaries: &str) -> String {
    format!(
        "Question: {question}\n\n\
Below are summaries of past meetings. Each summary starts with a header containing the meeting ID \
in square brackets.\n\n\
Return every meeting that could help answer the question. Prefer including a meeting over missing one.\n\
Respond with a JSON object of the form {{\"relevant\": [\"<meeting ID>\", ...]}}, using the IDs exactly \
as written inside the brackets. Return {{\"relevant\": []}} if none apply.\n\n\
---\n\n\
{summaries}"
    )
}

/// Stage 2 prompt: the question plus the transcripts that fit the budget.
#[must_use]
pub fn answer_prompt(question: &str, transcripts: &str) -> String {
    format!(
        "Question: {question}\n\n\
Answer the question using only the meeting transcripts below. Be concise.\n\
- Cite each meeting you use by its name as written after the ID in its header.\n\
- Support claims with verbatim quotes from the transcript, as markdown blockquotes (lines starting \
with \"> \"), attributed to the speaker and timestamp when the transcript shows them.\n\
- Never paraphrase inside a quote. If the transcripts do not answer the question, say so.\n\n\
---\n\n\
{transcripts}"
    )
}
