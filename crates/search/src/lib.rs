//! # Recall Search
//!
//! Two-stage question answering over a meeting corpus.
//!
//! ## Pipeline
//!
//! ```text
//! question
//!     │
//!     ├──> discover(root)                      newest-first MeetingRecords
//!     │
//!     ├──> find_relevant  (Stage 1)            summaries in budget-sized batches
//!     │      ├─> parse_relevant_ids            fail open on unparseable replies
//!     │      ├─> keyword_fallback              when the model names nothing
//!     │      └─> rank                          overlap + speaker boost, then id
//!     │
//!     ├──> answer_from_transcripts (Stage 2)   transcripts that fit the budget
//!     │
//!     └──> verify_quotes                       mark quotes missing from transcripts
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use recall_llm::{build_client, LlmSettings};
//! use recall_search::{ask, AskOptions, NoProgress};
//! use std::path::Path;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = build_client(&LlmSettings::default())?;
//! let report = ask(
//!     &client,
//!     Path::new("/home/me/recall"),
//!     "What did Anna say about the launch date?",
//!     &AskOptions::default(),
//!     &NoProgress,
//! )
//! .await?;
//! print!("{report}");
//! # Ok(())
//! # }
//! ```

mod answer;
mod ask;
mod error;
mod keywords;
mod progress;
mod prompts;
mod rank;
mod relevance;
mod verify;

pub use answer::{answer_from_transcripts, load_transcripts, Answer, NO_TRANSCRIPT_MESSAGE};
pub use ask::{ask, AskOptions, AskOutcome, AskReport, DEFAULT_CONTEXT_SIZE};
pub use error::{Result, SearchError};
pub use keywords::{extract_keywords, STOP_WORDS};
pub use progress::{NoProgress, Progress};
pub use prompts::{answer_prompt, find_prompt, ANSWER_SYSTEM, FIND_SYSTEM};
pub use rank::{rank, rank_meetings, score, RankScore, SPEAKER_BOOST};
pub use relevance::{find_relevant, keyword_fallback, parse_relevant_ids};
pub use verify::{extract_quotes, key_phrases, verify_quotes, UNVERIFIED_MARKER};
