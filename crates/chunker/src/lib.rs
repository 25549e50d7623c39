//! # Recall Chunker
//!
//! Token-budgeted batching of prompt entries.
//!
//! A language model only sees a bounded number of input tokens per request.
//! This crate estimates the size of each entry and greedily packs entries into
//! batches that stay within a [`TokenBudget`], so that every batch can be sent
//! as a single completion request.
//!
//! ## Pipeline
//!
//! ```text
//! context window (tokens)
//!     │
//!     ├──> TokenBudget::from_context(window, overhead)
//!     │      └─> floor(window * 0.8) - overhead, never below 500
//!     │
//!     └──> chunk_by_budget(entries, budget, cost)
//!            └─> Chunk[] (ordered, disjoint, covers every entry)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use recall_chunker::{chunk_by_budget, estimate_tokens, TokenBudget, RELEVANCE_OVERHEAD};
//!
//! let budget = TokenBudget::from_context(8192, RELEVANCE_OVERHEAD);
//! let summaries = vec!["weekly sync".to_string(), "budget review".to_string()];
//! let chunks = chunk_by_budget(summaries, budget, |s| estimate_tokens(s));
//! assert_eq!(chunks.len(), 1);
//! ```

mod budget;
mod chunker;

pub use budget::{estimate_tokens, TokenBudget, ANSWER_OVERHEAD, MIN_BUDGET_TOKENS, RELEVANCE_OVERHEAD};
pub use chunker::{chunk_by_budget, Chunk};
