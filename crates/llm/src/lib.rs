//! # Recall LLM
//!
//! The chat capability the question-answering pipeline depends on, plus the
//! HTTP backends that provide it.
//!
//! ```text
//! ChatClient (trait)
//!     ├──> OllamaClient   POST {host}/api/chat, context window via /api/show
//!     └──> OpenAiClient   POST {host}/v1/chat/completions
//! ```
//!
//! Any transport or status failure surfaces as a [`ChatError`]; nothing here
//! retries.

mod client;
mod error;
mod ollama;
mod openai;
mod response;
mod settings;

pub use client::ChatClient;
pub use error::{ChatError, Result};
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;
pub use response::clean_response;
pub use settings::{build_client, Backend, LlmSettings, DEFAULT_HOST, DEFAULT_MODEL};
