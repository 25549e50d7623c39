use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChatError>;

/// Failures talking to a chat backend. Every variant aborts the query that hit it.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("LLM backend at {url} is unreachable: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("LLM backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from LLM backend: {0}")]
    InvalidResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unsupported LLM backend '{0}' (expected 'ollama' or 'openai')")]
    UnknownBackend(String),
}

impl ChatError {
    pub(crate) fn from_send(url: &str, err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::Unreachable {
                url: url.to_string(),
                source: err,
            }
        } else {
            Self::Http(err)
        }
    }
}
