use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Conditions that abort a query. Recoverable conditions (unparseable model
/// output, unknown ids, transcripts over budget) never show up here.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Chat backend error: {0}")]
    Chat(#[from] recall_llm::ChatError),

    #[error("Corpus error: {0}")]
    Corpus(#[from] recall_corpus::CorpusError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
