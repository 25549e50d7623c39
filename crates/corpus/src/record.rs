use crate::error::{CorpusError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A discovered meeting with its summary and optional transcript on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeetingRecord {
    /// Folder name; unique and chronologically sortable
    pub id: String,

    /// Human-readable date, time and title
    pub display_name: String,

    pub summary_path: PathBuf,

    pub transcript_path: Option<PathBuf>,
}

impl MeetingRecord {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        summary_path: PathBuf,
        transcript_path: Option<PathBuf>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            summary_path,
            transcript_path,
        }
    }

    pub fn read_summary(&self) -> Result<String> {
        read_artifact(&self.summary_path)
    }

    /// Transcript text, or `None` when the meeting has no transcript on disk
    pub fn read_transcript(&self) -> Result<Option<String>> {
        match &self.transcript_path {
            Some(path) if path.exists() => read_artifact(path).map(Some),
            _ => Ok(None),
        }
    }

    #[must_use]
    pub fn has_transcript(&self) -> bool {
        self.transcript_path.as_deref().is_some_and(Path::exists)
    }
}

fn read_artifact(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CorpusError::Artifact {
        path: path.to_path_buf(),
        source,
    })
}
