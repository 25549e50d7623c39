use crate::error::{CorpusError, Result};
use crate::folder::FolderName;
use crate::record::MeetingRecord;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Summary file names in order of preference
pub const SUMMARY_FILES: &[&str] = &["summary.md", "summary.json"];

/// Transcript file names in order of preference
pub const TRANSCRIPT_FILES: &[&str] = &["transcript.md", "transcript.json"];

/// Outcome of scanning a corpus root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Newest first
    pub records: Vec<MeetingRecord>,

    /// Meeting folders left out because they have no summary
    pub skipped: usize,
}

/// Scan `root` for meeting folders.
///
/// `since` is an inclusive `YYYY-MM-DD` lower bound; an unparseable bound is
/// ignored. `limit` keeps the newest `limit` meetings when greater than zero.
pub fn discover(root: &Path, since: Option<&str>, limit: Option<usize>) -> Result<Discovery> {
    if !root.exists() {
        log::debug!("Corpus root {} does not exist", root.display());
        return Ok(Discovery::default());
    }

    let since = since.and_then(parse_since);
    let mut discovery = Discovery::default();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by(|a, b| b.file_name().cmp(a.file_name()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(CorpusError::Scan {
                    path: root.to_path_buf(),
                    source: err,
                })
            }
            Err(err) => {
                log::warn!("Failed to read entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(id) = entry.file_name().to_str() else {
            continue;
        };
        let Some(folder) = FolderName::parse(id) else {
            log::debug!("Ignoring {id}: not a meeting folder");
            continue;
        };

        let dir = entry.path();
        let Some(summary_path) = probe(dir, SUMMARY_FILES) else {
            log::debug!("Skipping {id}: no summary");
            discovery.skipped += 1;
            continue;
        };
        let transcript_path = probe(dir, TRANSCRIPT_FILES);

        if let (Some(since), Some(date)) = (since, folder.date()) {
            if date < since {
                continue;
            }
        }

        discovery.records.push(MeetingRecord::new(
            id,
            folder.display_name(),
            summary_path,
            transcript_path,
        ));
    }

    if let Some(limit) = limit.filter(|limit| *limit > 0) {
        discovery.records.truncate(limit);
    }

    log::info!(
        "Found {} meetings under {} ({} without summaries)",
        discovery.records.len(),
        root.display(),
        discovery.skipped
    );
    Ok(discovery)
}

fn parse_since(raw: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(err) => {
            log::warn!("Ignoring --since '{raw}': {err}");
            None
        }
    }
}

fn probe(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}
