//! # Recall Corpus
//!
//! Discovery of previously recorded meetings on disk.
//!
//! ## Layout
//!
//! ```text
//! <root>/
//!     2026-02-13_1501_quarterly-planning/
//!         summary.md | summary.json          (required)
//!         transcript.md | transcript.json    (optional)
//!     2026-02-16_1433/
//!         ...
//! ```
//!
//! Folders that do not follow the `YYYY-MM-DD_HHMM[_slug]` convention are
//! ignored. Folders without a summary are counted as skipped.
//!
//! ## Example
//!
//! ```no_run
//! use recall_corpus::discover;
//! use std::path::Path;
//!
//! let found = discover(Path::new("/home/me/recall"), Some("2026-01-01"), Some(20))?;
//! for record in &found.records {
//!     println!("{}", record.display_name);
//! }
//! # Ok::<(), recall_corpus::CorpusError>(())
//! ```

mod discovery;
mod error;
mod folder;
mod record;

pub use discovery::{discover, Discovery, SUMMARY_FILES, TRANSCRIPT_FILES};
pub use error::{CorpusError, Result};
pub use folder::FolderName;
pub use record::MeetingRecord;
