use pretty_assertions::assert_eq;
use recall_corpus::discover;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn make_meeting(base: &Path, folder: &str, summary: &str, transcript: Option<&str>) {
    let dir = base.join(folder);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("summary.md"), summary).unwrap();
    if let Some(transcript) = transcript {
        fs::write(dir.join("transcript.md"), transcript).unwrap();
    }
}

fn ids(root: &Path, since: Option<&str>, limit: Option<usize>) -> Vec<String> {
    discover(root, since, limit)
        .unwrap()
        .records
        .into_iter()
        .map(|r| r.id)
        .collect()
}

#[test]
fn discovers_newest_first_with_display_names() {
    let temp = tempdir().unwrap();
    make_meeting(temp.path(), "2026-02-13_1501_quarterly-planning", "Summary of Q1 planning", None);
    make_meeting(temp.path(), "2026-02-12_0930_team-standup", "Daily standup notes", None);

    let found = discover(temp.path(), None, None).unwrap();
    assert_eq!(found.skipped, 0);
    assert_eq!(found.records.len(), 2);
    assert_eq!(found.records[0].id, "2026-02-13_1501_quarterly-planning");
    assert_eq!(found.records[1].id, "2026-02-12_0930_team-standup");
    assert_eq!(
        found.records[0].display_name,
        "2026-02-13 15:01 — Quarterly Planning"
    );
}

#[test]
fn folders_without_slug_are_accepted() {
    let temp = tempdir().unwrap();
    make_meeting(temp.path(), "2026-02-16_1433", "Summary without title", None);
    make_meeting(temp.path(), "2026-02-13_1501_quarterly-planning", "Summary of Q1 planning", None);

    let found = discover(temp.path(), None, None).unwrap();
    assert_eq!(found.records[0].id, "2026-02-16_1433");
    assert_eq!(found.records[0].display_name, "2026-02-16 14:33");
    assert_eq!(found.records[1].id, "2026-02-13_1501_quarterly-planning");
}

#[test]
fn since_is_an_inclusive_lower_bound() {
    let temp = tempdir().unwrap();
    make_meeting(temp.path(), "2026-02-13_1501_quarterly-planning", "Summary", None);
    make_meeting(temp.path(), "2026-02-01_0930_team-standup", "Summary", None);
    make_meeting(temp.path(), "2026-01-10_1000_old-meeting", "Summary", None);

    assert_eq!(
        ids(temp.path(), Some("2026-02-01"), None),
        vec![
            "2026-02-13_1501_quarterly-planning".to_string(),
            "2026-02-01_0930_team-standup".to_string(),
        ]
    );
}

#[test]
fn invalid_since_is_ignored() {
    let temp = tempdir().unwrap();
    make_meeting(temp.path(), "2026-02-13_1501_quarterly-planning", "Summary", None);
    make_meeting(temp.path(), "2026-01-10_1000_old-meeting", "Summary", None);

    assert_eq!(ids(temp.path(), Some("last tuesday"), None).len(), 2);
}

#[test]
fn limit_keeps_the_newest() {
    let temp = tempdir().unwrap();
    make_meeting(temp.path(), "2026-02-13_1501_quarterly-planning", "Summary", None);
    make_meeting(temp.path(), "2026-02-12_0930_team-standup", "Summary", None);
    make_meeting(temp.path(), "2026-02-11_1000_old-meeting", "Summary", None);

    assert_eq!(
        ids(temp.path(), None, Some(2)),
        vec![
            "2026-02-13_1501_quarterly-planning".to_string(),
            "2026-02-12_0930_team-standup".to_string(),
        ]
    );
    assert_eq!(ids(temp.path(), None, Some(0)).len(), 3);
}

#[test]
fn folders_without_summary_are_skipped() {
    let temp = tempdir().unwrap();
    make_meeting(temp.path(), "2026-02-13_1501_quarterly-planning", "Summary", None);
    let no_summary = temp.path().join("2026-02-12_0930_team-standup");
    fs::create_dir_all(&no_summary).unwrap();
    fs::write(no_summary.join("transcript.md"), "some transcript").unwrap();

    let found = discover(temp.path(), None, None).unwrap();
    assert_eq!(found.skipped, 1);
    assert_eq!(found.records.len(), 1);
    assert_eq!(found.records[0].id, "2026-02-13_1501_quarterly-planning");
}

#[test]
fn prefers_markdown_artifacts_over_json() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("2026-02-13_1501_review");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("summary.json"), "{}").unwrap();
    fs::write(dir.join("summary.md"), "# Review").unwrap();
    fs::write(dir.join("transcript.json"), "[]").unwrap();

    let found = discover(temp.path(), None, None).unwrap();
    let record = &found.records[0];
    assert_eq!(record.summary_path, dir.join("summary.md"));
    assert_eq!(record.transcript_path.as_deref(), Some(dir.join("transcript.json").as_path()));
    assert_eq!(record.read_summary().unwrap(), "# Review");
    assert_eq!(record.read_transcript().unwrap().as_deref(), Some("[]"));
}

#[test]
fn ignores_files_and_foreign_folders() {
    let temp = tempdir().unwrap();
    make_meeting(temp.path(), "2026-02-13_1501_review", "Summary", None);
    make_meeting(temp.path(), "scratch", "Summary", None);
    fs::write(temp.path().join("2026-02-14_1000_notes"), "a file, not a folder").unwrap();

    let found = discover(temp.path(), None, None).unwrap();
    assert_eq!(found.skipped, 0);
    assert_eq!(found.records.len(), 1);
}

#[test]
fn missing_transcript_reads_as_none() {
    let temp = tempdir().unwrap();
    make_meeting(temp.path(), "2026-02-13_1501_review", "Summary", None);

    let found = discover(temp.path(), None, None).unwrap();
    assert!(!found.records[0].has_transcript());
    assert_eq!(found.records[0].read_transcript().unwrap(), None);
}

#[test]
fn empty_and_missing_roots() {
    let temp = tempdir().unwrap();
    let found = discover(temp.path(), None, None).unwrap();
    assert!(found.records.is_empty());
    assert_eq!(found.skipped, 0);

    let found = discover(&temp.path().join("nonexistent"), None, None).unwrap();
    assert!(found.records.is_empty());
    assert_eq!(found.skipped, 0);
}
