use crate::error::Result;
use recall_corpus::MeetingRecord;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Added to the overlap when the question names someone the summary mentions
pub const SPEAKER_BOOST: f64 = 2.0;

/// Sort key of one candidate, compared field by field (all descending)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankScore {
    pub combined: f64,
    pub speaker_boost: f64,
}

/// Score `summary` against `question`.
#[must_use]
pub fn score(question: &str, summary: &str) -> RankScore {
    let summary_lower = summary.to_lowercase();
    let question_lower = question.to_lowercase();

    let question_words: HashSet<&str> = question_lower.split_whitespace().collect();
    let summary_words: HashSet<&str> = summary_lower.split_whitespace().collect();
    let overlap = question_words.intersection(&summary_words).count();

    let names_someone = question.split_whitespace().any(|word| {
        word.chars().next().is_some_and(char::is_uppercase)
            && word.chars().count() > 1
            && summary_lower.contains(&word.to_lowercase())
    });
    let speaker_boost = if names_someone { SPEAKER_BOOST } else { 0.0 };

    RankScore {
        combined: overlap as f64 + speaker_boost,
        speaker_boost,
    }
}

/// Order candidates best-first by `(overlap + boost, boost, id)`, all descending.
#[must_use]
pub fn rank(question: &str, candidates: Vec<(MeetingRecord, String)>) -> Vec<MeetingRecord> {
    let mut scored: Vec<(RankScore, MeetingRecord)> = candidates
        .into_iter()
        .map(|(record, summary)| (score(question, &summary), record))
        .collect();

    scored.sort_by(|(a, ra), (b, rb)| b.cmp(a).then_with(|| rb.id.cmp(&ra.id)));

    log::debug!(
        "Ranked {} meetings: {:?}",
        scored.len(),
        scored.iter().map(|(s, r)| (r.id.as_str(), s.combined)).collect::<Vec<_>>()
    );

    scored.into_iter().map(|(_, record)| record).collect()
}

/// [`rank`] with summaries read from disk
pub fn rank_meetings(question: &str, records: Vec<MeetingRecord>) -> Result<Vec<MeetingRecord>> {
    let candidates = records
        .into_iter()
        .map(|record| {
            let summary = record.read_summary()?;
            Ok((record, summary))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(rank(question, candidates))
}

impl Eq for RankScore {}

impl PartialOrd for RankScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.combined
            .total_cmp(&other.combined)
            .then_with(|| self.speaker_boost.total_cmp(&other.speaker_boost))
    }
}
