//! Session history records.
//!
//! History is owned and persisted by the caller; the engine only reads
//! snapshots. Records are tolerated in degraded form: a missing or
//! out-of-range score keeps the record out of every aggregate instead of
//! failing the analysis.

use crate::mood::{self, MoodId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Valid score range for a completed activity.
pub const SCORE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

/// One completed activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub timestamp: DateTime<Utc>,
    /// Unknown ids resolve to the default mood so the score still counts.
    #[serde(deserialize_with = "lenient_mood_id")]
    pub mood_id: MoodId,
    /// Free-form activity label, e.g. `breathing` or `journaling`.
    #[serde(default)]
    pub activity_kind: String,
    /// Effectiveness score in 0–100. `None` when the caller never recorded one.
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub duration_minutes: u32,
}

impl SessionRecord {
    /// Create a scored record.
    pub fn new(
        timestamp: DateTime<Utc>,
        mood_id: MoodId,
        activity_kind: impl Into<String>,
        score: f64,
        duration_minutes: u32,
    ) -> Self {
        Self {
            timestamp,
            mood_id,
            activity_kind: activity_kind.into(),
            score: Some(score),
            duration_minutes,
        }
    }

    /// The score if present, finite and within [`SCORE_RANGE`].
    #[must_use]
    pub fn valid_score(&self) -> Option<f64> {
        self.score
            .filter(|s| s.is_finite() && SCORE_RANGE.contains(s))
    }
}

fn lenient_mood_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MoodId, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(mood::lookup_str(&raw).id)
}

/// A record paired with its validated score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRecord<'a> {
    pub record: &'a SessionRecord,
    pub score: f64,
}

/// Records with a valid score, oldest first.
pub fn scored(history: &[SessionRecord]) -> Vec<ScoredRecord<'_>> {
    history
        .iter()
        .filter_map(|record| {
            record
                .valid_score()
                .map(|score| ScoredRecord { record, score })
        })
        .collect()
}

/// Parse raw JSON values into records, skipping anything that does not
/// deserialize.
pub fn parse_lenient(values: Vec<serde_json::Value>) -> Vec<SessionRecord> {
    let total = values.len();
    let records: Vec<SessionRecord> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed session record");
                None
            }
        })
        .collect();
    if records.len() < total {
        tracing::debug!(kept = records.len(), total, "history parsed with skips");
    }
    records
}

/// Arithmetic mean, `None` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
