//! Shared fixtures for integration tests.

use chrono::{Duration, TimeZone, Utc};
use moodwell::insight::InsightGenerator;
use moodwell::{Companion, MoodId, PolarityClassifier, SessionRecord, TrendAnalyzer};

/// One scored record per entry, an hour apart, all with the same activity.
pub fn scored_history(scores: &[f64]) -> Vec<SessionRecord> {
    let start = Utc.with_ymd_and_hms(2026, 4, 1, 7, 30, 0).unwrap();
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| {
            SessionRecord::new(
                start + Duration::hours(i as i64),
                MoodId::Stressed,
                "breathing",
                score,
                10,
            )
        })
        .collect()
}

/// Local-only companion with a fixed insight seed.
pub fn local_companion() -> Companion {
    Companion::new(
        PolarityClassifier::local_only(),
        InsightGenerator::with_seed(1),
        TrendAnalyzer::default(),
    )
}
