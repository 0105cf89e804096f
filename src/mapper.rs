//! Map text and polarity to a catalog mood.
//!
//! Two layers, first match wins:
//!
//! 1. **Keyword override**: an ordered rule list scanned as substrings of the
//!    lower-cased text. A user naming their feeling outranks any polarity.
//! 2. **Polarity thresholds**: label plus the 1–10 intensity.

use crate::mood::{self, MoodId};
use crate::sentiment::{PolarityLabel, PolarityResult};

/// Intensity assumed when the caller gives none.
pub const DEFAULT_INTENSITY: u8 = 5;

/// (mood, trigger substrings), in priority order.
const KEYWORD_RULES: &[(MoodId, &[&str])] = &[
    (MoodId::Anxious, &["anxious", "panic", "worried"]),
    (MoodId::Stressed, &["stressed", "overwhelmed", "pressure"]),
    (MoodId::Frustrated, &["angry", "frustrated", "mad"]),
    (MoodId::Sad, &["sad", "depressed", "down"]),
    (MoodId::Tired, &["tired", "exhausted", "drained"]),
    (MoodId::Happy, &["happy", "joy", "excited"]),
    (MoodId::Content, &["calm", "peaceful", "content"]),
];

/// Return the mood of the first keyword rule whose trigger occurs in `text`.
#[must_use]
pub fn keyword_mood(text: &str) -> Option<MoodId> {
    let lower = text.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(_, triggers)| triggers.iter().any(|t| lower.contains(t)))
        .map(|&(id, _)| id)
}

/// Map a polarity label and intensity to a mood, ignoring the text.
#[must_use]
pub fn polarity_mood(label: PolarityLabel, intensity: u8) -> MoodId {
    let intensity = mood::clamp_intensity(intensity);
    match label {
        PolarityLabel::Positive if intensity <= 3 => MoodId::Happy,
        PolarityLabel::Positive if intensity <= 5 => MoodId::Content,
        PolarityLabel::Positive => MoodId::Neutral,
        PolarityLabel::Negative if intensity >= 8 => MoodId::Anxious,
        PolarityLabel::Negative if intensity >= 6 => MoodId::Stressed,
        PolarityLabel::Negative if intensity >= 4 => MoodId::Sad,
        PolarityLabel::Negative => MoodId::Tired,
        PolarityLabel::Neutral => MoodId::Neutral,
    }
}

/// Pick the mood for a piece of text.
///
/// `intensity` defaults to [`DEFAULT_INTENSITY`] and is clamped to 1–10.
#[must_use]
pub fn map_mood(text: &str, polarity: &PolarityResult, intensity: Option<u8>) -> MoodId {
    if let Some(id) = keyword_mood(text) {
        tracing::debug!(mood = %id, "keyword override");
        return id;
    }
    let intensity = intensity.unwrap_or(DEFAULT_INTENSITY);
    let id = polarity_mood(polarity.label, intensity);
    tracing::debug!(mood = %id, label = %polarity.label, intensity, "polarity mapping");
    id
}
