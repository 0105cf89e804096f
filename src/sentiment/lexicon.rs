//! Local keyword heuristic for polarity classification.
//!
//! Used whenever the remote classifier is disabled, slow, or broken, so it
//! must never fail. Counts how many whitespace tokens touch each of six
//! emotion buckets and derives a polarity from the dominant bucket.
//!
//! # Scoring
//!
//! - No emotional tokens → `NEUTRAL` at 0.5.
//! - Otherwise `intensity = min(emotional / tokens * 10, 1)` and the score is
//!   `0.7 + intensity * 0.3`, labelled `POSITIVE` when the dominant bucket is
//!   happiness or calm and `NEGATIVE` for everything else.
//!
//! `tokens` is the raw token count of the whole message, so a long message
//! with one emotional word scores lower than a short one.

use super::{PolarityLabel, PolarityResult};

/// Emotion bucket tracked by the heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmotionBucket {
    Stress,
    Sadness,
    Anger,
    Happiness,
    Calm,
    Fatigue,
}

impl EmotionBucket {
    /// All buckets in tie-break order: the first bucket wins equal counts.
    pub const ALL: [EmotionBucket; 6] = [
        Self::Stress,
        Self::Sadness,
        Self::Anger,
        Self::Happiness,
        Self::Calm,
        Self::Fatigue,
    ];

    /// Whether a dominant bucket of this kind reads as positive polarity.
    #[must_use]
    pub fn is_positive(self) -> bool {
        matches!(self, Self::Happiness | Self::Calm)
    }

    /// Substrings that mark a token as belonging to this bucket.
    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Stress => STRESS_WORDS,
            Self::Sadness => SADNESS_WORDS,
            Self::Anger => ANGER_WORDS,
            Self::Happiness => HAPPINESS_WORDS,
            Self::Calm => CALM_WORDS,
            Self::Fatigue => FATIGUE_WORDS,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Stress => 0,
            Self::Sadness => 1,
            Self::Anger => 2,
            Self::Happiness => 3,
            Self::Calm => 4,
            Self::Fatigue => 5,
        }
    }
}

// ── Keyword tables ──────────────────────────────────────────────────────

const STRESS_WORDS: &[&str] = &[
    "stress",
    "anxi",
    "worr",
    "overwhelm",
    "pressure",
    "panic",
    "nervous",
    "tense",
];

const SADNESS_WORDS: &[&str] = &[
    "sad", "depress", "down", "lonely", "upset", "cry", "hurt", "hopeless",
];

const ANGER_WORDS: &[&str] = &[
    "angry", "anger", "mad", "frustrat", "annoy", "furious", "irritat", "hate",
];

const HAPPINESS_WORDS: &[&str] = &[
    "happy",
    "joy",
    "excit",
    "great",
    "good",
    "love",
    "wonderful",
    "amazing",
];

const CALM_WORDS: &[&str] = &["calm", "peace", "relax", "content", "serene", "grateful"];

const FATIGUE_WORDS: &[&str] = &[
    "tired", "exhaust", "drain", "sleepy", "fatigue", "weary", "burn",
];

/// Per-bucket hit counts for one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmotionProfile {
    counts: [usize; 6],
    /// Whitespace token count of the whole message.
    pub word_count: usize,
}

impl EmotionProfile {
    /// Count bucket hits for every token of `text`.
    ///
    /// A token increments each bucket that has at least one keyword contained
    /// in it, so one token may count towards several buckets.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        let mut profile = Self::default();
        for token in lower.split_whitespace() {
            profile.word_count += 1;
            for bucket in EmotionBucket::ALL {
                if bucket.keywords().iter().any(|kw| token.contains(kw)) {
                    profile.counts[bucket.index()] += 1;
                }
            }
        }
        profile
    }

    /// Hits recorded for one bucket.
    #[must_use]
    pub fn count(&self, bucket: EmotionBucket) -> usize {
        self.counts[bucket.index()]
    }

    /// Sum of all bucket hits.
    #[must_use]
    pub fn total_emotional_words(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Bucket with the most hits, or `None` when nothing matched.
    #[must_use]
    pub fn dominant(&self) -> Option<EmotionBucket> {
        let mut best: Option<(EmotionBucket, usize)> = None;
        for bucket in EmotionBucket::ALL {
            let count = self.count(bucket);
            if count == 0 {
                continue;
            }
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((bucket, count)),
            }
        }
        best.map(|(bucket, _)| bucket)
    }
}

/// Classify text with the local keyword heuristic. Never fails.
pub fn classify_local(text: &str) -> PolarityResult {
    let profile = EmotionProfile::from_text(text);
    let total = profile.total_emotional_words();

    let Some(dominant) = profile.dominant() else {
        return PolarityResult::neutral();
    };

    let intensity = (total as f64 / profile.word_count as f64 * 10.0).min(1.0);
    let label = if dominant.is_positive() {
        PolarityLabel::Positive
    } else {
        PolarityLabel::Negative
    };

    tracing::trace!(
        total,
        word_count = profile.word_count,
        dominant = ?dominant,
        "local polarity heuristic"
    );

    PolarityResult::new(label, 0.7 + intensity * 0.3)
}

// ── Tests ───────────────────────────────────────────────────────────────
