//! Static mood catalog.
//!
//! Eight discrete moods, ordered by descending base intensity. Everything else
//! in the crate refers to moods by [`MoodId`]; lookups never fall back to a
//! catalog position, only to [`DEFAULT_MOOD_ID`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a catalog mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodId {
    Anxious,
    Stressed,
    Frustrated,
    Sad,
    Tired,
    Neutral,
    Content,
    Happy,
}

impl MoodId {
    /// Every mood id in catalog order.
    pub const ALL: [MoodId; 8] = [
        Self::Anxious,
        Self::Stressed,
        Self::Frustrated,
        Self::Sad,
        Self::Tired,
        Self::Neutral,
        Self::Content,
        Self::Happy,
    ];

    /// Render to wire format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Anxious => "anxious",
            Self::Stressed => "stressed",
            Self::Frustrated => "frustrated",
            Self::Sad => "sad",
            Self::Tired => "tired",
            Self::Neutral => "neutral",
            Self::Content => "content",
            Self::Happy => "happy",
        }
    }

    /// Parse from wire format (case-insensitive, surrounding whitespace ignored).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(raw))
    }

    /// The catalog entry for this id.
    #[must_use]
    pub fn mood(self) -> &'static Mood {
        lookup(self)
    }
}

impl fmt::Display for MoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mood {
    pub id: MoodId,
    pub display_name: &'static str,
    pub icon: &'static str,
    /// Typical intensity on a 1–10 scale.
    pub base_intensity: u8,
    pub description: &'static str,
}

/// Mood used whenever an id cannot be resolved.
pub const DEFAULT_MOOD_ID: MoodId = MoodId::Neutral;

static ANXIOUS: Mood = Mood {
    id: MoodId::Anxious,
    display_name: "Anxious",
    icon: "😰",
    base_intensity: 9,
    description: "Worried, on edge, or bracing for something to go wrong.",
};

static STRESSED: Mood = Mood {
    id: MoodId::Stressed,
    display_name: "Stressed",
    icon: "😫",
    base_intensity: 8,
    description: "Stretched thin by pressure or too many demands at once.",
};

static FRUSTRATED: Mood = Mood {
    id: MoodId::Frustrated,
    display_name: "Frustrated",
    icon: "😤",
    base_intensity: 7,
    description: "Blocked, irritated, or angry about how things are going.",
};

static SAD: Mood = Mood {
    id: MoodId::Sad,
    display_name: "Sad",
    icon: "😢",
    base_intensity: 6,
    description: "Low, down, or weighed on by loss or disappointment.",
};

static TIRED: Mood = Mood {
    id: MoodId::Tired,
    display_name: "Tired",
    icon: "😴",
    base_intensity: 5,
    description: "Drained of energy, physically or mentally.",
};

static NEUTRAL: Mood = Mood {
    id: MoodId::Neutral,
    display_name: "Neutral",
    icon: "😐",
    base_intensity: 4,
    description: "Neither up nor down; an even, ordinary state.",
};

static CONTENT: Mood = Mood {
    id: MoodId::Content,
    display_name: "Content",
    icon: "😌",
    base_intensity: 3,
    description: "Calm, settled, and at ease with the moment.",
};

static HAPPY: Mood = Mood {
    id: MoodId::Happy,
    display_name: "Happy",
    icon: "😊",
    base_intensity: 2,
    description: "Light, joyful, and glad about how things are.",
};

/// The fixed catalog, descending by `base_intensity`.
pub static CATALOG: [&Mood; 8] = [
    &ANXIOUS,
    &STRESSED,
    &FRUSTRATED,
    &SAD,
    &TIRED,
    &NEUTRAL,
    &CONTENT,
    &HAPPY,
];

/// Look up a mood by id.
#[must_use]
pub fn lookup(id: MoodId) -> &'static Mood {
    match id {
        MoodId::Anxious => &ANXIOUS,
        MoodId::Stressed => &STRESSED,
        MoodId::Frustrated => &FRUSTRATED,
        MoodId::Sad => &SAD,
        MoodId::Tired => &TIRED,
        MoodId::Neutral => &NEUTRAL,
        MoodId::Content => &CONTENT,
        MoodId::Happy => &HAPPY,
    }
}

/// Look up a mood by its wire id, returning the default mood for unknown ids.
pub fn lookup_str(raw: &str) -> &'static Mood {
    match MoodId::parse(raw) {
        Some(id) => lookup(id),
        None => {
            tracing::warn!(mood_id = %raw, fallback = %DEFAULT_MOOD_ID, "unknown mood id");
            default_mood()
        }
    }
}

/// The default mood entry.
#[must_use]
pub fn default_mood() -> &'static Mood {
    lookup(DEFAULT_MOOD_ID)
}

/// Clamp a user-reported intensity into the 1–10 scale.
#[must_use]
pub fn clamp_intensity(intensity: u8) -> u8 {
    intensity.clamp(1, 10)
}

/// A mood together with how strongly it is felt right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodReading {
    pub mood: MoodId,
    /// 1–10.
    pub intensity: u8,
}

impl MoodReading {
    /// Reading with an explicit intensity (clamped to 1–10).
    #[must_use]
    pub fn new(mood: MoodId, intensity: u8) -> Self {
        Self {
            mood,
            intensity: clamp_intensity(intensity),
        }
    }

    /// Reading at the mood's catalog base intensity.
    #[must_use]
    pub fn at_base(mood: MoodId) -> Self {
        Self::new(mood, mood.mood().base_intensity)
    }
}
