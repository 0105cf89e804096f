//! Canned coaching advice selected from a trend analysis.
//!
//! Branches are tried in order and the first match wins:
//!
//! | Condition                                   | Category        | Urgency  |
//! |---------------------------------------------|-----------------|----------|
//! | critical stress                             | `crisis`        | critical |
//! | high stress and declining                   | `mental-health` | high     |
//! | ≥ 8 sessions and take-break                 | `digital-detox` | medium   |
//! | improving                                   | `wellness`      | low      |
//! | inconsistent                                | `wellness`      | medium   |
//! | anything else                               | `wellness`      | varies   |
//!
//! Each branch owns three variants; the rotation index picks one modulo 3.
//! Only the generic branch receives the morning/evening modifier.

use crate::trend::{Recommendation, StressLevel, TrendAnalysis, TrendPattern};
use chrono::Timelike;
use serde::{Deserialize, Serialize};

/// Minimum session count before the digital-detox branch applies.
pub const DIGITAL_DETOX_MIN_SESSIONS: usize = 8;

/// Evening starts at this local hour (inclusive).
pub const EVENING_START_HOUR: u32 = 18;

/// Morning ends at this local hour (exclusive).
pub const MORNING_END_HOUR: u32 = 12;

/// Advice category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdviceCategory {
    Wellness,
    MentalHealth,
    DigitalDetox,
    Crisis,
}

/// How urgently the advice should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

/// The advice record handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub message: String,
    pub category: AdviceCategory,
    pub urgency: Urgency,
    pub action_items: Vec<String>,
    pub follow_up: String,
}

/// Which branch produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdviceBranch {
    Crisis,
    MentalHealth,
    DigitalDetox,
    Improving,
    Inconsistent,
    Generic,
}

impl AdviceBranch {
    /// First matching branch for the given analysis.
    #[must_use]
    pub fn choose(analysis: &TrendAnalysis, total_sessions: usize) -> Self {
        if analysis.stress_level == StressLevel::Critical {
            Self::Crisis
        } else if analysis.stress_level == StressLevel::High
            && analysis.pattern == TrendPattern::Declining
        {
            Self::MentalHealth
        } else if total_sessions >= DIGITAL_DETOX_MIN_SESSIONS
            && analysis.recommendation == Recommendation::TakeBreak
        {
            Self::DigitalDetox
        } else if analysis.pattern == TrendPattern::Improving {
            Self::Improving
        } else if analysis.pattern == TrendPattern::Inconsistent {
            Self::Inconsistent
        } else {
            Self::Generic
        }
    }

    fn category(self) -> AdviceCategory {
        match self {
            Self::Crisis => AdviceCategory::Crisis,
            Self::MentalHealth => AdviceCategory::MentalHealth,
            Self::DigitalDetox => AdviceCategory::DigitalDetox,
            Self::Improving | Self::Inconsistent | Self::Generic => AdviceCategory::Wellness,
        }
    }

    fn urgency(self, stress: StressLevel) -> Urgency {
        match self {
            Self::Crisis => Urgency::Critical,
            Self::MentalHealth => Urgency::High,
            Self::DigitalDetox | Self::Inconsistent => Urgency::Medium,
            Self::Improving => Urgency::Low,
            Self::Generic if stress == StressLevel::High => Urgency::Medium,
            Self::Generic => Urgency::Low,
        }
    }

    fn variants(self) -> &'static [Variant; 3] {
        match self {
            Self::Crisis => &CRISIS,
            Self::MentalHealth => &MENTAL_HEALTH,
            Self::DigitalDetox => &DIGITAL_DETOX,
            Self::Improving => &IMPROVING,
            Self::Inconsistent => &INCONSISTENT,
            Self::Generic => &GENERIC,
        }
    }
}

/// Part of the day used by the generic branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    /// Classify a 0–23 hour.
    #[must_use]
    pub fn from_hour(hour: u32) -> Self {
        if hour >= EVENING_START_HOUR {
            Self::Evening
        } else if hour < MORNING_END_HOUR {
            Self::Morning
        } else {
            Self::Afternoon
        }
    }
}

struct Variant {
    message: &'static str,
    action_items: [&'static str; 3],
    follow_up: &'static str,
}

struct Modifier {
    sentence: &'static str,
    action_items: [&'static str; 2],
}

static CRISIS: [Variant; 3] = [
    Variant {
        message: "It sounds like things are really hard right now. You deserve support, and reaching out is the strongest next step.",
        action_items: [
            "Contact a crisis line or emergency services if you feel unsafe",
            "Reach out to someone you trust and tell them how you feel",
            "Stay somewhere safe and comfortable for the next hour",
        ],
        follow_up: "Would you like help finding a support line near you?",
    },
    Variant {
        message: "Your recent check-ins show a lot of distress. Please don't carry this alone.",
        action_items: [
            "Call a local crisis or support line",
            "Let a friend or family member know you're struggling",
            "Try slow breathing: in for 4, hold for 4, out for 6",
        ],
        follow_up: "Is there someone you can contact right now?",
    },
    Variant {
        message: "What you're feeling matters, and professional support can make a real difference today.",
        action_items: [
            "Book an urgent appointment with a doctor or counsellor",
            "Keep a trusted person close by",
            "Remove anything that feels unsafe from your surroundings",
        ],
        follow_up: "Can I share some support resources with you?",
    },
];

static MENTAL_HEALTH: [Variant; 3] = [
    Variant {
        message: "Your stress has been climbing and your sessions are getting harder. Talking to a professional could help you regain footing.",
        action_items: [
            "Consider scheduling a session with a therapist",
            "Write down the situations that have felt heaviest lately",
            "Protect at least one restful hour each day",
        ],
        follow_up: "Would it help to plan what you'd say to a counsellor?",
    },
    Variant {
        message: "Things have been trending downward under a lot of pressure. It's a good time to get extra support.",
        action_items: [
            "Reach out to a mental health professional",
            "Share what's been happening with someone close to you",
            "Scale back one commitment this week",
        ],
        follow_up: "What has been the hardest part of the last few days?",
    },
    Variant {
        message: "High stress combined with a declining trend is a signal worth taking seriously.",
        action_items: [
            "Look into counselling options available to you",
            "Keep a short daily mood journal",
            "Prioritise sleep and regular meals",
        ],
        follow_up: "How have you been sleeping recently?",
    },
];

static DIGITAL_DETOX: [Variant; 3] = [
    Variant {
        message: "You've been putting in a lot of sessions, but the results have been low. A screen break might do more than another exercise.",
        action_items: [
            "Put your phone in another room for an hour",
            "Take a walk without headphones",
            "Turn off non-essential notifications for the day",
        ],
        follow_up: "Could you try an hour offline today?",
    },
    Variant {
        message: "Lots of effort with little relief suggests it's time to step away from screens for a while.",
        action_items: [
            "Set a screen-free window this evening",
            "Read a physical book or magazine",
            "Spend time outdoors, even briefly",
        ],
        follow_up: "When could you fit in a screen-free break?",
    },
    Variant {
        message: "Your sessions haven't been landing lately. Sometimes rest away from devices is the missing piece.",
        action_items: [
            "Try a 24-hour break from social media",
            "Do something with your hands: cook, draw, or tidy",
            "Meet or call a friend instead of messaging",
        ],
        follow_up: "What offline activity do you enjoy most?",
    },
];

static IMPROVING: [Variant; 3] = [
    Variant {
        message: "Great progress! Your recent sessions are clearly paying off.",
        action_items: [
            "Keep your current routine going",
            "Note what's been helping most",
            "Celebrate a small win today",
        ],
        follow_up: "What do you think has made the biggest difference?",
    },
    Variant {
        message: "You're on an upward path. Consistency is doing its work.",
        action_items: [
            "Stick with the activities that worked this week",
            "Try extending your favourite session by a few minutes",
            "Share your progress with someone who supports you",
        ],
        follow_up: "Would you like to set a new small goal?",
    },
    Variant {
        message: "Your scores keep rising. That's worth acknowledging.",
        action_items: [
            "Write down three things that went well",
            "Keep the same time slot for your sessions",
            "Reward yourself for showing up",
        ],
        follow_up: "How does it feel to see this progress?",
    },
];

static INCONSISTENT: [Variant; 3] = [
    Variant {
        message: "Your sessions have been up and down. Let's explore what makes the good days different.",
        action_items: [
            "Compare what happened on your best and worst days",
            "Try the same activity at the same time for a few days",
            "Track sleep alongside your sessions",
        ],
        follow_up: "Do you notice anything different on your better days?",
    },
    Variant {
        message: "Results have varied a lot recently. A bit of experimentation could reveal what works for you.",
        action_items: [
            "Try one new activity this week",
            "Keep notes after each session",
            "Keep your session length steady",
        ],
        follow_up: "Which activity would you like to experiment with?",
    },
    Variant {
        message: "Mixed results are normal. Finding a steadier rhythm can help.",
        action_items: [
            "Pick one anchor activity to do daily",
            "Notice how your mood shifts before each session",
            "Reduce distractions during sessions",
        ],
        follow_up: "What tends to throw off your routine?",
    },
];

static GENERIC: [Variant; 3] = [
    Variant {
        message: "Keep taking small steps for your wellbeing.",
        action_items: [
            "Take a few deep breaths",
            "Drink a glass of water",
            "Stretch for two minutes",
        ],
        follow_up: "How are you feeling after your last session?",
    },
    Variant {
        message: "Regular check-ins help you stay in tune with yourself.",
        action_items: [
            "Try a short mindfulness exercise",
            "Step outside for some fresh air",
            "Write down one thing you're grateful for",
        ],
        follow_up: "What would make today a little better?",
    },
    Variant {
        message: "Balance comes from small, steady habits.",
        action_items: [
            "Plan a short break in your day",
            "Move your body for ten minutes",
            "Connect with someone you care about",
        ],
        follow_up: "Which habit would you like to build next?",
    },
];

static MORNING: Modifier = Modifier {
    sentence: "Starting the morning with intention can set the tone for the whole day.",
    action_items: [
        "Set one simple intention for today",
        "Get some natural light in the next hour",
    ],
};

static EVENING: Modifier = Modifier {
    sentence: "As the day winds down, give yourself permission to rest.",
    action_items: [
        "Dim the lights and put screens away an hour before bed",
        "Reflect on one good moment from today",
    ],
};

/// Deterministic advice selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationSelector;

impl RecommendationSelector {
    /// Select advice using the local wall-clock hour.
    #[must_use]
    pub fn select(
        analysis: &TrendAnalysis,
        total_sessions: usize,
        rotation: usize,
    ) -> AdviceResponse {
        let hour = chrono::Local::now().hour();
        Self::select_at(analysis, total_sessions, rotation, hour)
    }

    /// Select advice for an explicit 0–23 hour.
    #[must_use]
    pub fn select_at(
        analysis: &TrendAnalysis,
        total_sessions: usize,
        rotation: usize,
        hour: u32,
    ) -> AdviceResponse {
        let branch = AdviceBranch::choose(analysis, total_sessions);
        let variants = branch.variants();
        let variant = &variants[rotation % variants.len()];

        let mut response = AdviceResponse {
            message: variant.message.to_owned(),
            category: branch.category(),
            urgency: branch.urgency(analysis.stress_level),
            action_items: variant.action_items.iter().map(|s| (*s).to_owned()).collect(),
            follow_up: variant.follow_up.to_owned(),
        };

        if branch == AdviceBranch::Generic {
            let modifier = match TimeOfDay::from_hour(hour) {
                TimeOfDay::Morning => Some(&MORNING),
                TimeOfDay::Evening => Some(&EVENING),
                TimeOfDay::Afternoon => None,
            };
            if let Some(modifier) = modifier {
                response.message.push(' ');
                response.message.push_str(modifier.sentence);
                response
                    .action_items
                    .extend(modifier.action_items.iter().map(|s| (*s).to_owned()));
            }
        }

        tracing::debug!(
            ?branch,
            variant = rotation % variants.len(),
            hour,
            "advice selected"
        );
        response
    }
}

/// Rotation index for one caller; advances on each request for different
/// advice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceRotation {
    index: usize,
}

impl AdviceRotation {
    /// Rotation starting at the first variant.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an explicit index.
    pub fn starting_at(index: usize) -> Self {
        Self { index }
    }

    /// The current rotation index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move to the next variant and return the new index.
    pub fn advance(&mut self) -> usize {
        self.index = self.index.wrapping_add(1);
        self.index
    }

    /// Go back to the first variant.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Advice for the current index at the local hour.
    #[must_use]
    pub fn current(&self, analysis: &TrendAnalysis, total_sessions: usize) -> AdviceResponse {
        RecommendationSelector::select(analysis, total_sessions, self.index)
    }

    /// Advance, then return advice for the new index.
    pub fn next(&mut self, analysis: &TrendAnalysis, total_sessions: usize) -> AdviceResponse {
        self.advance();
        self.current(analysis, total_sessions)
    }
}
