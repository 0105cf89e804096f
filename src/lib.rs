//! Moodwell: mood check-in classification and stress trend coaching.
//!
//! Users describe how they feel as free text, a voice transcript, a quick
//! pick from the mood catalog, or a handful of keyword tags. The engine turns
//! that into one of eight moods with a short insight, and across sessions
//! reads a caller-owned history of activity scores to classify stress, spot
//! a trend, and pick coaching advice.
//!
//! # Architecture
//!
//! - **Sentiment**: polarity from an optional remote classifier with a
//!   bounded timeout, falling back to a local keyword heuristic
//! - **Mapper**: keyword overrides, then polarity thresholds, to a [`MoodId`]
//! - **Insight**: templated lines per mood and intensity bucket
//! - **Trend**: stress level, pattern, recommendation and confidence
//! - **Advice**: branch selection with rotating variants
//! - **Host**: newline-delimited JSON bridge for native shells
//!
//! [`Companion`] ties the pieces together.

pub mod advice;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod host;
pub mod insight;
pub mod mapper;
pub mod mood;
pub mod sentiment;
pub mod trend;

pub use advice::{AdviceCategory, AdviceResponse, AdviceRotation, RecommendationSelector, Urgency};
pub use config::{ClassifierConfig, MoodwellConfig, TrendCalibration};
pub use engine::{CheckInOutcome, Companion, MoodInput};
pub use error::{MoodwellError, Result};
pub use history::SessionRecord;
pub use insight::InsightGenerator;
pub use mood::{Mood, MoodId, MoodReading};
pub use sentiment::{PolarityClassifier, PolarityLabel, PolarityResult, RemoteClassifier};
pub use trend::{Recommendation, StressLevel, TrendAnalysis, TrendAnalyzer, TrendPattern};
