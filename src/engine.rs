//! The companion facade: one pipeline shared by every input surface.
//!
//! Text entry, voice transcripts, quick-pick selections and keyword tags all
//! go through [`Companion::check_in`]. Free text runs polarity
//! classification, mood mapping and insight generation; a quick-pick skips
//! straight to the catalog.

use crate::advice::{AdviceResponse, RecommendationSelector};
use crate::config::MoodwellConfig;
use crate::history::SessionRecord;
use crate::insight::InsightGenerator;
use crate::mapper::{self, DEFAULT_INTENSITY};
use crate::mood::{self, Mood, MoodId, MoodReading};
use crate::sentiment::{PolarityClassifier, PolarityResult, PolaritySource};
use crate::trend::{TrendAnalysis, TrendAnalyzer};
use serde::{Deserialize, Serialize};

/// One way a user can describe how they feel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoodInput {
    /// Typed free text.
    Text { text: String },
    /// Speech already transcribed to text. Handled exactly like `Text`.
    Transcript { text: String },
    /// Quick-pick of a catalog mood, optionally with an intensity.
    Selection {
        mood_id: MoodId,
        #[serde(default)]
        intensity: Option<u8>,
    },
    /// Selected keyword tags.
    Tags { tags: Vec<String> },
}

impl MoodInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn transcript(text: impl Into<String>) -> Self {
        Self::Transcript { text: text.into() }
    }

    pub fn selection(mood_id: MoodId, intensity: Option<u8>) -> Self {
        Self::Selection { mood_id, intensity }
    }

    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Tags {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// The text to classify, or `None` for a selection or blank input.
    fn classifiable_text(&self) -> Option<String> {
        let text = match self {
            Self::Text { text } | Self::Transcript { text } => text.trim().to_owned(),
            Self::Tags { tags } => tags
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            Self::Selection { .. } => return None,
        };
        (!text.is_empty()).then_some(text)
    }
}

/// Everything produced by one check-in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckInOutcome {
    /// Catalog entry for the chosen mood.
    pub mood: &'static Mood,
    /// 1–10.
    pub intensity: u8,
    /// Present on the text path only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polarity: Option<PolarityResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polarity_source: Option<PolaritySource>,
    pub insight: String,
}

impl CheckInOutcome {
    /// The outcome as a reading for trend analysis.
    #[must_use]
    pub fn reading(&self) -> MoodReading {
        MoodReading::new(self.mood.id, self.intensity)
    }
}

/// Mood engine facade.
#[derive(Debug)]
pub struct Companion {
    classifier: PolarityClassifier,
    insights: InsightGenerator,
    analyzer: TrendAnalyzer,
}

impl Companion {
    pub fn new(
        classifier: PolarityClassifier,
        insights: InsightGenerator,
        analyzer: TrendAnalyzer,
    ) -> Self {
        Self {
            classifier,
            insights,
            analyzer,
        }
    }

    /// Build every component from configuration.
    pub fn from_config(config: &MoodwellConfig) -> Self {
        Self::new(
            PolarityClassifier::from_config(&config.classifier),
            InsightGenerator::new(config.insights.seed),
            TrendAnalyzer::new(config.trend.clone()),
        )
    }

    pub fn classifier(&self) -> &PolarityClassifier {
        &self.classifier
    }

    pub fn analyzer(&self) -> &TrendAnalyzer {
        &self.analyzer
    }

    /// Run a check-in. Blank input produces no outcome.
    ///
    /// `intensity` applies to every input kind; a selection's own intensity
    /// takes precedence.
    pub async fn check_in(&mut self, input: MoodInput, intensity: Option<u8>) -> Option<CheckInOutcome> {
        if let MoodInput::Selection {
            mood_id,
            intensity: picked,
        } = input
        {
            let intensity = picked.or(intensity);
            let reading = match intensity {
                Some(i) => MoodReading::new(mood_id, i),
                None => MoodReading::at_base(mood_id),
            };
            let insight = self
                .insights
                .generate(mood_id, Some(reading.intensity))
                .to_owned();
            tracing::debug!(mood = %mood_id, intensity = reading.intensity, "quick-pick check-in");
            return Some(CheckInOutcome {
                mood: mood::lookup(mood_id),
                intensity: reading.intensity,
                polarity: None,
                polarity_source: None,
                insight,
            });
        }

        let Some(text) = input.classifiable_text() else {
            tracing::debug!("blank check-in ignored");
            return None;
        };

        let (polarity, source) = self.classifier.classify_with_source(&text).await;
        let mood_id = mapper::map_mood(&text, &polarity, intensity);
        let insight = self.insights.generate(mood_id, intensity).to_owned();
        let intensity = mood::clamp_intensity(intensity.unwrap_or(DEFAULT_INTENSITY));

        tracing::debug!(
            mood = %mood_id,
            label = %polarity.label,
            score = polarity.score,
            ?source,
            "text check-in"
        );

        Some(CheckInOutcome {
            mood: mood::lookup(mood_id),
            intensity,
            polarity: Some(polarity),
            polarity_source: Some(source),
            insight,
        })
    }

    /// Analyze a history snapshot.
    pub fn analyze(
        &self,
        history: &[SessionRecord],
        current: Option<MoodReading>,
        latest_score: Option<f64>,
    ) -> TrendAnalysis {
        self.analyzer.analyze(history, current, latest_score)
    }

    /// Advice for an analysis at the local hour.
    pub fn advise(
        &self,
        analysis: &TrendAnalysis,
        total_sessions: usize,
        rotation: usize,
    ) -> AdviceResponse {
        RecommendationSelector::select(analysis, total_sessions, rotation)
    }

    /// Analyze `history` and select advice, counting every record as a session.
    pub fn coach(
        &self,
        history: &[SessionRecord],
        current: Option<MoodReading>,
        rotation: usize,
    ) -> (TrendAnalysis, AdviceResponse) {
        let analysis = self.analyze(history, current, None);
        let advice = self.advise(&analysis, history.len(), rotation);
        (analysis, advice)
    }
}

impl Default for Companion {
    fn default() -> Self {
        Self::new(
            PolarityClassifier::local_only(),
            InsightGenerator::from_entropy(),
            TrendAnalyzer::default(),
        )
    }
}
