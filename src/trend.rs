//! Stress and trend analysis over session history.
//!
//! A deterministic heuristic, recomputed from the current history snapshot on
//! every call. All thresholds come from [`TrendCalibration`].
//!
//! # Rules
//!
//! - **Stress**: critical when intensity ≥ 8 or latest score < 30; high when
//!   intensity ≥ 7 or latest score < 50; low when intensity ≤ 3 and latest
//!   score ≥ 80; moderate otherwise.
//! - **Pattern**: stable unless at least 5 recent records exist. Then the
//!   weighted mean of the last three scores minus that of the first three
//!   decides improving (> 10) or declining (< −10); otherwise a variance
//!   above 400 is inconsistent.
//! - **Recommendation**: seek-help on critical stress, adjust on a declining
//!   pattern or high stress, take-break when the recent mean is under 40,
//!   continue otherwise.
//! - **Confidence**: `min(95, 60 + 5 × recent records)`.

use crate::config::TrendCalibration;
use crate::history::{self, ScoredRecord, SessionRecord};
use crate::mood::MoodReading;
use serde::{Deserialize, Serialize};

/// Coarse stress severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    Low,
    Moderate,
    High,
    Critical,
}

/// Direction of recent activity scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendPattern {
    Improving,
    Stable,
    Declining,
    Inconsistent,
}

/// What the user should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recommendation {
    Continue,
    Adjust,
    SeekHelp,
    TakeBreak,
}

/// Result of one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub stress_level: StressLevel,
    pub pattern: TrendPattern,
    pub recommendation: Recommendation,
    /// Percentage in `0..=95` with default calibration.
    pub confidence: u8,
    pub insights: Vec<String>,
    /// Number of scored records in the recent window.
    #[serde(default)]
    pub recent_count: usize,
    /// Mean score of the recent window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_score: Option<f64>,
    /// Mean score of the very recent window, for callers that show it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub very_recent_average: Option<f64>,
}

impl Default for TrendAnalysis {
    /// The degraded default: moderate, stable, continue.
    fn default() -> Self {
        let calibration = TrendCalibration::default();
        Self {
            stress_level: StressLevel::Moderate,
            pattern: TrendPattern::Stable,
            recommendation: Recommendation::Continue,
            confidence: calibration.confidence_base,
            insights: Vec::new(),
            recent_count: 0,
            average_score: None,
            very_recent_average: None,
        }
    }
}

/// Analyzer holding its calibration.
#[derive(Debug, Clone, Default)]
pub struct TrendAnalyzer {
    calibration: TrendCalibration,
}

impl TrendAnalyzer {
    /// Analyzer with the given calibration.
    pub fn new(calibration: TrendCalibration) -> Self {
        Self { calibration }
    }

    /// The active calibration.
    pub fn calibration(&self) -> &TrendCalibration {
        &self.calibration
    }

    /// The last `recent_window` scored records, oldest first.
    pub fn recent_window<'a>(&self, history: &'a [SessionRecord]) -> Vec<ScoredRecord<'a>> {
        last_n(history::scored(history), self.calibration.recent_window)
    }

    /// The last `very_recent_window` scored records, oldest first.
    pub fn very_recent_window<'a>(&self, history: &'a [SessionRecord]) -> Vec<ScoredRecord<'a>> {
        last_n(history::scored(history), self.calibration.very_recent_window)
    }

    /// Classify stress from the current mood and latest score.
    ///
    /// Either input may be missing; a missing input never triggers a rule.
    #[must_use]
    pub fn stress_level(&self, current: Option<MoodReading>, latest_score: Option<f64>) -> StressLevel {
        let c = &self.calibration;
        let intensity = current.map(|r| r.intensity);
        let at_least = |limit: u8| intensity.is_some_and(|i| i >= limit);
        let below = |limit: f64| latest_score.is_some_and(|s| s < limit);

        if at_least(c.critical_intensity) || below(c.critical_score) {
            StressLevel::Critical
        } else if at_least(c.high_intensity) || below(c.high_score) {
            StressLevel::High
        } else if intensity.is_some_and(|i| i <= c.low_intensity)
            && latest_score.is_some_and(|s| s >= c.low_score)
        {
            StressLevel::Low
        } else {
            StressLevel::Moderate
        }
    }

    /// Classify the direction of `scores` (oldest first).
    #[must_use]
    pub fn pattern(&self, scores: &[f64]) -> TrendPattern {
        let c = &self.calibration;
        if scores.len() < c.min_pattern_records {
            return TrendPattern::Stable;
        }
        let Some(trend) = weighted_trend(scores) else {
            return TrendPattern::Stable;
        };

        if trend > c.trend_threshold {
            TrendPattern::Improving
        } else if trend < -c.trend_threshold {
            TrendPattern::Declining
        } else if variance(scores).is_some_and(|v| v > c.variance_threshold) {
            TrendPattern::Inconsistent
        } else {
            TrendPattern::Stable
        }
    }

    /// Pick a recommendation.
    #[must_use]
    pub fn recommend(
        &self,
        stress: StressLevel,
        pattern: TrendPattern,
        scores: &[f64],
    ) -> Recommendation {
        let c = &self.calibration;
        if stress == StressLevel::Critical {
            Recommendation::SeekHelp
        } else if pattern == TrendPattern::Declining || stress == StressLevel::High {
            Recommendation::Adjust
        } else if scores.len() >= c.min_pattern_records
            && history::mean(scores).is_some_and(|m| m < c.take_break_mean)
        {
            Recommendation::TakeBreak
        } else {
            Recommendation::Continue
        }
    }

    /// Confidence percentage for a recent window of `recent_count` records.
    #[must_use]
    pub fn confidence(&self, recent_count: usize) -> u8 {
        let c = &self.calibration;
        let gained = u32::try_from(recent_count)
            .unwrap_or(u32::MAX)
            .saturating_mul(u32::from(c.confidence_step));
        let raw = u32::from(c.confidence_base).saturating_add(gained);
        u8::try_from(raw.min(u32::from(c.confidence_cap))).unwrap_or(c.confidence_cap)
    }

    /// Run the full analysis.
    ///
    /// `latest_score` defaults to the newest scored record. Scores outside
    /// 0–100 are clamped; non-finite scores are ignored.
    pub fn analyze(
        &self,
        history: &[SessionRecord],
        current: Option<MoodReading>,
        latest_score: Option<f64>,
    ) -> TrendAnalysis {
        let recent = self.recent_window(history);
        let very_recent = self.very_recent_window(history);
        let scores: Vec<f64> = recent.iter().map(|r| r.score).collect();
        let very_recent_scores: Vec<f64> = very_recent.iter().map(|r| r.score).collect();

        let latest_score = latest_score
            .filter(|s| s.is_finite())
            .map(|s| s.clamp(0.0, 100.0))
            .or_else(|| scores.last().copied());

        let stress_level = self.stress_level(current, latest_score);
        let pattern = self.pattern(&scores);
        let recommendation = self.recommend(stress_level, pattern, &scores);
        let confidence = self.confidence(recent.len());

        let mut insights = Vec::new();
        match pattern {
            TrendPattern::Improving => insights.push(
                "📈 Your recent sessions are trending upward. Whatever you're doing is working."
                    .to_owned(),
            ),
            TrendPattern::Declining => insights.push(
                "📉 Your recent sessions have been getting harder. It may be time to change approach."
                    .to_owned(),
            ),
            TrendPattern::Stable | TrendPattern::Inconsistent => {}
        }
        if let Some(kind) = most_frequent_activity(&recent) {
            insights.push(format!("🎯 Your go-to activity lately is {kind}."));
        }
        if let Some(reading) = current.filter(|r| r.intensity >= self.calibration.high_intensity) {
            insights.push(format!(
                "⚠️ Your current mood is running high in intensity ({}/10).",
                reading.intensity
            ));
        }

        tracing::debug!(
            ?stress_level,
            ?pattern,
            ?recommendation,
            confidence,
            recent = recent.len(),
            "trend analysis"
        );

        TrendAnalysis {
            stress_level,
            pattern,
            recommendation,
            confidence,
            insights,
            recent_count: recent.len(),
            average_score: history::mean(&scores),
            very_recent_average: history::mean(&very_recent_scores),
        }
    }
}

// ── Helpers ────────────────────────────────────────────────────

fn last_n<T>(mut items: Vec<T>, n: usize) -> Vec<T> {
    let skip = items.len().saturating_sub(n);
    items.drain(..skip);
    items
}

/// Weighted mean (weights 1, 2, 3) of the last three scores minus that of the
/// first three. `None` with fewer than three scores.
#[must_use]
pub fn weighted_trend(scores: &[f64]) -> Option<f64> {
    if scores.len() < 3 {
        return None;
    }
    let weighted = |run: &[f64]| -> f64 {
        run.iter()
            .enumerate()
            .map(|(i, s)| s * (i + 1) as f64)
            .sum::<f64>()
            / 6.0
    };
    let first = weighted(&scores[..3]);
    let last = weighted(&scores[scores.len() - 3..]);
    Some(last - first)
}

/// Population variance, `None` for an empty slice.
#[must_use]
pub fn variance(scores: &[f64]) -> Option<f64> {
    let mean = history::mean(scores)?;
    Some(scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / scores.len() as f64)
}

/// Most frequent non-empty activity kind; ties go to the first seen.
fn most_frequent_activity<'a>(recent: &[ScoredRecord<'a>]) -> Option<&'a str> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for entry in recent {
        let kind = entry.record.activity_kind.trim();
        if kind.is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, n)) => *n += 1,
            None => counts.push((kind, 1)),
        }
    }

    let mut best: Option<(&'a str, usize)> = None;
    for (kind, n) in counts {
        if best.is_none_or(|(_, best_n)| n > best_n) {
            best = Some((kind, n));
        }
    }
    best.map(|(kind, _)| kind)
}
