//! End-to-end check-in and coaching scenarios.

use crate::helpers::{local_companion, scored_history};
use moodwell::advice::AdviceBranch;
use moodwell::sentiment::classify_local;
use moodwell::{
    AdviceCategory, AdviceRotation, MoodId, MoodInput, MoodReading, PolarityLabel,
    PolarityResult, Recommendation, RecommendationSelector, StressLevel, TrendPattern, Urgency,
};

#[tokio::test]
async fn anxious_overwhelmed_text_maps_to_anxious() {
    let mut companion = local_companion();
    let outcome = companion
        .check_in(MoodInput::text("I feel anxious and overwhelmed today"), None)
        .await
        .expect("non-blank text yields an outcome");

    let polarity = outcome.polarity.expect("text path reports polarity");
    assert_eq!(polarity.label, PolarityLabel::Negative);
    assert!(
        (0.7..=1.0).contains(&polarity.score),
        "score {} outside 0.7..=1.0",
        polarity.score
    );
    assert_eq!(outcome.mood.id, MoodId::Anxious);
    assert_eq!(outcome.mood.display_name, "Anxious");
    assert!(!outcome.insight.is_empty());
}

#[test]
fn text_without_emotional_words_is_neutral_half() {
    for text in ["the train leaves at nine", "lorem ipsum", "12345 67890"] {
        assert_eq!(classify_local(text), PolarityResult::neutral(), "{text}");
    }
}

#[test]
fn rising_history_is_improving() {
    let companion = local_companion();
    let history = scored_history(&[40.0, 40.0, 40.0, 50.0, 60.0, 70.0, 75.0, 80.0, 85.0, 90.0]);
    let analysis = companion.analyze(&history, Some(MoodReading::new(MoodId::Content, 4)), None);

    assert_eq!(analysis.pattern, TrendPattern::Improving);
    assert_eq!(analysis.confidence, 95);
    assert_eq!(analysis.recent_count, 10);
    assert!(analysis.insights.iter().any(|i| i.contains("breathing")));
}

#[test]
fn low_latest_score_is_critical_even_at_moderate_intensity() {
    let companion = local_companion();
    let history = scored_history(&[70.0, 72.0, 68.0]);
    let analysis = companion.analyze(
        &history,
        Some(MoodReading::new(MoodId::Sad, 4)),
        Some(25.0),
    );
    assert_eq!(analysis.stress_level, StressLevel::Critical);
    assert_eq!(analysis.recommendation, Recommendation::SeekHelp);
    assert_eq!(analysis.confidence, 75);

    let advice = RecommendationSelector::select_at(&analysis, history.len(), 0, 15);
    assert_eq!(advice.category, AdviceCategory::Crisis);
    assert_eq!(advice.urgency, Urgency::Critical);
}

#[test]
fn many_low_sessions_suggest_digital_detox() {
    let companion = local_companion();
    // Mean 35 over nine sessions; the weighted trend is exactly 10, so stable.
    let history = scored_history(&[35.0, 35.0, 35.0, 30.0, 30.0, 30.0, 30.0, 30.0, 60.0]);
    let analysis = companion.analyze(&history, Some(MoodReading::new(MoodId::Tired, 5)), Some(50.0));
    assert_eq!(analysis.pattern, TrendPattern::Stable);
    assert_eq!(analysis.recommendation, Recommendation::TakeBreak);

    let advice = RecommendationSelector::select_at(&analysis, 9, 0, 10);
    assert_eq!(advice.category, AdviceCategory::DigitalDetox);
    assert_eq!(advice.urgency, Urgency::Medium);
    // No morning modifier outside the generic branch.
    assert_eq!(advice.action_items.len(), 3);
}

#[test]
fn rotation_zero_and_three_agree() {
    let companion = local_companion();
    let (analysis, _) = companion.coach(&[], None, 0);
    assert_eq!(AdviceBranch::choose(&analysis, 0), AdviceBranch::Generic);

    let mut rotation = AdviceRotation::new();
    let first = RecommendationSelector::select_at(&analysis, 0, rotation.index(), 13);
    for _ in 0..3 {
        rotation.advance();
    }
    let again = RecommendationSelector::select_at(&analysis, 0, rotation.index(), 13);
    assert_eq!(first, again);
}

#[tokio::test]
async fn check_in_feeds_trend_analysis() {
    let mut companion = local_companion();
    let outcome = companion
        .check_in(MoodInput::selection(MoodId::Anxious, Some(9)), None)
        .await
        .unwrap();
    let history = scored_history(&[60.0, 62.0, 61.0, 63.0, 60.0]);
    let analysis = companion.analyze(&history, Some(outcome.reading()), None);

    assert_eq!(analysis.stress_level, StressLevel::Critical);
    assert!(analysis.insights.iter().any(|i| i.contains("9/10")));
}
