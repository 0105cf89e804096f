//! Configuration files driving the companion end to end.

use crate::helpers::scored_history;
use moodwell::{Companion, MoodId, MoodInput, MoodwellConfig, StressLevel, TrendPattern};

#[tokio::test]
async fn seeded_config_gives_repeatable_insights() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[insights]\nseed = 99\n").unwrap();
    let config = MoodwellConfig::from_file(&path).unwrap();

    let mut a = Companion::from_config(&config);
    let mut b = Companion::from_config(&config);
    for _ in 0..5 {
        let x = a
            .check_in(MoodInput::selection(MoodId::Sad, Some(5)), None)
            .await
            .unwrap();
        let y = b
            .check_in(MoodInput::selection(MoodId::Sad, Some(5)), None)
            .await
            .unwrap();
        assert_eq!(x.insight, y.insight);
    }
    assert!(!a.classifier().has_backend());
}

#[test]
fn recalibrated_thresholds_change_the_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[trend]\ncritical_score = 20.0\nvariance_threshold = 30.0\n",
    )
    .unwrap();
    let config = MoodwellConfig::from_file(&path).unwrap();

    let tuned = Companion::from_config(&config);
    let stock = Companion::from_config(&MoodwellConfig::default());
    let calibration = tuned.analyzer().calibration();
    assert_eq!(calibration.critical_score, 20.0);
    assert_eq!(calibration.variance_threshold, 30.0);
    assert_eq!(calibration.recent_window, config.trend.recent_window);

    // Variance 40 with a flat weighted trend.
    let history = scored_history(&[60.0, 60.0, 60.0, 70.0, 50.0, 70.0, 50.0, 60.0, 60.0, 60.0]);
    assert_eq!(
        stock.analyze(&history, None, Some(25.0)).stress_level,
        StressLevel::Critical
    );
    let analysis = tuned.analyze(&history, None, Some(25.0));
    assert_eq!(analysis.stress_level, StressLevel::High);
    assert_eq!(analysis.pattern, TrendPattern::Inconsistent);
    assert_eq!(
        stock.analyze(&history, None, None).pattern,
        TrendPattern::Stable
    );
}

#[test]
fn invalid_calibration_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[trend]\nrecent_window = 0\n").unwrap();
    let err = MoodwellConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("recent_window"));
}
