//! Configuration types for the mood engine.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodwellConfig {
    /// Optional remote text classifier.
    pub classifier: ClassifierConfig,
    /// Trend analysis calibration constants.
    pub trend: TrendCalibration,
    /// Insight template selection.
    pub insights: InsightConfig,
}

/// Remote text-classification endpoint settings.
///
/// The remote service is never required: when disabled, unreachable, slow or
/// returning garbage, classification falls back to the local keyword heuristic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Whether to attempt the remote call at all.
    pub enabled: bool,
    /// Inference endpoint accepting `{"inputs": "..."}`.
    pub endpoint_url: Option<String>,
    /// Name of the environment variable holding a bearer token.
    pub api_key_env: Option<String>,
    /// Hard deadline for the remote call in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint_url: None,
            api_key_env: None,
            timeout_ms: 3000,
        }
    }
}

impl ClassifierConfig {
    /// Resolve the bearer token from the configured environment variable.
    ///
    /// A missing or blank variable is treated as "no token".
    pub fn api_key(&self) -> Option<String> {
        let var = self.api_key_env.as_deref()?;
        std::env::var(var).ok().filter(|v| !v.trim().is_empty())
    }
}

/// Calibration constants for stress, pattern and recommendation rules.
///
/// These are fixed heuristics, not fitted values. They live in one block so
/// any recalibration shows up in a single diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendCalibration {
    /// Number of most recent records considered by the analyzer.
    pub recent_window: usize,
    /// Number of most recent records exposed to callers as "very recent".
    pub very_recent_window: usize,
    /// Minimum recent records before a pattern other than stable is reported.
    pub min_pattern_records: usize,
    /// Weighted trend above this is improving, below its negation declining.
    pub trend_threshold: f64,
    /// Score variance above this is inconsistent.
    pub variance_threshold: f64,
    /// Latest score below this is critical stress.
    pub critical_score: f64,
    /// Latest score below this is high stress.
    pub high_score: f64,
    /// Latest score at or above this (with low intensity) is low stress.
    pub low_score: f64,
    /// Mean recent score below this recommends a break.
    pub take_break_mean: f64,
    /// Mood intensity at or above this is critical stress.
    pub critical_intensity: u8,
    /// Mood intensity at or above this is high stress.
    pub high_intensity: u8,
    /// Mood intensity at or below this (with a high score) is low stress.
    pub low_intensity: u8,
    /// Confidence before any history is seen.
    pub confidence_base: u8,
    /// Confidence gained per recent record.
    pub confidence_step: u8,
    /// Confidence ceiling.
    pub confidence_cap: u8,
}

impl Default for TrendCalibration {
    fn default() -> Self {
        Self {
            recent_window: 10,
            very_recent_window: 3,
            min_pattern_records: 5,
            trend_threshold: 10.0,
            variance_threshold: 400.0,
            critical_score: 30.0,
            high_score: 50.0,
            low_score: 80.0,
            take_break_mean: 40.0,
            critical_intensity: 8,
            high_intensity: 7,
            low_intensity: 3,
            confidence_base: 60,
            confidence_step: 5,
            confidence_cap: 95,
        }
    }
}

/// Insight template selection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl MoodwellConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| crate::error::MoodwellError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::MoodwellError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/moodwell/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("moodwell").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("moodwell")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/moodwell-config/config.toml")
        }
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`MoodwellError::Config`](crate::error::MoodwellError::Config)
    /// describing the first violated constraint.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::MoodwellError;

        if self.classifier.enabled {
            let has_url = self
                .classifier
                .endpoint_url
                .as_deref()
                .is_some_and(|u| !u.trim().is_empty());
            if !has_url {
                return Err(MoodwellError::Config(
                    "classifier.enabled requires classifier.endpoint_url".to_owned(),
                ));
            }
            if self.classifier.timeout_ms == 0 {
                return Err(MoodwellError::Config(
                    "classifier.timeout_ms must be > 0".to_owned(),
                ));
            }
        }

        let t = &self.trend;
        if t.recent_window == 0 {
            return Err(MoodwellError::Config(
                "trend.recent_window must be > 0".to_owned(),
            ));
        }
        // The weighted trend compares two non-overlapping runs of three.
        if t.min_pattern_records < 3 {
            return Err(MoodwellError::Config(
                "trend.min_pattern_records must be >= 3".to_owned(),
            ));
        }
        if t.confidence_cap > 100 {
            return Err(MoodwellError::Config(
                "trend.confidence_cap must be <= 100".to_owned(),
            ));
        }
        Ok(())
    }
}
