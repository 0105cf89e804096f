//! Polarity classification with a remote-first, local-fallback strategy.
//!
//! [`PolarityClassifier`] tries an optional [`PolarityBackend`] under a hard
//! deadline. Any failure (timeout, transport error, bad status, malformed
//! body) is logged and answered by the local keyword heuristic in
//! [`lexicon`], so classification always produces a result.

pub mod lexicon;
pub mod remote;

pub use lexicon::{EmotionBucket, EmotionProfile, classify_local};
pub use remote::RemoteClassifier;

use crate::config::ClassifierConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Coarse sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolarityLabel {
    Positive,
    Negative,
    Neutral,
}

impl PolarityLabel {
    /// Render to wire format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
            Self::Neutral => "NEUTRAL",
        }
    }

    /// Parse a label case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(Self::Positive),
            "negative" => Some(Self::Negative),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for PolarityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polarity label plus confidence in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarityResult {
    pub label: PolarityLabel,
    pub score: f64,
}

impl PolarityResult {
    /// Score reported when nothing in the text carries sentiment.
    pub const NEUTRAL_SCORE: f64 = 0.5;

    /// Create a result, clamping the score into `0.0..=1.0`.
    #[must_use]
    pub fn new(label: PolarityLabel, score: f64) -> Self {
        Self {
            label,
            score: score.clamp(0.0, 1.0),
        }
    }

    /// The default `NEUTRAL` / 0.5 result.
    #[must_use]
    pub fn neutral() -> Self {
        Self::new(PolarityLabel::Neutral, Self::NEUTRAL_SCORE)
    }
}

/// Where a classification came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolaritySource {
    Remote,
    Local,
}

/// A classification backend that may fail.
#[async_trait]
pub trait PolarityBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Classify `text`.
    async fn classify(&self, text: &str) -> crate::Result<PolarityResult>;
}

/// Polarity classifier that never fails.
///
/// Holds an optional backend (typically [`RemoteClassifier`]). Without one,
/// every call goes straight to [`classify_local`].
pub struct PolarityClassifier {
    backend: Option<Arc<dyn PolarityBackend>>,
    timeout: Duration,
    /// Count of local fallback activations after a backend failure.
    fallback_count: AtomicU32,
}

impl PolarityClassifier {
    /// Classifier with no remote backend.
    pub fn local_only() -> Self {
        Self {
            backend: None,
            timeout: Duration::ZERO,
            fallback_count: AtomicU32::new(0),
        }
    }

    /// Classifier that tries `backend` first, giving it at most `timeout`.
    pub fn with_backend(backend: Arc<dyn PolarityBackend>, timeout: Duration) -> Self {
        Self {
            backend: Some(backend),
            timeout,
            fallback_count: AtomicU32::new(0),
        }
    }

    /// Build from config: remote when enabled with an endpoint, local otherwise.
    pub fn from_config(config: &ClassifierConfig) -> Self {
        match RemoteClassifier::from_config(config) {
            Some(remote) => {
                let timeout = remote.timeout();
                tracing::info!(endpoint = remote.endpoint_url(), "remote classifier enabled");
                Self::with_backend(Arc::new(remote), timeout)
            }
            None => Self::local_only(),
        }
    }

    /// Whether a remote backend is configured.
    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Number of times a backend failure was answered locally.
    pub fn fallback_count(&self) -> u32 {
        self.fallback_count.load(Ordering::Relaxed)
    }

    /// Classify `text`, always returning a result.
    pub async fn classify(&self, text: &str) -> PolarityResult {
        self.classify_with_source(text).await.0
    }

    /// Classify `text` and report whether the remote or local path answered.
    ///
    /// Dropping the returned future abandons the remote call; nothing is left
    /// holding a lock or blocking a thread.
    pub async fn classify_with_source(&self, text: &str) -> (PolarityResult, PolaritySource) {
        let Some(backend) = &self.backend else {
            return (classify_local(text), PolaritySource::Local);
        };

        match tokio::time::timeout(self.timeout, backend.classify(text)).await {
            Ok(Ok(result)) => {
                tracing::debug!(
                    backend = backend.name(),
                    label = %result.label,
                    score = result.score,
                    "remote polarity"
                );
                return (result, PolaritySource::Remote);
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    backend = backend.name(),
                    error = %e,
                    "remote classification failed, using local heuristic"
                );
            }
            Err(_) => {
                tracing::warn!(
                    backend = backend.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "remote classification timed out, using local heuristic"
                );
            }
        }

        self.fallback_count.fetch_add(1, Ordering::Relaxed);
        (classify_local(text), PolaritySource::Local)
    }
}

impl Default for PolarityClassifier {
    fn default() -> Self {
        Self::local_only()
    }
}

impl fmt::Debug for PolarityClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolarityClassifier")
            .field("backend", &self.backend.as_ref().map(|b| b.name().to_owned()))
            .field("timeout", &self.timeout)
            .field("fallback_count", &self.fallback_count())
            .finish()
    }
}
