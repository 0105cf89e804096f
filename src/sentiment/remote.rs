//! HTTP client for a remote text-classification endpoint.
//!
//! Posts `{"inputs": "<text>"}` and expects a ranked list of labels in the
//! common inference-API shape, either flat or wrapped once:
//!
//! ```json
//! [{"label": "NEGATIVE", "score": 0.93}, {"label": "POSITIVE", "score": 0.07}]
//! [[{"label": "NEGATIVE", "score": 0.93}, {"label": "POSITIVE", "score": 0.07}]]
//! ```
//!
//! The highest-scoring entry is adopted as-is. Unknown labels or scores
//! outside `0.0..=1.0` make the whole response malformed.

use super::{PolarityBackend, PolarityLabel, PolarityResult};
use crate::config::ClassifierConfig;
use crate::error::{MoodwellError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Remote classifier backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct RemoteClassifier {
    endpoint_url: String,
    api_key: Option<String>,
    timeout: Duration,
    client: reqwest::Client,
}

impl RemoteClassifier {
    /// Create a client for `endpoint_url` with a per-request timeout.
    pub fn new(endpoint_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            endpoint_url: endpoint_url.into(),
            api_key: None,
            timeout,
            client,
        }
    }

    /// Attach a bearer token.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Build from config. Returns `None` when disabled or no endpoint is set.
    pub fn from_config(config: &ClassifierConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let url = config
            .endpoint_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())?;
        let timeout = Duration::from_millis(config.timeout_ms.max(1));
        let mut remote = Self::new(url, timeout);
        if let Some(key) = config.api_key() {
            remote = remote.with_api_key(key);
        }
        Some(remote)
    }

    /// The configured endpoint.
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn map_transport_error(&self, err: &reqwest::Error) -> MoodwellError {
        if err.is_timeout() {
            MoodwellError::Timeout(self.timeout.as_millis() as u64)
        } else if err.is_connect() {
            MoodwellError::Classifier(format!("endpoint unreachable: {err}"))
        } else {
            MoodwellError::Classifier(format!("transport error: {err}"))
        }
    }
}

#[async_trait]
impl PolarityBackend for RemoteClassifier {
    fn name(&self) -> &str {
        "remote"
    }

    async fn classify(&self, text: &str) -> Result<PolarityResult> {
        let mut request = self
            .client
            .post(&self.endpoint_url)
            .json(&serde_json::json!({ "inputs": text }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message: String = body.chars().take(200).collect();
            return Err(MoodwellError::Classifier(format!(
                "HTTP {}: {message}",
                status.as_u16()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| self.map_transport_error(&e))?;
        parse_ranked_labels(&body).ok_or_else(|| {
            MoodwellError::Classifier(format!(
                "malformed response: {}",
                body.chars().take(200).collect::<String>()
            ))
        })
    }
}

// ── Helpers ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RankedLabel {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RankedResponse {
    Flat(Vec<RankedLabel>),
    Nested(Vec<Vec<RankedLabel>>),
}

/// Parse a ranked `{label, score}` list and return its top entry.
fn parse_ranked_labels(body: &str) -> Option<PolarityResult> {
    let parsed: RankedResponse = serde_json::from_str(body).ok()?;
    let entries = match parsed {
        RankedResponse::Flat(entries) => entries,
        RankedResponse::Nested(mut outer) => {
            if outer.is_empty() {
                return None;
            }
            outer.swap_remove(0)
        }
    };

    let top = entries
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))?;
    let label = PolarityLabel::parse(&top.label)?;
    if !top.score.is_finite() || !(0.0..=1.0).contains(&top.score) {
        return None;
    }
    Some(PolarityResult::new(label, top.score))
}
