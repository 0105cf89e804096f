//! Command routing for the host bridge.

use crate::advice::RecommendationSelector;
use crate::config::MoodwellConfig;
use crate::engine::{Companion, MoodInput};
use crate::error::{MoodwellError, Result};
use crate::history;
use crate::host::contract::{CONTRACT_VERSION, CommandEnvelope, CommandName, ResponseEnvelope};
use crate::mood::{self, MoodReading};
use crate::trend::TrendAnalysis;
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

/// Something that turns a validated command into a response.
#[async_trait]
pub trait CommandHandler: Send + Sync + 'static {
    async fn handle(&self, envelope: &CommandEnvelope) -> Result<ResponseEnvelope>;
}

/// Production handler backed by a [`Companion`].
#[derive(Debug)]
pub struct CompanionHandler {
    companion: Mutex<Companion>,
}

impl CompanionHandler {
    pub fn new(companion: Companion) -> Self {
        Self {
            companion: Mutex::new(companion),
        }
    }

    pub fn from_config(config: &MoodwellConfig) -> Self {
        Self::new(Companion::from_config(config))
    }

    async fn handle_check_in(&self, envelope: &CommandEnvelope) -> Result<ResponseEnvelope> {
        let payload: CheckInPayload = parse_payload(envelope)?;
        let outcome = self
            .companion
            .lock()
            .await
            .check_in(payload.input, payload.intensity)
            .await;
        Ok(ResponseEnvelope::ok(
            envelope.request_id.clone(),
            serde_json::json!({ "outcome": to_json(&outcome)? }),
        ))
    }

    async fn handle_trend_analyze(&self, envelope: &CommandEnvelope) -> Result<ResponseEnvelope> {
        let payload: AnalyzePayload = parse_payload(envelope)?;
        let records = history::parse_lenient(payload.history);
        let analysis = self.companion.lock().await.analyze(
            &records,
            payload.current.map(clamp_reading),
            payload.latest_score,
        );
        Ok(ResponseEnvelope::ok(
            envelope.request_id.clone(),
            to_json(&analysis)?,
        ))
    }

    async fn handle_advice_select(&self, envelope: &CommandEnvelope) -> Result<ResponseEnvelope> {
        let payload: AdvicePayload = parse_payload(envelope)?;
        let (analysis, history_len) = match (payload.analysis, payload.history) {
            (Some(analysis), _) => (analysis, None),
            (None, Some(raw)) => {
                let records = history::parse_lenient(raw);
                let analysis = self.companion.lock().await.analyze(
                    &records,
                    payload.current.map(clamp_reading),
                    None,
                );
                (analysis, Some(records.len()))
            }
            (None, None) => {
                return Err(MoodwellError::InvalidInput(
                    "advice.select requires `analysis` or `history`".to_owned(),
                ));
            }
        };
        let total_sessions = payload.total_sessions.or(history_len).unwrap_or(0);

        let advice = match payload.hour {
            Some(hour) if hour > 23 => {
                return Err(MoodwellError::InvalidInput(format!(
                    "advice.select hour must be 0-23, got {hour}"
                )));
            }
            Some(hour) => {
                RecommendationSelector::select_at(&analysis, total_sessions, payload.rotation, hour)
            }
            None => RecommendationSelector::select(&analysis, total_sessions, payload.rotation),
        };
        Ok(ResponseEnvelope::ok(
            envelope.request_id.clone(),
            to_json(&advice)?,
        ))
    }
}

#[async_trait]
impl CommandHandler for CompanionHandler {
    async fn handle(&self, envelope: &CommandEnvelope) -> Result<ResponseEnvelope> {
        match envelope.command {
            CommandName::HostPing => Ok(ResponseEnvelope::ok(
                envelope.request_id.clone(),
                serde_json::json!({"pong": true}),
            )),
            CommandName::HostVersion => Ok(ResponseEnvelope::ok(
                envelope.request_id.clone(),
                serde_json::json!({
                    "contract_version": CONTRACT_VERSION,
                    "engine_version": env!("CARGO_PKG_VERSION"),
                }),
            )),
            CommandName::CatalogList => Ok(ResponseEnvelope::ok(
                envelope.request_id.clone(),
                serde_json::json!({
                    "moods": to_json(&mood::CATALOG)?,
                    "default_mood_id": mood::DEFAULT_MOOD_ID,
                }),
            )),
            CommandName::MoodCheckIn => self.handle_check_in(envelope).await,
            CommandName::TrendAnalyze => self.handle_trend_analyze(envelope).await,
            CommandName::AdviceSelect => self.handle_advice_select(envelope).await,
            CommandName::RuntimeStop => Ok(ResponseEnvelope::ok(
                envelope.request_id.clone(),
                serde_json::json!({"stopping": true}),
            )),
        }
    }
}

// ── Payloads ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CheckInPayload {
    input: MoodInput,
    #[serde(default)]
    intensity: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
struct AnalyzePayload {
    #[serde(default)]
    history: Vec<serde_json::Value>,
    #[serde(default)]
    current: Option<MoodReading>,
    #[serde(default)]
    latest_score: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct AdvicePayload {
    #[serde(default)]
    analysis: Option<TrendAnalysis>,
    #[serde(default)]
    history: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    current: Option<MoodReading>,
    #[serde(default)]
    total_sessions: Option<usize>,
    #[serde(default)]
    rotation: usize,
    #[serde(default)]
    hour: Option<u32>,
}

/// Deserialize the envelope payload; a null payload reads as `{}`.
fn parse_payload<T: DeserializeOwned>(envelope: &CommandEnvelope) -> Result<T> {
    let payload = if envelope.payload.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        envelope.payload.clone()
    };
    serde_json::from_value(payload).map_err(|e| {
        MoodwellError::InvalidInput(format!(
            "invalid {} payload: {e}",
            envelope.command.as_str()
        ))
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|e| MoodwellError::Protocol(format!("failed to serialize payload: {e}")))
}

fn clamp_reading(reading: MoodReading) -> MoodReading {
    MoodReading::new(reading.mood, reading.intensity)
}
