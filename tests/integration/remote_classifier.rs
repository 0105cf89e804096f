//! Remote classifier behaviour against a mock inference endpoint.

use moodwell::sentiment::{PolarityBackend, PolaritySource};
use moodwell::{
    ClassifierConfig, MoodwellError, PolarityClassifier, PolarityLabel, PolarityResult,
    RemoteClassifier,
};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEXT: &str = "I feel anxious and overwhelmed today";

fn remote(server: &MockServer, timeout: Duration) -> RemoteClassifier {
    RemoteClassifier::new(format!("{}/classify", server.uri()), timeout)
}

#[tokio::test]
async fn adopts_top_ranked_label() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .and(body_json(serde_json::json!({ "inputs": TEXT })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([[
            {"label": "POSITIVE", "score": 0.12},
            {"label": "NEGATIVE", "score": 0.88}
        ]])))
        .expect(1)
        .mount(&server)
        .await;

    let result = remote(&server, Duration::from_secs(2))
        .classify(TEXT)
        .await
        .unwrap();
    assert_eq!(result, PolarityResult::new(PolarityLabel::Negative, 0.88));
}

#[tokio::test]
async fn sends_bearer_token_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"label": "positive", "score": 0.9}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = remote(&server, Duration::from_secs(2))
        .with_api_key("secret-token")
        .classify("great day")
        .await
        .unwrap();
    assert_eq!(result.label, PolarityLabel::Positive);
}

#[tokio::test]
async fn server_error_is_classifier_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model loading"))
        .mount(&server)
        .await;

    let err = remote(&server, Duration::from_secs(2))
        .classify(TEXT)
        .await
        .unwrap_err();
    assert!(matches!(err, MoodwellError::Classifier(_)));
    assert!(err.to_string().contains("HTTP 500"));
    assert!(err.is_recoverable());
}

#[tokio::test]
async fn malformed_body_is_classifier_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"error\": \"nope\"}"))
        .mount(&server)
        .await;

    let err = remote(&server, Duration::from_secs(2))
        .classify(TEXT)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("malformed response"));
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"label": "POSITIVE", "score": 0.9}]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let err = remote(&server, Duration::from_millis(150))
        .classify(TEXT)
        .await
        .unwrap_err();
    assert!(matches!(err, MoodwellError::Timeout(150)), "got {err}");
}

#[tokio::test]
async fn unreachable_endpoint_is_classifier_error() {
    let remote = RemoteClassifier::new("http://127.0.0.1:59999/classify", Duration::from_secs(2));
    let err = remote.classify(TEXT).await.unwrap_err();
    assert!(err.is_recoverable(), "got {err}");
}

#[tokio::test]
async fn classifier_prefers_remote_when_healthy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"label": "NEUTRAL", "score": 0.61}])),
        )
        .mount(&server)
        .await;

    let classifier = PolarityClassifier::with_backend(
        Arc::new(remote(&server, Duration::from_secs(2))),
        Duration::from_secs(2),
    );
    let (result, source) = classifier.classify_with_source(TEXT).await;
    assert_eq!(source, PolaritySource::Remote);
    assert_eq!(result, PolarityResult::new(PolarityLabel::Neutral, 0.61));
    assert_eq!(classifier.fallback_count(), 0);
}

#[tokio::test]
async fn classifier_falls_back_on_every_failure_mode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"label": "POSITIVE", "score": 0.9}]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let endpoints = [
        format!("{}/broken", server.uri()),
        format!("{}/slow", server.uri()),
        "http://127.0.0.1:59999/classify".to_owned(),
    ];
    for endpoint in endpoints {
        let config = ClassifierConfig {
            enabled: true,
            endpoint_url: Some(endpoint.clone()),
            timeout_ms: 200,
            ..Default::default()
        };
        let classifier = PolarityClassifier::from_config(&config);
        assert!(classifier.has_backend());

        let (result, source) = tokio::time::timeout(
            Duration::from_secs(3),
            classifier.classify_with_source(TEXT),
        )
        .await
        .expect("fallback must not block");
        assert_eq!(source, PolaritySource::Local, "{endpoint}");
        assert_eq!(result.label, PolarityLabel::Negative, "{endpoint}");
        assert_eq!(classifier.fallback_count(), 1, "{endpoint}");
    }
}
