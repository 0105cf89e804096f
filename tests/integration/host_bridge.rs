//! End-to-end tests for the `moodwell-host` binary (stdin/stdout JSON bridge).
//!
//! Each test spawns a fresh subprocess, sends JSON commands over stdin, and
//! reads JSON responses from stdout.

use serde_json::{Value, json};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

struct HostBridgeHarness {
    child: Child,
    stdin: BufWriter<ChildStdin>,
    reader: Lines<BufReader<ChildStdout>>,
    _config_dir: tempfile::TempDir,
}

impl HostBridgeHarness {
    async fn spawn() -> Self {
        // Point at a missing file so the host runs on defaults.
        let config_dir = tempfile::tempdir().unwrap();
        let mut child = Command::new(env!("CARGO_BIN_EXE_moodwell-host"))
            .env("MOODWELL_CONFIG", config_dir.path().join("absent.toml"))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .expect("failed to spawn moodwell-host");

        let child_stdin = child.stdin.take().expect("no stdin on child process");
        let child_stdout = child.stdout.take().expect("no stdout on child process");

        Self {
            child,
            stdin: BufWriter::new(child_stdin),
            reader: BufReader::new(child_stdout).lines(),
            _config_dir: config_dir,
        }
    }

    async fn send_raw(&mut self, line: &str) -> Value {
        self.stdin.write_all(line.as_bytes()).await.unwrap();
        self.stdin.write_all(b"\n").await.unwrap();
        self.stdin.flush().await.unwrap();
        self.read_line().await
    }

    async fn send(&mut self, command: &str, payload: Value) -> Value {
        let envelope = json!({
            "v": 1,
            "request_id": format!("test-{command}"),
            "command": command,
            "payload": payload
        });
        self.send_raw(&envelope.to_string()).await
    }

    async fn read_line(&mut self) -> Value {
        let line = tokio::time::timeout(Duration::from_secs(10), self.reader.next_line())
            .await
            .expect("timeout reading from moodwell-host")
            .expect("IO error reading from moodwell-host")
            .expect("unexpected EOF from moodwell-host");
        serde_json::from_str(&line)
            .unwrap_or_else(|e| panic!("invalid JSON from moodwell-host: {e}\nraw line: {line}"))
    }

    /// Close stdin and verify the process exits cleanly.
    async fn shutdown(mut self) {
        drop(self.stdin);
        let status = tokio::time::timeout(Duration::from_secs(5), self.child.wait())
            .await
            .expect("timeout waiting for moodwell-host to exit")
            .expect("failed to wait for moodwell-host");
        assert!(status.success(), "moodwell-host exited with: {status}");
    }
}

#[tokio::test]
async fn ping_and_version() {
    let mut h = HostBridgeHarness::spawn().await;
    let resp = h.send("host.ping", json!({})).await;
    assert_eq!(resp["ok"], true);
    assert_eq!(resp["request_id"], "test-host.ping");
    assert_eq!(resp["payload"]["pong"], true);

    let resp = h.send("host.version", json!({})).await;
    assert_eq!(resp["payload"]["contract_version"], 1);
    h.shutdown().await;
}

#[tokio::test]
async fn catalog_and_check_in() {
    let mut h = HostBridgeHarness::spawn().await;
    let resp = h.send("catalog.list", json!({})).await;
    let moods = resp["payload"]["moods"].as_array().unwrap();
    assert_eq!(moods.len(), 8);
    assert_eq!(moods[0]["id"], "anxious");

    let resp = h
        .send(
            "mood.check_in",
            json!({"input": {"kind": "text", "text": "I feel anxious and overwhelmed today"}}),
        )
        .await;
    assert_eq!(resp["ok"], true);
    let outcome = &resp["payload"]["outcome"];
    assert_eq!(outcome["mood"]["id"], "anxious");
    assert_eq!(outcome["polarity"]["label"], "NEGATIVE");
    assert_eq!(outcome["polarity_source"], "local");
    h.shutdown().await;
}

#[tokio::test]
async fn analyze_then_advise() {
    let mut h = HostBridgeHarness::spawn().await;
    let history: Vec<Value> = [35.0, 35.0, 35.0, 30.0, 30.0, 30.0, 30.0, 30.0, 60.0]
        .iter()
        .enumerate()
        .map(|(i, score)| {
            json!({
                "timestamp": format!("2026-04-0{}T09:00:00Z", i + 1),
                "mood_id": "tired",
                "activity_kind": "walk",
                "score": score,
                "duration_minutes": 20
            })
        })
        .collect();

    let resp = h
        .send(
            "trend.analyze",
            json!({"history": history, "latest_score": 50.0, "current": {"mood": "tired", "intensity": 5}}),
        )
        .await;
    assert_eq!(resp["ok"], true);
    assert_eq!(resp["payload"]["recommendation"], "take-break");
    let analysis = resp["payload"].clone();

    let resp = h
        .send(
            "advice.select",
            json!({"analysis": analysis, "total_sessions": 9, "rotation": 0, "hour": 14}),
        )
        .await;
    assert_eq!(resp["payload"]["category"], "digital-detox");
    assert_eq!(resp["payload"]["urgency"], "medium");
    h.shutdown().await;
}

#[tokio::test]
async fn garbage_then_stop() {
    let mut h = HostBridgeHarness::spawn().await;
    let resp = h.send_raw("{ not json").await;
    assert_eq!(resp["ok"], false);
    assert_eq!(resp["request_id"], "parse-error");

    let resp = h.send("runtime.stop", json!({})).await;
    assert_eq!(resp["ok"], true);

    let status = tokio::time::timeout(Duration::from_secs(5), h.child.wait())
        .await
        .expect("host should exit after runtime.stop")
        .unwrap();
    assert!(status.success());
}

#[tokio::test]
async fn bad_payload_is_an_error_response() {
    let mut h = HostBridgeHarness::spawn().await;
    let resp = h.send("mood.check_in", json!({"input": {"kind": "mystery"}})).await;
    assert_eq!(resp["ok"], false);
    assert!(resp["error"].as_str().unwrap().contains("mood.check_in"));
    h.shutdown().await;
}
