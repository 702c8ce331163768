//! Replay command: library entry points and the binary's text / NDJSON output.

use std::path::Path;
use std::process::Command;

use cli::{replay, replay_events, ReplayOptions};
use serde_json::{json, Value};

const REPLY: &str = r#"[{"type":"reasoning","summary":[]},{"type":"text","text":"Hey there!"}]"#;

fn write_transcript(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("greeting.json");
    let transcript = json!({
        "input": [{"role": "user", "content": "Hi"}],
        "echo_input": true,
        "batches": [
            [{"node": "supervisor", "messages": []}],
            [{"node": "supervisor", "messages": [
                {"id": "2", "role": "assistant", "content": REPLY}
            ]}]
        ]
    });
    std::fs::write(&path, transcript.to_string()).unwrap();
    path
}

fn opts(path: std::path::PathBuf) -> ReplayOptions {
    ReplayOptions {
        transcript: path,
        ..ReplayOptions::default()
    }
}

/// **Scenario**: predict over the transcript returns the marker and the unwrapped reply.
#[tokio::test]
async fn replay_returns_marker_and_reply() {
    let dir = tempfile::tempdir().unwrap();
    let mut o = opts(write_transcript(dir.path()));
    o.custom_inputs = Some(r#"{"trace": true}"#.to_string());
    let response = replay(&o).await.unwrap();
    let texts: Vec<_> = response
        .output
        .iter()
        .filter_map(|i| i.message_text())
        .collect();
    assert_eq!(texts, ["<name>supervisor</name>", "Hey there!"]);
    assert_eq!(response.custom_outputs, Some(json!({"trace": true})));
}

/// **Scenario**: an extra `--message` turn is part of the echo and is not replayed.
#[tokio::test]
async fn replay_with_extra_message_still_hides_input() {
    let dir = tempfile::tempdir().unwrap();
    let mut o = opts(write_transcript(dir.path()));
    o.message = Some("and again".to_string());
    let response = replay(&o).await.unwrap();
    assert_eq!(response.output.len(), 2);
}

/// **Scenario**: streamed events carry the response id and consecutive sequence numbers.
#[tokio::test]
async fn replay_events_are_enveloped() {
    let dir = tempfile::tempdir().unwrap();
    let mut o = opts(write_transcript(dir.path()));
    o.response_id = Some("resp-test".to_string());
    let mut events: Vec<Value> = Vec::new();
    let count = replay_events(&o, |e| {
        events.push(e);
        Ok(())
    })
    .await
    .unwrap();
    assert_eq!(count, 2);
    for (i, e) in events.iter().enumerate() {
        assert_eq!(e["type"], "response.output_item.done");
        assert_eq!(e["response_id"], "resp-test");
        assert_eq!(e["sequence_number"], i as u64);
    }
    assert_eq!(events[1]["item"]["content"][0]["text"], "Hey there!");
}

#[tokio::test]
async fn replay_missing_transcript_fails() {
    let missing = opts("/nonexistent/greeting.json".into());
    let err = replay(&missing).await.unwrap_err();
    assert!(err.to_string().contains("/nonexistent/greeting.json"));
}

#[test]
fn binary_replay_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_transcript(dir.path());
    let out = Command::new(env!("CARGO_BIN_EXE_relay"))
        .arg("replay")
        .arg(&path)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(out.status.success(), "{}", stderr);
    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines, ["Entering: supervisor", "Hey there!"]);
}

#[test]
fn binary_replay_stream_is_ndjson() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_transcript(dir.path());
    let out = Command::new(env!("CARGO_BIN_EXE_relay"))
        .arg("replay")
        .arg(&path)
        .arg("--stream")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(out.status.success(), "{}", stderr);
    let stdout = String::from_utf8_lossy(&out.stdout);
    let events: Vec<Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(events.len(), 2);
    let response_id = events[0]["response_id"].as_str().unwrap();
    assert!(response_id.starts_with("resp_"));
}
