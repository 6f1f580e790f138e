//! Common test utilities and helpers for cstatus tests
//!
//! Provides a builder for transcript lines and helpers to write them to
//! temporary JSONL files.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{Value, json};
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Fixed reference time so block calculations are deterministic
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 1, 20, 30, 0).unwrap()
}

/// `fixed_now()` shifted by a number of minutes
pub fn minutes_from_now(minutes: i64) -> DateTime<Utc> {
    fixed_now() + Duration::minutes(minutes)
}

/// Builder for one transcript line
#[derive(Debug, Clone)]
pub struct TranscriptLineBuilder {
    timestamp: Option<String>,
    sidechain: Option<bool>,
    usage: Option<(u64, u64, u64, u64)>,
    kind: &'static str,
}

impl Default for TranscriptLineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptLineBuilder {
    /// An assistant message at `fixed_now()` without usage
    pub fn new() -> Self {
        Self {
            timestamp: Some(fixed_now().to_rfc3339()),
            sidechain: Some(false),
            usage: None,
            kind: "assistant",
        }
    }

    pub fn at(mut self, ts: DateTime<Utc>) -> Self {
        self.timestamp = Some(ts.to_rfc3339());
        self
    }

    /// Use a raw timestamp string, valid or not
    pub fn with_raw_timestamp(mut self, raw: &str) -> Self {
        self.timestamp = Some(raw.to_string());
        self
    }

    pub fn without_timestamp(mut self) -> Self {
        self.timestamp = None;
        self
    }

    pub fn sidechain(mut self) -> Self {
        self.sidechain = Some(true);
        self
    }

    /// Omit the `isSidechain` field entirely
    pub fn without_sidechain_flag(mut self) -> Self {
        self.sidechain = None;
        self
    }

    pub fn user(mut self) -> Self {
        self.kind = "user";
        self
    }

    /// input, output, cache read, cache creation
    pub fn with_usage(
        mut self,
        input: u64,
        output: u64,
        cache_read: u64,
        cache_creation: u64,
    ) -> Self {
        self.usage = Some((input, output, cache_read, cache_creation));
        self
    }

    /// Render as a JSONL line without the trailing newline
    pub fn build(self) -> String {
        let message = match self.usage {
            Some((input, output, cache_read, cache_creation)) => json!({
                "role": self.kind,
                "content": [{"type": "text", "text": "ok"}],
                "usage": {
                    "input_tokens": input,
                    "output_tokens": output,
                    "cache_read_input_tokens": cache_read,
                    "cache_creation_input_tokens": cache_creation,
                    "service_tier": "standard"
                }
            }),
            None => json!({"role": self.kind, "content": "hello"}),
        };
        let mut line = json!({
            "parentUuid": null,
            "type": self.kind,
            "sessionId": "test-session",
            "message": message
        });
        if let Some(ts) = self.timestamp {
            line["timestamp"] = Value::from(ts);
        }
        if let Some(sidechain) = self.sidechain {
            line["isSidechain"] = Value::from(sidechain);
        }

        line.to_string()
    }
}

/// Lines that must be skipped without affecting anything else
pub const MALFORMED_LINES: &[&str] = &[
    "",
    "   ",
    "not json",
    "{\"timestamp\":",
    "[1,2,3]",
    "42",
    "{\"message\":{\"usage\":{\"input_tokens\":\"many\"}}}",
    "{\"isSidechain\":\"no\"}",
];

/// Write lines to `transcript.jsonl` in a fresh temporary directory
pub async fn write_transcript(lines: &[String]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("transcript.jsonl");

    let mut file = fs::File::create(&path).await.unwrap();
    for line in lines {
        file.write_all(line.as_bytes()).await.unwrap();
        file.write_all(b"\n").await.unwrap();
    }
    file.flush().await.unwrap();

    (temp_dir, path)
}
