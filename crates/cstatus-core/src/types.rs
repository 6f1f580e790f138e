//! Core domain types for cstatus
//!
//! This module contains the decoded shape of a transcript line and the
//! metrics derived from a whole transcript. Transcript lines are decoded
//! leniently: every field is optional and `null` is treated like an absent
//! field, so only lines with a genuinely wrong shape are rejected.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Treat `null` token counts the same as missing ones
fn null_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<u64>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Token usage recorded on a single transcript message
///
/// # Examples
/// ```
/// use cstatus_core::types::MessageUsage;
///
/// let usage = MessageUsage::new(100, 50, 20, 5);
/// assert_eq!(usage.cached_tokens(), 25);
/// // Output tokens are not part of the input context window
/// assert_eq!(usage.context_tokens(), 125);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageUsage {
    /// Input tokens used
    #[serde(default, deserialize_with = "null_as_zero")]
    pub input_tokens: u64,
    /// Output tokens generated
    #[serde(default, deserialize_with = "null_as_zero")]
    pub output_tokens: u64,
    /// Tokens read from the prompt cache
    #[serde(default, deserialize_with = "null_as_zero")]
    pub cache_read_input_tokens: u64,
    /// Tokens written to the prompt cache
    #[serde(default, deserialize_with = "null_as_zero")]
    pub cache_creation_input_tokens: u64,
}

impl MessageUsage {
    /// Create a new MessageUsage
    pub fn new(
        input_tokens: u64,
        output_tokens: u64,
        cache_read_input_tokens: u64,
        cache_creation_input_tokens: u64,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            cache_read_input_tokens,
            cache_creation_input_tokens,
        }
    }

    /// Cache reads plus cache writes
    pub fn cached_tokens(&self) -> u64 {
        self.cache_read_input_tokens.saturating_add(self.cache_creation_input_tokens)
    }

    /// Tokens occupying the model's input context for this message
    pub fn context_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.cached_tokens())
    }
}

/// Message body of a transcript entry; only usage matters here
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TranscriptMessage {
    /// Usage data, present on assistant responses
    #[serde(default)]
    pub usage: Option<MessageUsage>,
}

/// One decoded line of a session transcript
///
/// # Examples
/// ```
/// use cstatus_core::types::TranscriptEntry;
///
/// let line = r#"{"timestamp":"2025-08-01T10:15:00Z","isSidechain":false,"message":{"usage":{"input_tokens":12,"output_tokens":3}}}"#;
/// let entry: TranscriptEntry = serde_json::from_str(line).unwrap();
/// assert!(entry.is_main_chain());
/// assert_eq!(entry.usage().map(|u| u.input_tokens), Some(12));
/// assert!(entry.parsed_timestamp().is_some());
/// ```
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// RFC3339 timestamp of the event
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Whether this entry belongs to a side conversation (e.g. a sub-agent)
    #[serde(rename = "isSidechain", default)]
    pub is_sidechain: Option<bool>,
    /// Message payload
    #[serde(default)]
    pub message: Option<TranscriptMessage>,
}

impl TranscriptEntry {
    /// Usage record of the message, if any
    pub fn usage(&self) -> Option<&MessageUsage> {
        self.message.as_ref().and_then(|m| m.usage.as_ref())
    }

    /// Entries without the flag belong to the main chain
    pub fn is_main_chain(&self) -> bool {
        !self.is_sidechain.unwrap_or(false)
    }

    /// Parse the timestamp, keeping the offset it was written with
    pub fn parsed_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        self.timestamp
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
    }
}

/// Token usage derived from a transcript
///
/// `context_length` comes from the latest main-chain message only; the
/// other counters are sums over every message in the transcript.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetrics {
    /// Input tokens across all messages
    pub input_tokens: u64,
    /// Output tokens across all messages
    pub output_tokens: u64,
    /// Cache read and cache creation tokens across all messages
    pub cached_tokens: u64,
    /// Input + output + cached
    pub total_tokens: u64,
    /// Tokens in the active context window
    pub context_length: u64,
}

impl TokenMetrics {
    /// True for the "no data yet" value
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The active 5-hour work block
///
/// # Examples
/// ```
/// use cstatus_core::types::BlockMetrics;
/// use chrono::{DateTime, TimeZone, Utc};
///
/// let block = BlockMetrics {
///     start_time: DateTime::parse_from_rfc3339("2025-08-01T10:00:00Z").unwrap(),
///     last_activity: DateTime::parse_from_rfc3339("2025-08-01T11:20:00Z").unwrap(),
/// };
/// let now = Utc.with_ymd_and_hms(2025, 8, 1, 11, 30, 0).unwrap();
/// assert_eq!(block.elapsed_at(now).num_minutes(), 90);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMetrics {
    /// Start of the current block
    pub start_time: DateTime<FixedOffset>,
    /// Most recent activity seen in the transcript
    pub last_activity: DateTime<FixedOffset>,
}

impl BlockMetrics {
    /// Time since the block started, negative if the start lies after `now`
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.start_time)
    }
}

/// Everything the metrics facade derives from one transcript
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TranscriptMetrics {
    /// Token counters and context length
    pub tokens: TokenMetrics,
    /// Active work block, `None` when there is no recent activity
    pub block: Option<BlockMetrics>,
    /// Last minus first timestamp in file order
    pub session_duration: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_entry_deserialization() {
        let line = concat!(
            r#"{"parentUuid":null,"isSidechain":true,"timestamp":"2025-08-01T10:15:00.123Z","#,
            r#""type":"assistant","message":{"role":"assistant","usage":{"input_tokens":10,"#,
            r#""output_tokens":20,"cache_read_input_tokens":30,"#,
            r#""cache_creation_input_tokens":40,"service_tier":"standard"}}}"#
        );
        let entry: TranscriptEntry = serde_json::from_str(line).unwrap();

        assert!(!entry.is_main_chain());
        let usage = entry.usage().unwrap();
        assert_eq!(*usage, MessageUsage::new(10, 20, 30, 40));
        assert_eq!(usage.cached_tokens(), 70);
        assert_eq!(usage.context_tokens(), 80);
    }

    #[test]
    fn test_missing_fields_default() {
        let entry: TranscriptEntry = serde_json::from_str("{}").unwrap();
        assert!(entry.is_main_chain());
        assert!(entry.usage().is_none());
        assert!(entry.parsed_timestamp().is_none());
    }

    #[test]
    fn test_null_fields_are_absent() {
        let line = concat!(
            r#"{"timestamp":null,"isSidechain":null,"#,
            r#""message":{"usage":{"input_tokens":null,"output_tokens":7}}}"#
        );
        let entry: TranscriptEntry = serde_json::from_str(line).unwrap();

        assert!(entry.is_main_chain());
        assert!(entry.timestamp.is_none());
        assert_eq!(*entry.usage().unwrap(), MessageUsage::new(0, 7, 0, 0));
    }

    #[test]
    fn test_wrong_field_types_rejected() {
        for line in [
            r#"{"timestamp":42}"#,
            r#"{"isSidechain":"yes"}"#,
            r#"{"message":{"usage":{"input_tokens":-5}}}"#,
            "null",
        ] {
            let parsed = serde_json::from_str::<TranscriptEntry>(line);
            assert!(parsed.is_err(), "accepted {line}");
        }
    }

    #[test]
    fn test_timestamp_keeps_offset() {
        let entry = TranscriptEntry {
            timestamp: Some("2025-08-01T10:15:00+05:30".to_string()),
            ..Default::default()
        };
        let ts = entry.parsed_timestamp().unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
        assert_eq!(ts.to_rfc3339(), "2025-08-01T10:15:00+05:30");
    }

    #[test]
    fn test_invalid_timestamp() {
        for ts in ["", "yesterday", "2025-08-01", "2025-08-01T10:15:00"] {
            let entry = TranscriptEntry {
                timestamp: Some(ts.to_string()),
                ..Default::default()
            };
            assert!(entry.parsed_timestamp().is_none(), "accepted {ts:?}");
        }
    }

    #[test]
    fn test_token_metrics_serialization() {
        let metrics = TokenMetrics {
            input_tokens: 100,
            output_tokens: 50,
            cached_tokens: 25,
            total_tokens: 175,
            context_length: 60,
        };
        let json = serde_json::to_value(metrics).unwrap();
        assert_eq!(json["inputTokens"], 100);
        assert_eq!(json["contextLength"], 60);
        assert!(!metrics.is_empty());
        assert!(TokenMetrics::default().is_empty());
    }

    #[test]
    fn test_usage_saturates() {
        let usage = MessageUsage::new(u64::MAX, 0, 1, 1);
        assert_eq!(usage.context_tokens(), u64::MAX);
    }
}
