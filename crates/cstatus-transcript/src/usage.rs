//! Token usage reduction
//!
//! Sums usage across every message and tracks the most recent main-chain
//! message, whose prompt size is the current context length.

use crate::reader::EntryReader;
use chrono::{DateTime, FixedOffset};
use cstatus_core::types::{MessageUsage, TokenMetrics, TranscriptEntry};
use std::io::BufRead;

/// Streaming reducer from transcript entries to [`TokenMetrics`]
///
/// Sidechain messages count toward the totals but never toward the context
/// length. A main-chain message replaces the current latest only when its
/// timestamp is strictly later, so the first of several equal timestamps
/// wins.
#[derive(Debug, Default)]
pub struct UsageReducer {
    input_tokens: u64,
    output_tokens: u64,
    cache_read_tokens: u64,
    cache_creation_tokens: u64,
    latest_main_chain: Option<(DateTime<FixedOffset>, MessageUsage)>,
}

impl UsageReducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one entry into the running totals
    pub fn observe(&mut self, entry: &TranscriptEntry) {
        let Some(usage) = entry.usage() else {
            return;
        };

        self.input_tokens = self.input_tokens.saturating_add(usage.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(usage.output_tokens);
        self.cache_read_tokens = self
            .cache_read_tokens
            .saturating_add(usage.cache_read_input_tokens);
        self.cache_creation_tokens = self
            .cache_creation_tokens
            .saturating_add(usage.cache_creation_input_tokens);

        if !entry.is_main_chain() {
            return;
        }
        let Some(timestamp) = entry.parsed_timestamp() else {
            return;
        };

        let is_newer = match &self.latest_main_chain {
            Some((latest, _)) => timestamp > *latest,
            None => true,
        };
        if is_newer {
            self.latest_main_chain = Some((timestamp, *usage));
        }
    }

    /// Timestamp of the message the context length is taken from
    pub fn latest_main_chain_at(&self) -> Option<DateTime<FixedOffset>> {
        self.latest_main_chain.map(|(ts, _)| ts)
    }

    /// Current totals
    pub fn finish(&self) -> TokenMetrics {
        let cached_tokens = self
            .cache_read_tokens
            .saturating_add(self.cache_creation_tokens);
        let total_tokens = self
            .input_tokens
            .saturating_add(self.output_tokens)
            .saturating_add(cached_tokens);
        let context_length = self
            .latest_main_chain
            .map(|(_, usage)| usage.context_tokens())
            .unwrap_or(0);

        TokenMetrics {
            input_tokens: self.input_tokens,
            output_tokens: self.output_tokens,
            cached_tokens,
            total_tokens,
            context_length,
        }
    }
}

/// Reduce a whole transcript to token metrics
///
/// # Examples
/// ```
/// use cstatus_transcript::usage::reduce_usage;
/// use std::io::Cursor;
///
/// let data = concat!(
///     r#"{"timestamp":"2025-08-01T10:00:00Z","message":{"usage":{"input_tokens":100,"output_tokens":50}}}"#,
///     "\n",
///     r#"{"timestamp":"2025-08-01T10:05:00Z","message":{"usage":{"input_tokens":200,"output_tokens":80,"cache_read_input_tokens":1000}}}"#,
/// );
/// let metrics = reduce_usage(Cursor::new(data));
/// assert_eq!(metrics.input_tokens, 300);
/// assert_eq!(metrics.total_tokens, 1430);
/// assert_eq!(metrics.context_length, 1200);
/// ```
pub fn reduce_usage<R: BufRead>(reader: R) -> TokenMetrics {
    let mut reducer = UsageReducer::new();
    for entry in EntryReader::new(reader) {
        reducer.observe(&entry);
    }
    reducer.finish()
}
