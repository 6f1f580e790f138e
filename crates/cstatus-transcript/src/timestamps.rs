//! Timestamp extraction
//!
//! Collects every parseable entry timestamp in the order the entries appear
//! in the transcript. Offsets are kept as written so that hour flooring in
//! the block calculator happens in the writer's local time.

use crate::reader::EntryReader;
use chrono::{DateTime, Duration, FixedOffset};
use cstatus_core::types::TranscriptEntry;
use std::io::BufRead;
use tracing::trace;

/// Accumulates timestamps from transcript entries
#[derive(Debug, Default)]
pub struct TimestampCollector {
    timestamps: Vec<DateTime<FixedOffset>>,
    missing: usize,
    invalid: usize,
}

impl TimestampCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the entry's timestamp if it has a valid one
    pub fn observe(&mut self, entry: &TranscriptEntry) {
        let raw = match entry.timestamp.as_deref() {
            None | Some("") => {
                self.missing += 1;
                return;
            }
            Some(raw) => raw,
        };

        match DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => self.timestamps.push(ts),
            Err(e) => {
                self.invalid += 1;
                trace!("Ignoring unparseable timestamp {:?}: {}", raw, e);
            }
        }
    }

    /// Timestamps in encounter order
    pub fn timestamps(&self) -> &[DateTime<FixedOffset>] {
        &self.timestamps
    }

    /// Entries that carried no timestamp
    pub fn missing(&self) -> usize {
        self.missing
    }

    /// Entries whose timestamp could not be parsed
    pub fn invalid(&self) -> usize {
        self.invalid
    }

    /// Last minus first timestamp in encounter order
    ///
    /// Negative when the transcript is written out of order. `None` when no
    /// timestamp was seen.
    pub fn session_duration(&self) -> Option<Duration> {
        let first = self.timestamps.first()?;
        let last = self.timestamps.last()?;
        Some(last.signed_duration_since(*first))
    }

    /// Consume the collector, returning timestamps in ascending instant order
    ///
    /// The sort is stable, so equal instants keep their encounter order.
    pub fn into_sorted(mut self) -> Vec<DateTime<FixedOffset>> {
        self.timestamps.sort();
        self.timestamps
    }
}

/// Extract all valid timestamps from a transcript in encounter order
///
/// # Examples
/// ```
/// use cstatus_transcript::timestamps::extract_timestamps;
/// use std::io::Cursor;
///
/// let data = concat!(
///     "{\"timestamp\":\"2025-08-01T12:00:00Z\"}\n",
///     "{\"timestamp\":\"not a time\"}\n",
///     "{\"timestamp\":\"2025-08-01T10:00:00+02:00\"}\n",
/// );
/// let timestamps = extract_timestamps(Cursor::new(data));
/// assert_eq!(timestamps.len(), 2);
/// assert_eq!(timestamps[1].to_rfc3339(), "2025-08-01T10:00:00+02:00");
/// ```
pub fn extract_timestamps<R: BufRead>(reader: R) -> Vec<DateTime<FixedOffset>> {
    let mut collector = TimestampCollector::new();
    for entry in EntryReader::new(reader) {
        collector.observe(&entry);
    }
    collector.timestamps
}
