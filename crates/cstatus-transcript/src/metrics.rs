//! Transcript metrics facade
//!
//! One pass over the transcript feeds both the usage reducer and the
//! timestamp collector. The facade never fails: a transcript that is
//! missing, unreadable, or fails part-way yields empty metrics, because the
//! statusline must always render.

use crate::block::BlockCalculator;
use crate::reader::EntryReader;
use crate::timestamps::TimestampCollector;
use crate::usage::UsageReducer;
use chrono::{DateTime, Utc};
use cstatus_core::config::MetricsConfig;
use cstatus_core::error::{CstatusError, Result};
use cstatus_core::types::TranscriptMetrics;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use tracing::{debug, warn};

/// Compute metrics for the transcript at `path` relative to the current time
pub fn compute_metrics(path: impl AsRef<Path>, config: &MetricsConfig) -> TranscriptMetrics {
    compute_metrics_at(path, config, Utc::now())
}

/// Compute metrics for the transcript at `path` with an explicit `now`
///
/// An empty path means the host did not provide a transcript and yields
/// empty metrics without touching the filesystem.
pub fn compute_metrics_at(
    path: impl AsRef<Path>,
    config: &MetricsConfig,
    now: DateTime<Utc>,
) -> TranscriptMetrics {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return TranscriptMetrics::default();
    }

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Transcript {} does not exist yet", path.display());
            return TranscriptMetrics::default();
        }
        Err(e) => {
            warn!("Failed to open transcript {}: {}", path.display(), e);
            return TranscriptMetrics::default();
        }
    };

    match compute_from_reader(BufReader::new(file), config, now) {
        Ok(metrics) => metrics,
        Err(e) => {
            warn!("Failed to read transcript {}: {}", path.display(), e);
            TranscriptMetrics::default()
        }
    }
}

/// Compute metrics from any buffered reader
///
/// # Errors
///
/// Returns the I/O error that interrupted reading. Malformed lines are
/// skipped and never cause an error.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use cstatus_core::MetricsConfig;
/// use cstatus_transcript::compute_from_reader;
/// use std::io::Cursor;
///
/// let data = r#"{"timestamp":"2025-08-01T10:20:00Z","message":{"usage":{"input_tokens":40,"output_tokens":2}}}"#;
/// let now = Utc.with_ymd_and_hms(2025, 8, 1, 10, 30, 0).unwrap();
/// let metrics = compute_from_reader(Cursor::new(data), &MetricsConfig::default(), now).unwrap();
/// assert_eq!(metrics.tokens.total_tokens, 42);
/// assert_eq!(metrics.tokens.context_length, 40);
/// assert!(metrics.block.is_some());
/// ```
pub fn compute_from_reader<R: BufRead>(
    reader: R,
    config: &MetricsConfig,
    now: DateTime<Utc>,
) -> Result<TranscriptMetrics> {
    let mut entries = EntryReader::new(reader);
    let mut usage = UsageReducer::new();
    let mut timestamps = TimestampCollector::new();

    for entry in entries.by_ref() {
        usage.observe(&entry);
        timestamps.observe(&entry);
    }
    if let Some(e) = entries.take_error() {
        return Err(CstatusError::Io(e));
    }

    let stats = entries.stats();
    let (missing, invalid) = (timestamps.missing(), timestamps.invalid());
    debug!(
        "Scanned {} lines: {} blank, {} malformed, {} untimed, {} bad timestamps",
        stats.lines, stats.blank, stats.malformed, missing, invalid
    );

    let session_duration = timestamps.session_duration();
    let sorted = timestamps.into_sorted();
    let block = BlockCalculator::from_config(config).calculate(&sorted, now);

    Ok(TranscriptMetrics {
        tokens: usage.finish(),
        block,
        session_duration,
    })
}
