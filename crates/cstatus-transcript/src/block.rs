//! Work-block calculation
//!
//! Usage limits reset on fixed-length blocks. A block opens on the hour
//! containing the first message of a continuous streak of activity and then
//! repeats back to back for as long as the streak lasts. A streak ends at
//! any gap of at least one block duration between consecutive timestamps.
//!
//! All arithmetic is done in whole milliseconds.

use chrono::{DateTime, Duration, FixedOffset, Timelike, Utc};
use cstatus_core::config::MetricsConfig;
use cstatus_core::types::BlockMetrics;
use tracing::debug;

/// Computes the active block from sorted timestamps
#[derive(Debug, Clone, Copy)]
pub struct BlockCalculator {
    block_duration: Duration,
}

impl Default for BlockCalculator {
    fn default() -> Self {
        Self::from_config(&MetricsConfig::default())
    }
}

impl BlockCalculator {
    pub fn new(block_duration: Duration) -> Self {
        Self { block_duration }
    }

    pub fn from_config(config: &MetricsConfig) -> Self {
        Self::new(config.block_duration)
    }

    /// Find the block containing `now`
    ///
    /// `sorted` must be in ascending order. Returns `None` when there are no
    /// timestamps, when the most recent one is more than one block duration
    /// before `now`, or when the block duration is not positive.
    ///
    /// # Examples
    /// ```
    /// use chrono::{DateTime, TimeZone, Utc};
    /// use cstatus_transcript::block::BlockCalculator;
    ///
    /// let sorted = vec![
    ///     DateTime::parse_from_rfc3339("2025-08-01T09:40:00Z").unwrap(),
    ///     DateTime::parse_from_rfc3339("2025-08-01T10:20:00Z").unwrap(),
    /// ];
    /// let now = Utc.with_ymd_and_hms(2025, 8, 1, 11, 0, 0).unwrap();
    /// let block = BlockCalculator::default().calculate(&sorted, now).unwrap();
    /// assert_eq!(block.start_time.to_rfc3339(), "2025-08-01T09:00:00+00:00");
    /// assert_eq!(block.last_activity, sorted[1]);
    /// ```
    pub fn calculate(
        &self,
        sorted: &[DateTime<FixedOffset>],
        now: DateTime<Utc>,
    ) -> Option<BlockMetrics> {
        let block_ms = self.block_duration.num_milliseconds();
        if block_ms <= 0 {
            return None;
        }
        let most_recent = *sorted.last()?;

        let idle_ms = now.signed_duration_since(most_recent).num_milliseconds();
        if idle_ms > block_ms {
            debug!(
                "No active block: last activity {} is {}ms before now",
                most_recent, idle_ms
            );
            return None;
        }

        let streak_start = find_continuous_start(sorted, self.block_duration)?;
        let floored = floor_to_hour(streak_start);
        let start_time = advance_to_current_block(floored, now, self.block_duration);

        Some(BlockMetrics {
            start_time,
            last_activity: most_recent,
        })
    }
}

/// Earliest timestamp of the streak that ends with the most recent one
///
/// Walks backwards from the end and stops at the first gap of at least
/// `block_duration`.
pub fn find_continuous_start(
    sorted: &[DateTime<FixedOffset>],
    block_duration: Duration,
) -> Option<DateTime<FixedOffset>> {
    let block_ms = block_duration.num_milliseconds();
    let mut start = *sorted.last()?;

    for pair in sorted.windows(2).rev() {
        let gap_ms = pair[1].signed_duration_since(pair[0]).num_milliseconds();
        if gap_ms >= block_ms {
            break;
        }
        start = pair[0];
    }

    Some(start)
}

/// Truncate to the start of the hour in the timestamp's own offset
pub fn floor_to_hour(ts: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    ts.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

/// Skip whole blocks that have already ended before `now`
///
/// A streak can outlast a single block. The start moves forward by the
/// number of complete blocks between `start` and `now`; a start exactly one
/// block before `now` is left unchanged.
pub fn advance_to_current_block(
    start: DateTime<FixedOffset>,
    now: DateTime<Utc>,
    block_duration: Duration,
) -> DateTime<FixedOffset> {
    let block_ms = block_duration.num_milliseconds();
    if block_ms <= 0 {
        return start;
    }

    let elapsed_ms = now.signed_duration_since(start).num_milliseconds();
    if elapsed_ms <= block_ms {
        return start;
    }

    let completed = elapsed_ms / block_ms;
    start
        .checked_add_signed(Duration::milliseconds(completed.saturating_mul(block_ms)))
        .unwrap_or(start)
}
