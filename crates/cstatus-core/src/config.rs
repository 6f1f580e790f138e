//! Configuration for transcript metrics
//!
//! The block duration is a plain value handed to the calculator, never a
//! global.

use crate::error::{CstatusError, Result};
use chrono::Duration;

/// Default length of a usage block in milliseconds (5 hours)
pub const DEFAULT_BLOCK_DURATION_MS: i64 = 5 * 60 * 60 * 1000;

/// Settings for the transcript metrics facade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Inactivity gap that ends a streak, and the length of one block
    pub block_duration: Duration,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            block_duration: Duration::milliseconds(DEFAULT_BLOCK_DURATION_MS),
        }
    }
}

impl MetricsConfig {
    /// Create a configuration with a custom block duration
    ///
    /// # Errors
    ///
    /// Returns an error if the duration is zero or negative
    pub fn with_block_duration(block_duration: Duration) -> Result<Self> {
        if block_duration <= Duration::zero() {
            return Err(CstatusError::InvalidArgument(format!(
                "block duration must be positive, got {}s",
                block_duration.num_seconds()
            )));
        }
        Ok(Self { block_duration })
    }

    /// Build from a minute count as given on the command line
    pub fn from_minutes(minutes: u32) -> Result<Self> {
        Self::with_block_duration(Duration::minutes(i64::from(minutes)))
    }
}
