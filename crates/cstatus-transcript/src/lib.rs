//! Transcript metrics for cstatus
//!
//! This crate reads Claude Code session transcripts (JSONL) and derives the
//! token counters, context length, active work block, and session duration
//! shown in the statusline.

pub mod block;
pub mod metrics;
pub mod reader;
pub mod timestamps;
pub mod usage;

pub use block::BlockCalculator;
pub use metrics::{compute_from_reader, compute_metrics, compute_metrics_at};
pub use reader::{EntryReader, ScanStats};
pub use timestamps::{TimestampCollector, extract_timestamps};
pub use usage::{UsageReducer, reduce_usage};
