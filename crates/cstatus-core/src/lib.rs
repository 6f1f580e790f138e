//! Core types, configuration, and errors for cstatus
//!
//! This crate provides the transcript entry model, the derived token and
//! block metrics, the host's stdin input, and the render context shared by
//! the transcript and terminal crates.

pub mod config;
pub mod context;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::MetricsConfig;
pub use context::{GitStatus, RenderContext, StatuslineInput};
pub use error::{CstatusError, Result};
pub use types::{BlockMetrics, MessageUsage, TokenMetrics, TranscriptEntry, TranscriptMetrics};
