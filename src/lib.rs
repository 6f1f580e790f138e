//! cstatus - Powerline statusline for Claude Code sessions
//!
//! Claude Code pipes a JSON description of the session to the statusline
//! command. cstatus reads the session transcript it points at, derives token
//! usage, context length, and the active 5-hour usage block, and prints a
//! single colored line.
//!
//! The work is split across the workspace:
//! - `cstatus-core`: input, metric types, configuration, and errors
//! - `cstatus-transcript`: transcript scanning and block calculation
//! - `cstatus-terminal`: widgets and powerline rendering
//!
//! # Examples
//!
//! ```no_run
//! use cstatus::statusline::StatuslineHandler;
//! use cstatus_core::{MetricsConfig, StatuslineInput};
//! use cstatus_terminal::{RenderConfig, StatuslineBuilder};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> cstatus::Result<()> {
//!     let input = StatuslineInput::from_json(r#"{"transcript_path":"/tmp/session.jsonl"}"#)?;
//!     let builder = StatuslineBuilder::new(RenderConfig::default());
//!     let handler = StatuslineHandler::new(builder, MetricsConfig::default(), Duration::from_secs(2));
//!     println!("{}", handler.generate(input).await);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod git;
pub mod install;
pub mod statusline;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use cstatus_core::{CstatusError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
