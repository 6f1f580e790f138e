//! Statusline module for Claude Code integration
//!
//! Claude Code runs the statusline command on every refresh and pipes a
//! JSON description of the session to stdin. This module reads that input,
//! derives transcript metrics and git state, and prints one rendered line.

use crate::cli::Cli;
use crate::git;
use chrono::{DateTime, Utc};
use cstatus_core::MetricsConfig;
use cstatus_core::context::{RenderContext, StatuslineInput};
use cstatus_core::error::{CstatusError, Result};
use cstatus_core::types::TranscriptMetrics;
use cstatus_terminal::{StatuslineBuilder, WidgetKind};
use cstatus_transcript::compute_metrics_at;
use std::io::Write;
use std::time::Duration;
use tokio::io::{self, AsyncReadExt};
use tokio::time::timeout;
use tracing::{debug, warn};

const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Read and decode the host's JSON from stdin
pub async fn read_input() -> Result<StatuslineInput> {
    if is_terminal::is_terminal(std::io::stdin()) {
        return Err(CstatusError::InvalidArgument(
            "cstatus expects JSON input from stdin.\n\
             It is designed to be called by Claude Code, not run interactively.\n\
             \n\
             Example usage:\n\
             echo '{\"model\": {\"display_name\": \"Opus\"}}' | cstatus"
                .to_string(),
        ));
    }

    let mut buffer = String::new();
    timeout(READ_TIMEOUT, io::stdin().read_to_string(&mut buffer))
        .await
        .map_err(|_| {
            CstatusError::InvalidArgument(
                "Timeout waiting for input. cstatus expects JSON input from stdin.".to_string(),
            )
        })??;

    StatuslineInput::from_json(&buffer)
}

/// Turns host input into a rendered statusline
#[derive(Debug, Clone)]
pub struct StatuslineHandler {
    builder: StatuslineBuilder,
    metrics_config: MetricsConfig,
    git_timeout: Duration,
}

impl StatuslineHandler {
    pub fn new(
        builder: StatuslineBuilder,
        metrics_config: MetricsConfig,
        git_timeout: Duration,
    ) -> Self {
        Self {
            builder,
            metrics_config,
            git_timeout,
        }
    }

    /// Build a handler from validated command-line options
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let widgets = cli.widget_list()?;
        let builder = StatuslineBuilder::new(cli.render_config()?).with_widgets(widgets);
        Ok(Self::new(builder, cli.metrics_config()?, cli.git_timeout()))
    }

    /// Gather transcript metrics and git state for one render
    ///
    /// The transcript scan runs on the blocking pool while git runs
    /// concurrently. Git is skipped when the git widget is not shown.
    pub async fn context_at(&self, input: StatuslineInput, now: DateTime<Utc>) -> RenderContext {
        let transcript_path = input.transcript_path.clone();
        let metrics_config = self.metrics_config;
        let metrics_task = tokio::task::spawn_blocking(move || {
            compute_metrics_at(transcript_path, &metrics_config, now)
        });

        let working_dir = input.working_dir().to_string();
        let wants_git = self.builder.widgets().contains(&WidgetKind::Git);
        let git_task = async {
            if wants_git {
                git::status(&working_dir, self.git_timeout).await
            } else {
                None
            }
        };
        let (metrics, git) = tokio::join!(metrics_task, git_task);

        let metrics = metrics.unwrap_or_else(|e| {
            warn!("Transcript metrics task failed: {}", e);
            TranscriptMetrics::default()
        });
        debug!(
            "Transcript metrics: {} total tokens, context {}, block {}",
            metrics.tokens.total_tokens,
            metrics.tokens.context_length,
            if metrics.block.is_some() { "active" } else { "none" }
        );

        RenderContext::new(input, metrics, git)
    }

    /// Render the statusline as of `now`
    pub async fn generate_at(&self, input: StatuslineInput, now: DateTime<Utc>) -> String {
        let ctx = self.context_at(input, now).await;
        self.builder.build(&ctx, now)
    }

    /// Render the statusline as of the current time
    pub async fn generate(&self, input: StatuslineInput) -> String {
        self.generate_at(input, Utc::now()).await
    }
}

/// Run the statusline handler
pub async fn run(cli: &Cli) -> Result<()> {
    // Validate options before waiting on stdin
    let handler = StatuslineHandler::from_cli(cli)?;

    // stdout is a pipe to Claude Code, so color detection would turn colors off
    colored::control::set_override(!cli.render_config()?.no_color);

    let input = read_input().await?;
    let line = handler.generate(input).await;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(line.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
