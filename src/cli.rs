//! CLI interface for cstatus
//!
//! With no subcommand cstatus renders the statusline, which is how Claude
//! Code invokes it. Every rendering option can also come from the
//! environment so the settings entry can stay a bare command.
//!
//! # Example
//!
//! ```bash
//! # Render with a custom widget order
//! echo '{"model":{"display_name":"Opus"}}' | cstatus --widgets model,context
//!
//! # Register cstatus in ~/.claude/settings.json
//! cstatus install
//! ```

use clap::{Args, Parser, Subcommand};
use cstatus_core::MetricsConfig;
use cstatus_core::error::Result;
use cstatus_terminal::builder::DEFAULT_CONTEXT_WINDOW;
use cstatus_terminal::{DEFAULT_WIDGETS, RenderConfig, WidgetKind, parse_widget_list};
use std::path::PathBuf;
use std::time::Duration;

/// Powerline statusline for Claude Code sessions
#[derive(Parser, Debug, Clone)]
#[command(name = "cstatus")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Comma-separated widgets in display order
    /// (project, git, model, session, context, block, duration, version)
    #[arg(
        long,
        short = 'w',
        env = "CSTATUS_WIDGETS",
        default_value = DEFAULT_WIDGETS,
        global = true
    )]
    pub widgets: String,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Length of a usage block in minutes
    #[arg(
        long,
        env = "CSTATUS_BLOCK_MINUTES",
        default_value_t = 300,
        global = true
    )]
    pub block_minutes: u32,

    /// Size of the model's context window in tokens
    #[arg(
        long,
        env = "CSTATUS_CONTEXT_WINDOW",
        default_value_t = DEFAULT_CONTEXT_WINDOW,
        global = true
    )]
    pub context_window: u64,

    /// Timeout for each git command in milliseconds
    #[arg(long, default_value_t = 2000, global = true)]
    pub git_timeout_ms: u64,

    /// Write debug logs to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Read Claude Code's JSON from stdin and print the statusline (default)
    Render,
    /// Point the statusLine entry of a Claude Code settings file at cstatus
    Install(InstallArgs),
}

/// Arguments for the install command
#[derive(Args, Debug, Clone)]
pub struct InstallArgs {
    /// Settings file to update (default: ~/.claude/settings.json)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Command Claude Code should run (default: this executable)
    #[arg(long)]
    pub command: Option<String>,
}

impl Cli {
    /// The widget list, validated
    pub fn widget_list(&self) -> Result<Vec<WidgetKind>> {
        parse_widget_list(&self.widgets)
    }

    pub fn metrics_config(&self) -> Result<MetricsConfig> {
        MetricsConfig::from_minutes(self.block_minutes)
    }

    /// Rendering options; a non-empty `NO_COLOR` also disables color
    pub fn render_config(&self) -> Result<RenderConfig> {
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
        RenderConfig::new(self.context_window, self.no_color || no_color_env)
    }

    pub fn git_timeout(&self) -> Duration {
        Duration::from_millis(self.git_timeout_ms)
    }
}
