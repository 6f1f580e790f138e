//! Statusline widgets
//!
//! Each widget maps the render context to at most one segment. A widget
//! with nothing to show returns `None` and is left out of the line.

use crate::builder::RenderConfig;
use crate::format::{
    format_context, format_cost, format_duration, format_session_duration, format_tokens,
};
use crate::segment::Segment;
use crate::theme::Theme;
use chrono::{DateTime, Utc};
use cstatus_core::context::RenderContext;
use cstatus_core::error::{CstatusError, Result};
use std::fmt;
use std::str::FromStr;

/// Widget order used when none is configured
pub const DEFAULT_WIDGETS: &str = "project,git,model,session,context,block";

/// A statusline widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Project directory name
    Project,
    /// Current branch and dirty marker
    Git,
    /// Model display name
    Model,
    /// Session cost and total tokens
    Session,
    /// Context window usage
    Context,
    /// Time since the current work block started
    Block,
    /// Time between the first and last transcript entries
    Duration,
    /// Claude Code version
    Version,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 8] = [
        WidgetKind::Project,
        WidgetKind::Git,
        WidgetKind::Model,
        WidgetKind::Session,
        WidgetKind::Context,
        WidgetKind::Block,
        WidgetKind::Duration,
        WidgetKind::Version,
    ];

    /// The widgets named by [`DEFAULT_WIDGETS`]
    pub fn defaults() -> Vec<WidgetKind> {
        vec![
            WidgetKind::Project,
            WidgetKind::Git,
            WidgetKind::Model,
            WidgetKind::Session,
            WidgetKind::Context,
            WidgetKind::Block,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Project => "project",
            WidgetKind::Git => "git",
            WidgetKind::Model => "model",
            WidgetKind::Session => "session",
            WidgetKind::Context => "context",
            WidgetKind::Block => "block",
            WidgetKind::Duration => "duration",
            WidgetKind::Version => "version",
        }
    }

    /// Render this widget, or `None` when it has nothing to show
    pub fn render(
        &self,
        ctx: &RenderContext,
        config: &RenderConfig,
        theme: &Theme,
        now: DateTime<Utc>,
    ) -> Option<Segment> {
        match self {
            WidgetKind::Project => {
                if ctx.project_name.is_empty() {
                    return None;
                }
                Some(Segment::new("", ctx.project_name.clone(), theme.project))
            }
            WidgetKind::Git => {
                let git = ctx.git.as_ref()?;
                if git.branch.is_empty() {
                    return None;
                }
                if git.has_changes {
                    Some(Segment::new("⎇", format!("{} ●", git.branch), theme.git_dirty))
                } else {
                    Some(Segment::new("⎇", git.branch.clone(), theme.git_clean))
                }
            }
            WidgetKind::Model => Some(Segment::new(
                "⚡",
                ctx.input.model.display_name.clone(),
                theme.model,
            )),
            WidgetKind::Session => {
                let text = format!(
                    "{} ({})",
                    format_cost(ctx.input.cost.total_cost_usd),
                    format_tokens(ctx.metrics.tokens.total_tokens)
                );
                Some(Segment::new("§", text, theme.session))
            }
            WidgetKind::Context => Some(Segment::new(
                "🧠",
                format_context(ctx.metrics.tokens.context_length, config.context_window),
                theme.context,
            )),
            WidgetKind::Block => {
                let block = ctx.metrics.block.as_ref()?;
                let elapsed = format_duration(block.elapsed_at(now));
                Some(Segment::new("⏱️", elapsed, theme.block))
            }
            WidgetKind::Duration => {
                let duration = ctx.metrics.session_duration?;
                Some(Segment::new("🕐", format_session_duration(duration), theme.duration))
            }
            WidgetKind::Version => {
                if !ctx.input.has_version() {
                    return None;
                }
                Some(Segment::new("🔧", format!("v{}", ctx.input.version), theme.version))
            }
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WidgetKind {
    type Err = CstatusError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        WidgetKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| CstatusError::UnknownWidget(s.trim().to_string()))
    }
}

/// Parse a comma-separated widget list, ignoring empty items
///
/// # Examples
/// ```
/// use cstatus_terminal::widgets::{WidgetKind, parse_widget_list};
///
/// let widgets = parse_widget_list("model, context,,block").unwrap();
/// assert_eq!(widgets, vec![WidgetKind::Model, WidgetKind::Context, WidgetKind::Block]);
/// assert!(parse_widget_list("model,weather").is_err());
/// ```
pub fn parse_widget_list(list: &str) -> Result<Vec<WidgetKind>> {
    list.split(',')
        .filter(|item| !item.trim().is_empty())
        .map(WidgetKind::from_str)
        .collect()
}
