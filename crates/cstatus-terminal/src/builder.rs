//! Statusline assembly
//!
//! Widgets render in the configured order. Empty results are dropped before
//! joining so that each separator blends into the segment that is actually
//! drawn next.

use crate::segment::Segment;
use crate::theme::Theme;
use crate::widgets::WidgetKind;
use chrono::{DateTime, Utc};
use cstatus_core::context::RenderContext;
use cstatus_core::error::{CstatusError, Result};
use tracing::trace;

/// Default context window size in tokens
pub const DEFAULT_CONTEXT_WINDOW: u64 = 200_000;

/// Rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Tokens in the model's context window
    pub context_window: u64,
    /// Emit plain text without ANSI escapes
    pub no_color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            context_window: DEFAULT_CONTEXT_WINDOW,
            no_color: false,
        }
    }
}

impl RenderConfig {
    /// # Errors
    ///
    /// Returns an error if `context_window` is zero
    pub fn new(context_window: u64, no_color: bool) -> Result<Self> {
        if context_window == 0 {
            return Err(CstatusError::InvalidArgument(
                "context window must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            context_window,
            no_color,
        })
    }
}

/// Builds one statusline from a render context
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use cstatus_core::{RenderContext, StatuslineInput, TranscriptMetrics};
/// use cstatus_terminal::{RenderConfig, StatuslineBuilder, WidgetKind};
///
/// let input = StatuslineInput::from_json(r#"{"model":{"display_name":"Opus"}}"#).unwrap();
/// let ctx = RenderContext::new(input, TranscriptMetrics::default(), None);
/// let line = StatuslineBuilder::new(RenderConfig::new(200_000, true).unwrap())
///     .with_widgets(vec![WidgetKind::Model, WidgetKind::Context])
///     .build(&ctx, Utc::now());
/// assert_eq!(line, "⚡ Opus \u{e0b0}🧠 0 ctx \u{e0b0}");
/// ```
#[derive(Debug, Clone)]
pub struct StatuslineBuilder {
    widgets: Vec<WidgetKind>,
    config: RenderConfig,
    theme: Theme,
}

impl StatuslineBuilder {
    /// A builder with the default widgets and theme
    pub fn new(config: RenderConfig) -> Self {
        Self {
            widgets: WidgetKind::defaults(),
            config,
            theme: Theme::default(),
        }
    }

    pub fn with_widgets(mut self, widgets: Vec<WidgetKind>) -> Self {
        self.widgets = widgets;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn widgets(&self) -> &[WidgetKind] {
        &self.widgets
    }

    /// Render every widget and join the visible segments
    pub fn build(&self, ctx: &RenderContext, now: DateTime<Utc>) -> String {
        let segments: Vec<Segment> = self
            .widgets
            .iter()
            .filter_map(|kind| {
                let segment = kind.render(ctx, &self.config, &self.theme, now);
                if segment.is_none() {
                    trace!("Widget {} has nothing to show", kind);
                }
                segment
            })
            .filter(|segment| !segment.is_empty())
            .collect();

        render_segments(&segments, self.config.no_color)
    }
}

/// Join segments powerline style
pub fn render_segments(segments: &[Segment], no_color: bool) -> String {
    let mut line = String::new();
    for (i, segment) in segments.iter().enumerate() {
        line.push_str(&segment.body(no_color));
        line.push_str(&segment.separator(segments.get(i + 1), no_color));
    }
    line
}
