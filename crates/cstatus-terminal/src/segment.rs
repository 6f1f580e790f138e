//! Powerline segments

use crate::theme::SegmentStyle;
use colored::Colorize;

/// Right-pointing powerline arrow (Nerd Font private use area)
pub const SEPARATOR: &str = "\u{e0b0}";

/// One colored block of the statusline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub icon: String,
    pub text: String,
    pub style: SegmentStyle,
}

impl Segment {
    pub fn new(icon: impl Into<String>, text: impl Into<String>, style: SegmentStyle) -> Self {
        Self {
            icon: icon.into(),
            text: text.into(),
            style,
        }
    }

    /// A segment with neither icon nor text is not rendered
    pub fn is_empty(&self) -> bool {
        self.icon.is_empty() && self.text.is_empty()
    }

    /// The segment body: `"{icon} {text} "`
    pub fn body(&self, no_color: bool) -> String {
        let body = format!("{} {} ", self.icon, self.text);
        if no_color {
            return body;
        }
        let SegmentStyle { fg, bg } = self.style;
        body.color(fg).on_color(bg).to_string()
    }

    /// The arrow drawn after this segment
    ///
    /// The arrow takes this segment's background as its foreground so it
    /// reads as a continuation of the segment, over the next segment's
    /// background.
    pub fn separator(&self, next: Option<&Segment>, no_color: bool) -> String {
        if no_color {
            return SEPARATOR.to_string();
        }
        let arrow = SEPARATOR.color(self.style.bg);
        match next {
            Some(next) => arrow.on_color(next.style.bg).to_string(),
            None => arrow.to_string(),
        }
    }
}
