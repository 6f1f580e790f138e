//! Segment colors
//!
//! Every widget has a fixed foreground/background pair. The git widget has
//! two: one for a clean tree and one for uncommitted changes.

use colored::Color;

/// Foreground and background of one segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentStyle {
    pub fg: Color,
    pub bg: Color,
}

impl SegmentStyle {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }
}

const fn rgb(hex: u32) -> Color {
    Color::TrueColor {
        r: ((hex >> 16) & 0xff) as u8,
        g: ((hex >> 8) & 0xff) as u8,
        b: (hex & 0xff) as u8,
    }
}

/// Color configuration for all widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub project: SegmentStyle,
    pub git_clean: SegmentStyle,
    pub git_dirty: SegmentStyle,
    pub model: SegmentStyle,
    pub session: SegmentStyle,
    pub context: SegmentStyle,
    pub block: SegmentStyle,
    pub duration: SegmentStyle,
    pub version: SegmentStyle,
}

impl Theme {
    /// The dark palette
    pub const fn dark() -> Self {
        Self {
            project: SegmentStyle::new(rgb(0xffffff), rgb(0x8b4513)),
            git_clean: SegmentStyle::new(rgb(0xffffff), rgb(0x404040)),
            git_dirty: SegmentStyle::new(rgb(0xffffff), rgb(0xff6b6b)),
            model: SegmentStyle::new(rgb(0xffffff), rgb(0x2d2d2d)),
            session: SegmentStyle::new(rgb(0x00ffff), rgb(0x202020)),
            context: SegmentStyle::new(rgb(0xff00ff), rgb(0x202020)),
            block: SegmentStyle::new(rgb(0xffff00), rgb(0x333333)),
            duration: SegmentStyle::new(rgb(0xcbd5e0), rgb(0x4a5568)),
            version: SegmentStyle::new(rgb(0xffffff), rgb(0x666666)),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb() {
        assert_eq!(
            rgb(0x8b4513),
            Color::TrueColor {
                r: 0x8b,
                g: 0x45,
                b: 0x13
            }
        );
        assert_eq!(rgb(0x000000), Color::TrueColor { r: 0, g: 0, b: 0 });
    }

    #[test]
    fn test_git_states_differ() {
        let theme = Theme::default();
        assert_ne!(theme.git_clean.bg, theme.git_dirty.bg);
        assert_eq!(theme.git_clean.fg, theme.git_dirty.fg);
    }
}
