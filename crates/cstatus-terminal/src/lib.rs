//! Terminal rendering for cstatus
//!
//! This crate turns a [`RenderContext`](cstatus_core::RenderContext) into a
//! single powerline-style statusline: widgets produce colored segments and
//! the builder joins them with arrow separators.

pub mod builder;
pub mod format;
pub mod segment;
pub mod theme;
pub mod widgets;

pub use builder::{RenderConfig, StatuslineBuilder};
pub use segment::Segment;
pub use theme::{SegmentStyle, Theme};
pub use widgets::{DEFAULT_WIDGETS, WidgetKind, parse_widget_list};
