//! Secondary source annotations attached to a diagnostic.

use serde::{Deserialize, Serialize};
use unihdl_source::Span;

/// Whether a label marks the main location or supporting context.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LabelStyle {
    /// Rendered with `^^^` under the primary span.
    Primary,
    /// Additional context.
    Secondary,
}

/// A message tied to a source span.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Label {
    /// Annotated range.
    pub span: Span,
    /// Text shown next to the underline.
    pub message: String,
    /// Primary or secondary.
    pub style: LabelStyle,
}

impl Label {
    /// Creates a primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style: LabelStyle::Primary,
        }
    }

    /// Creates a secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style: LabelStyle::Secondary,
        }
    }
}
