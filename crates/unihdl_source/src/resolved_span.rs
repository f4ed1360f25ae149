//! Line/column form of a [`Span`](crate::Span) for display.

use std::fmt;
use std::path::PathBuf;

/// A span resolved to 1-indexed line and column coordinates.
///
/// Produced by [`SourceDb::resolve_span`](crate::SourceDb::resolve_span);
/// displays as `path:line:col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpan {
    /// Path of the file.
    pub file_path: PathBuf,
    /// First line (1-indexed).
    pub start_line: u32,
    /// First column (1-indexed).
    pub start_col: u32,
    /// Last line (1-indexed).
    pub end_line: u32,
    /// Last column (1-indexed).
    pub end_col: u32,
}

impl fmt::Display for ResolvedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.file_path.display(),
            self.start_line,
            self.start_col
        )
    }
}
