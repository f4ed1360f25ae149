//! Source text ownership and location tracking.
//!
//! [`SourceDb`] owns every loaded file. Syntax-tree nodes refer back to it
//! through [`Span`]s (a [`FileId`] plus a byte range), which diagnostics turn
//! into [`ResolvedSpan`] line/column coordinates.

#![warn(missing_docs)]

pub mod file_id;
pub mod resolved_span;
pub mod source_db;
pub mod source_file;
pub mod span;

pub use file_id::FileId;
pub use resolved_span::ResolvedSpan;
pub use source_db::SourceDb;
pub use source_file::SourceFile;
pub use span::Span;
