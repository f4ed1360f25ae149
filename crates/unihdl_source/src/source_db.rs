//! Owner of every source file in a translation session.

use crate::file_id::FileId;
use crate::resolved_span::ResolvedSpan;
use crate::source_file::SourceFile;
use crate::span::Span;
use std::io;
use std::path::{Path, PathBuf};

/// All source text of a session, indexed by [`FileId`].
///
/// The database is filled before parsing starts and only read afterwards, so
/// translators share it by reference (it is `Sync`).
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Reads `path` from disk and registers it.
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.add_source(path, content))
    }

    /// Registers in-memory text under `name`.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(id, name.into(), content));
        id
    }

    /// Returns the file behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this database.
    pub fn get_file(&self, id: FileId) -> &SourceFile {
        &self.files[id.as_raw() as usize]
    }

    /// Returns the ids of all registered files in load order.
    pub fn file_ids(&self) -> impl Iterator<Item = FileId> + '_ {
        self.files.iter().map(|f| f.id)
    }

    /// Resolves a span to line/column coordinates.
    pub fn resolve_span(&self, span: Span) -> ResolvedSpan {
        let file = self.get_file(span.file);
        let (start_line, start_col) = file.line_col(span.start);
        let (end_line, end_col) = file.line_col(span.end.saturating_sub(1).max(span.start));
        ResolvedSpan {
            file_path: file.path.clone(),
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Returns the source text covered by `span`.
    pub fn snippet(&self, span: Span) -> &str {
        self.get_file(span.file).snippet(span.start, span.end)
    }
}

impl Default for SourceDb {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_read_back() {
        let mut db = SourceDb::new();
        let id = db.add_source("a.sv", "foo u1();".to_string());
        assert_eq!(db.get_file(id).content, "foo u1();");
        assert_eq!(db.file_ids().collect::<Vec<_>>(), vec![id]);
    }

    #[test]
    fn resolve_span_to_line_col() {
        let mut db = SourceDb::new();
        let id = db.add_source("a.sv", "module m;\n  foo u1();\nendmodule".to_string());
        let resolved = db.resolve_span(Span::new(id, 12, 15));
        assert_eq!(resolved.file_path, PathBuf::from("a.sv"));
        assert_eq!((resolved.start_line, resolved.start_col), (2, 3));
        assert_eq!((resolved.end_line, resolved.end_col), (2, 5));
    }

    #[test]
    fn snippet_by_span() {
        let mut db = SourceDb::new();
        let id = db.add_source("a.sv", "foo #(8) u1();".to_string());
        assert_eq!(db.snippet(Span::new(id, 6, 7)), "8");
    }

    #[test]
    fn files_get_distinct_ids() {
        let mut db = SourceDb::new();
        let a = db.add_source("a.sv", String::new());
        let b = db.add_source("b.sv", String::new());
        assert_ne!(a, b);
    }

    #[test]
    fn load_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("top.sv");
        std::fs::write(&path, "foo u1();").unwrap();

        let mut db = SourceDb::new();
        let id = db.load_file(&path).unwrap();
        assert_eq!(db.get_file(id).content, "foo u1();");
        assert_eq!(db.get_file(id).path, path);
    }
}
