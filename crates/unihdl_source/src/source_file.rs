//! A single loaded file with a line index for column lookup.

use crate::file_id::FileId;
use std::path::PathBuf;

/// One source file owned by the [`SourceDb`](crate::SourceDb).
pub struct SourceFile {
    /// Handle of this file.
    pub id: FileId,
    /// Path on disk, or the synthetic name given to an in-memory source.
    pub path: PathBuf,
    /// Full text.
    pub content: String,
    /// Byte offset of every line start; always begins with `0`.
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Wraps `content` and indexes its line starts.
    pub fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                content
                    .bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'\n')
                    .map(|(i, _)| (i + 1) as u32),
            )
            .collect();
        Self {
            id,
            path,
            content,
            line_starts,
        }
    }

    /// Converts a byte offset to 1-indexed `(line, column)`.
    pub fn line_col(&self, byte_offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let col = byte_offset - self.line_starts[line_idx] + 1;
        (line_idx as u32 + 1, col)
    }

    /// Returns the text between two byte offsets.
    pub fn snippet(&self, start: u32, end: u32) -> &str {
        &self.content[start as usize..end as usize]
    }

    /// Returns the full line containing `byte_offset`, without its newline.
    pub fn line_text(&self, byte_offset: u32) -> &str {
        let (line, _) = self.line_col(byte_offset);
        let start = self.line_starts[line as usize - 1] as usize;
        let end = self
            .line_starts
            .get(line as usize)
            .map_or(self.content.len(), |&next| next as usize - 1);
        self.content[start..end].trim_end_matches('\r')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_file(content: &str) -> SourceFile {
        SourceFile::new(FileId::from_raw(0), PathBuf::from("top.sv"), content.to_string())
    }

    #[test]
    fn indexes_line_starts() {
        let f = make_file("foo u1();\nbar u2();\n");
        assert_eq!(f.line_starts, vec![0, 10, 20]);
    }

    #[test]
    fn resolves_line_and_column() {
        let f = make_file("foo u1();\nbar u2();");
        assert_eq!(f.line_col(0), (1, 1));
        assert_eq!(f.line_col(4), (1, 5));
        assert_eq!(f.line_col(10), (2, 1));
        assert_eq!(f.line_col(14), (2, 5));
    }

    #[test]
    fn extracts_snippets_and_lines() {
        let f = make_file("foo u1();\nbar u2();");
        assert_eq!(f.snippet(4, 6), "u1");
        assert_eq!(f.line_text(12), "bar u2();");
        assert_eq!(f.line_text(3), "foo u1();");
    }

    #[test]
    fn empty_file_has_one_line() {
        let f = make_file("");
        assert_eq!(f.line_col(0), (1, 1));
        assert_eq!(f.line_text(0), "");
    }
}
