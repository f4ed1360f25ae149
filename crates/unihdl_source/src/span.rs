//! Byte ranges inside a source file.

use crate::file_id::FileId;
use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` inside one source file.
///
/// Every concrete-syntax node carries one, and so does every translated
/// instance, so faults and notices can point back at the statement that
/// produced them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// File the range belongs to.
    pub file: FileId,
    /// First byte (inclusive).
    pub start: u32,
    /// One past the last byte (exclusive).
    pub end: u32,
}

impl Span {
    /// Span for synthesized nodes with no source location.
    pub const DUMMY: Span = Span {
        file: FileId::DUMMY,
        start: 0,
        end: 0,
    };

    /// Creates a span over `start..end` in `file`.
    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        Self { file, start, end }
    }

    /// Returns the smallest span covering both `self` and `other`.
    ///
    /// # Panics
    ///
    /// Panics if the spans belong to different files.
    pub fn merge(self, other: Span) -> Span {
        assert_eq!(
            self.file, other.file,
            "cannot merge spans from different files"
        );
        Span {
            file: self.file,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns `true` for a zero-length span.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if this span does not point into a real file.
    pub fn is_dummy(&self) -> bool {
        self.file == FileId::DUMMY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> FileId {
        FileId::from_raw(0)
    }

    #[test]
    fn merge_covers_both_ranges() {
        let merged = Span::new(file(), 4, 9).merge(Span::new(file(), 7, 15));
        assert_eq!((merged.start, merged.end), (4, 15));
    }

    #[test]
    fn merge_is_symmetric() {
        let a = Span::new(file(), 0, 3);
        let b = Span::new(file(), 10, 12);
        assert_eq!(a.merge(b), b.merge(a));
    }

    #[test]
    #[should_panic(expected = "different files")]
    fn merge_across_files_panics() {
        let _ = Span::new(file(), 0, 1).merge(Span::new(FileId::from_raw(1), 0, 1));
    }

    #[test]
    fn length_and_emptiness() {
        assert_eq!(Span::new(file(), 2, 8).len(), 6);
        assert!(Span::new(file(), 5, 5).is_empty());
        assert!(Span::DUMMY.is_dummy());
        assert!(!Span::new(file(), 0, 0).is_dummy());
    }

    #[test]
    fn serde_roundtrip() {
        let span = Span::new(FileId::from_raw(2), 11, 19);
        let json = serde_json::to_string(&span).unwrap();
        let back: Span = serde_json::from_str(&json).unwrap();
        assert_eq!(span, back);
    }
}
