//! Handles for files registered in a [`SourceDb`](crate::SourceDb).

use serde::{Deserialize, Serialize};

/// Index of a file inside the [`SourceDb`](crate::SourceDb) that loaded it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    /// Placeholder for spans that do not come from any file.
    pub const DUMMY: FileId = FileId(u32::MAX);

    /// Wraps a raw file index.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw file index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_value_is_preserved() {
        assert_eq!(FileId::from_raw(3).as_raw(), 3);
    }

    #[test]
    fn dummy_is_not_a_real_index() {
        assert_ne!(FileId::DUMMY, FileId::from_raw(0));
    }
}
