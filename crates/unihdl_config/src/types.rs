//! Types deserialized from `unihdl.toml`.
//!
//! ```toml
//! [project]
//! name = "soc"
//! sources = ["rtl/top.sv", "rtl/periph.sv"]
//!
//! [convert]
//! notice_severity = "note"
//! ```

use serde::Deserialize;
use unihdl_diagnostics::Severity;

/// Whole configuration file.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Project metadata and source list.
    pub project: ProjectMeta,
    /// Translation settings.
    #[serde(default)]
    pub convert: ConvertConfig,
}

/// The `[project]` table.
#[derive(Debug, Deserialize)]
pub struct ProjectMeta {
    /// Project name.
    pub name: String,
    /// SystemVerilog sources, relative to the directory holding the file.
    #[serde(default)]
    pub sources: Vec<String>,
}

/// The `[convert]` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConvertConfig {
    /// Severity of "construct not implemented" notices.
    #[serde(default)]
    pub notice_severity: NoticeLevel,
}

/// Severity used when the translator skips a construct it does not model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Report as a warning.
    #[default]
    Warning,
    /// Report as a note.
    Note,
}

impl NoticeLevel {
    /// The diagnostic severity this level maps to.
    pub fn severity(self) -> Severity {
        match self {
            NoticeLevel::Warning => Severity::Warning,
            NoticeLevel::Note => Severity::Note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_level_maps_to_severity() {
        assert_eq!(NoticeLevel::default().severity(), Severity::Warning);
        assert_eq!(NoticeLevel::Note.severity(), Severity::Note);
    }

    #[test]
    fn convert_table_is_optional() {
        let config: ProjectConfig = toml::from_str("[project]\nname = \"x\"\n").unwrap();
        assert_eq!(config.convert.notice_severity, NoticeLevel::Warning);
        assert!(config.project.sources.is_empty());
    }
}
