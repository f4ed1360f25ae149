//! Reading `unihdl.toml` from disk or from a string.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::collections::HashSet;
use std::path::Path;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "unihdl.toml";

/// Loads and validates `<project_dir>/unihdl.toml`.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(project_dir.join(CONFIG_FILE_NAME))?;
    load_config_from_str(&content)
}

/// Parses and validates configuration text.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.project.name.trim().is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }
    let mut seen = HashSet::new();
    for source in &config.project.sources {
        if source.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "empty path in project.sources".to_string(),
            ));
        }
        if !seen.insert(source.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate source `{source}`"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NoticeLevel;

    #[test]
    fn parse_full_config() {
        let config = load_config_from_str(
            r#"
[project]
name = "soc"
sources = ["rtl/top.sv", "rtl/uart.sv"]

[convert]
notice_severity = "note"
"#,
        )
        .unwrap();
        assert_eq!(config.project.name, "soc");
        assert_eq!(config.project.sources, vec!["rtl/top.sv", "rtl/uart.sv"]);
        assert_eq!(config.convert.notice_severity, NoticeLevel::Note);
    }

    #[test]
    fn missing_project_table_is_a_parse_error() {
        let err = load_config_from_str("[convert]\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn unknown_notice_level_is_a_parse_error() {
        let err = load_config_from_str(
            "[project]\nname = \"x\"\n[convert]\nnotice_severity = \"loud\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn empty_name_rejected() {
        let err = load_config_from_str("[project]\nname = \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(ref f) if f == "project.name"));
    }

    #[test]
    fn duplicate_sources_rejected() {
        let err = load_config_from_str(
            "[project]\nname = \"x\"\nsources = [\"a.sv\", \"a.sv\"]\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[project]\nname = \"blinky\"\nsources = [\"top.sv\"]\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.project.name, "blinky");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_config(dir.path()).unwrap_err(),
            ConfigError::IoError(_)
        ));
    }
}
