//! Loading and validation of `unihdl.toml` project configuration.
//!
//! [`load_config`] reads `<dir>/unihdl.toml`; [`load_config_from_str`] parses
//! text directly. Both validate the result before returning it.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::{ConvertConfig, NoticeLevel, ProjectConfig, ProjectMeta};
