//! Configuration for the lexer and the report writer.
//!
//! Read from `simplex.toml` in the current directory, or from an explicit path.
//! Every table and field is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "simplex.toml";

/// Default report file name, written to the current directory.
pub const DEFAULT_REPORT_FILE: &str = "SymbolTable.txt";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub lexer: LexerConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Capacity limits for one scan. `None` means unbounded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LexerConfig {
    #[serde(default)]
    pub max_tokens: Option<usize>,

    #[serde(default)]
    pub max_errors: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Where the report is written.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Include the token-kind frequency summary.
    #[serde(default = "default_true")]
    pub summary: bool,
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_FILE)
}

fn default_true() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            summary: true,
        }
    }
}

impl Config {
    /// Loads `simplex.toml` from the current directory, or the defaults when absent.
    pub fn load() -> Result<Self, Error> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            debug!("no {} found, using defaults", CONFIG_FILE_NAME);
            Ok(Self::default())
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            invalid_config(format!("cannot read {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), "loading configuration");
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        toml::from_str(content).map_err(|e| invalid_config(e.to_string()))
    }
}

fn invalid_config(reason: String) -> Error {
    Error::new(ErrorImpl::InvalidConfig { reason }, Position::null())
}
