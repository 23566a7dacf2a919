//! Board configuration.
//!
//! # Responsibility
//! - Name the templates and mount points the board binds to.
//! - Carry logging settings for the bootstrap.
//!
//! # Invariants
//! - Every field has a default, so an empty JSON object is a valid config.
//! - Unknown fields are rejected instead of silently ignored.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT_TEMPLATE_ID: &str = "project-input";
pub const DEFAULT_LIST_TEMPLATE_ID: &str = "project-list";
pub const DEFAULT_ITEM_TEMPLATE_ID: &str = "single-project";
pub const DEFAULT_HOST_ID: &str = "app";

/// Template and mount point identifiers in the host page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageLayout {
    pub input_template_id: String,
    pub list_template_id: String,
    pub item_template_id: String,
    /// Receives the input form as its first child.
    pub input_host_id: String,
    /// Receives both list views, appended in active, finished order.
    pub list_host_id: String,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            input_template_id: DEFAULT_INPUT_TEMPLATE_ID.to_string(),
            list_template_id: DEFAULT_LIST_TEMPLATE_ID.to_string(),
            item_template_id: DEFAULT_ITEM_TEMPLATE_ID.to_string(),
            input_host_id: DEFAULT_HOST_ID.to_string(),
            list_host_id: DEFAULT_HOST_ID.to_string(),
        }
    }
}

/// Top-level configuration file shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// `trace|debug|info|warn|error`; build default when absent.
    pub log_level: Option<String>,
    /// Absolute log directory; logging stays off when absent.
    pub log_dir: Option<String>,
    pub layout: PageLayout,
}

impl BoardConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(ConfigError::Parse)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}
