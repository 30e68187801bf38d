//! TOML-backed switcher settings.
//!
//! ```toml
//! title_max_chars = 30
//! clear_query_on_show = false
//!
//! [apps."org.example.tool"]
//! name = "Tool"
//! glyph = "🛠"
//! ```

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_catalog::{AppCatalog, AppDisplay, FALLBACK_GLYPH};

/// Default card title length, in characters, before truncation.
pub const DEFAULT_TITLE_MAX_CHARS: usize = 26;

#[derive(Debug, Error)]
/// Failure to load a [`SwitcherConfig`] from disk.
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Catalog entry supplied by the user for one app id.
pub struct AppOverride {
    pub name: String,
    #[serde(default = "default_glyph")]
    pub glyph: String,
}

fn default_glyph() -> String {
    FALLBACK_GLYPH.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// User-tunable switcher settings. Missing keys take their defaults.
pub struct SwitcherConfig {
    /// Maximum title length on a window card; longer titles are cut and get `…`.
    pub title_max_chars: usize,
    /// App id overrides merged over the built-in catalog.
    pub apps: BTreeMap<String, AppOverride>,
    /// Whether showing the overlay clears the search query.
    pub clear_query_on_show: bool,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            title_max_chars: DEFAULT_TITLE_MAX_CHARS,
            apps: BTreeMap::new(),
            clear_query_on_show: true,
        }
    }
}

impl SwitcherConfig {
    /// Parses settings from TOML text.
    pub fn from_toml_str(body: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(body)
    }

    /// Reads and parses the settings file at `path`.
    ///
    /// # Errors
    ///
    /// Unreadable files and TOML parse failures are both reported with the offending path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let body = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&body).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Built-in catalog with this config's overrides applied.
    pub fn catalog(&self) -> AppCatalog {
        AppCatalog::with_overrides(self.apps.iter().map(|(app_id, entry)| {
            (
                app_id,
                AppDisplay::new(entry.name.clone(), entry.glyph.clone()),
            )
        }))
    }
}
