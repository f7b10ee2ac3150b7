//! Configuration file handling
//!
//! The optional `--config` document is YAML:
//!
//! ```yaml
//! base_url: https://staging.example.com
//! headers:
//!   User-Agent: seccheck
//! cookies:
//!   session: sess-admin-123
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::{Error, Result};

/// Session-level settings shared by every scenario in a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Target origin; overrides `--base-url` when present
    pub base_url: Option<String>,

    /// Default headers sent with every request
    pub headers: BTreeMap<String, String>,

    /// Default cookies sent with every request
    pub cookies: BTreeMap<String, String>,
}

/// On-disk shape; every key may be missing or null
#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    headers: Option<BTreeMap<String, String>>,
    #[serde(default)]
    cookies: Option<BTreeMap<String, String>>,
}

impl RunConfig {
    /// Load configuration from an optional YAML file
    ///
    /// Returns an empty configuration when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| Error::ConfigParse {
            path: path.display().to_string(),
            error: e.to_string(),
        })
    }

    /// Parse a YAML configuration document
    pub fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: Option<RawConfig> = serde_yaml::from_str(content)?;
        let raw = raw.unwrap_or_default();

        Ok(Self {
            base_url: raw.base_url.filter(|url| !url.trim().is_empty()),
            headers: raw.headers.unwrap_or_default(),
            cookies: raw.cookies.unwrap_or_default(),
        })
    }

    /// Pick the effective base URL: the config file wins over the CLI flag
    pub fn resolve_base_url(&self, cli_base_url: &str) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| cli_base_url.to_string())
    }
}
