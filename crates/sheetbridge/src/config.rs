//! Session configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::url::KEY_PLACEHOLDER;

/// Scopes the backing script needs to open spreadsheets by URL.
pub const DEFAULT_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/drive",
    "https://www.googleapis.com/auth/spreadsheets",
];

/// Canonical spreadsheet URL, with `{key}` standing in for the document key.
pub const DEFAULT_URL_TEMPLATE: &str = "https://docs.google.com/spreadsheets/d/{key}/edit";

/// Identifies the backing script and how spreadsheets are addressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Deployment id of the Apps Script project that implements the
    /// remote operation catalog.
    pub script_id: String,
    /// Run the latest saved script code rather than the deployed version.
    /// Only works when the caller owns the script.
    pub dev_mode: bool,
    /// OAuth2 scopes the caller's credentials must cover.
    pub scopes: Vec<String>,
    /// Template used to turn a document key into a URL.
    pub url_template: String,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            script_id: String::new(),
            dev_mode: true,
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
        }
    }
}

impl ScriptConfig {
    pub fn new(script_id: impl Into<String>) -> Self {
        Self {
            script_id: script_id.into(),
            ..Self::default()
        }
    }

    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.script_id.trim().is_empty() {
            return Err(Error::Config("script_id must not be empty".into()));
        }
        if !self.url_template.contains(KEY_PLACEHOLDER) {
            return Err(Error::Config(format!(
                "url_template must contain {KEY_PLACEHOLDER}: {}",
                self.url_template
            )));
        }
        Ok(())
    }
}
