//! Report configuration

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ack::TechnicalAcknowledgment;
use crate::{Error, Result};

/// Output format for rendered reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Indented human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON of the full context tree
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(Error::Config(format!("unknown report format '{other}'"))),
        }
    }
}

/// Configuration for rendering error reports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format (default: text)
    pub format: ReportFormat,
    /// Technical acknowledgment policy (default: follow the interchange)
    pub technical_acknowledgment: TechnicalAcknowledgment,
}

impl ReportConfig {
    /// Create a new configuration with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format
    #[must_use]
    pub fn format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the technical acknowledgment policy
    #[must_use]
    pub fn technical_acknowledgment(mut self, policy: TechnicalAcknowledgment) -> Self {
        self.technical_acknowledgment = policy;
        self
    }

    /// Load configuration from a file; `.yaml`/`.yml` is read as YAML, anything else as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading report configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;

        if path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml")
        {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    /// Parse configuration from a YAML string
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the YAML is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| Error::Config(format!("YAML parse error: {e}")))
    }

    /// Parse configuration from a JSON string
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(format!("JSON parse error: {e}")))
    }
}
