//! Configuration: report layout and the inputs of every scale-up step
//!
//! Stored as JSON. Every field has a default, so a file only needs the values
//! that differ from the sheet defaults:
//!
//! ```json
//! {
//!   "report": { "title": "Line 3 Scale-Up", "layout": { "page_size": "Letter" } },
//!   "workflow": { "spray_rate": { "lab_spray_rate": 60.0 } }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::report::{PageLayout, PdfRenderer};
use crate::workflow::ScaleUpWorkflow;

/// Title used when none is configured
pub const DEFAULT_REPORT_TITLE: &str = "FBP Granulation Scale-Up Report (Top Spray)";

/// Report settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Document title
    pub title: String,
    /// Append the "Equations Used" section
    pub include_equations: bool,
    /// Sections to include; empty means all computed sections
    pub sections: Vec<String>,
    /// PDF page layout
    pub layout: PageLayout,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_REPORT_TITLE.to_string(),
            include_equations: false,
            sections: Vec::new(),
            layout: PageLayout::default(),
        }
    }
}

impl ReportConfig {
    /// PDF renderer for this layout
    pub fn pdf_renderer(&self) -> PdfRenderer {
        PdfRenderer::new(self.layout)
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleUpConfig {
    /// Report settings
    pub report: ReportConfig,
    /// Step inputs
    pub workflow: ScaleUpWorkflow,
}

impl ScaleUpConfig {
    /// Load configuration from a JSON file
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed, or fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed(e.to_string()))?;
        let config = Self::from_json(&contents)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from a JSON string
    ///
    /// # Errors
    /// Returns error if the JSON is malformed or fails validation
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    ///
    /// # Errors
    /// Returns error if the configuration cannot be serialized or written
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeFailed(e.to_string()))?;
        fs::write(path, contents).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        Ok(())
    }

    /// Check settings that serde cannot
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] for an empty title or an unusable page layout
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.title.trim().is_empty() {
            return Err(ConfigError::Invalid("report title must not be empty".into()));
        }
        self.report
            .layout
            .validate()
            .map_err(|msg| ConfigError::Invalid(format!("report layout: {msg}")))
    }
}

/// Errors that can occur with configuration files
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read file
    LoadFailed(String),
    /// Failed to parse file contents
    ParseFailed(String),
    /// Failed to serialize configuration
    SerializeFailed(String),
    /// Failed to write file
    SaveFailed(String),
    /// Parsed but unusable
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::LoadFailed(msg) => write!(f, "Failed to load: {msg}"),
            ConfigError::ParseFailed(msg) => write!(f, "Failed to parse: {msg}"),
            ConfigError::SerializeFailed(msg) => write!(f, "Failed to serialize: {msg}"),
            ConfigError::SaveFailed(msg) => write!(f, "Failed to save: {msg}"),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
