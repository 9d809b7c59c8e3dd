//! Settings files
//!
//! Conversion options can be kept in a TOML file and passed to the CLI with
//! `--config`. Every key is optional; command-line flags take precedence.
//!
//! ```toml
//! [sampling]
//! mode = "fixed"
//! segments = 16
//!
//! [output]
//! format = "python"
//! headings = true
//! flip_y = true
//! margin = 0.05
//!
//! [input]
//! strict = true
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::output::OutputFormat;
use crate::turtle::Sampling;
use crate::ConvertConfig;

/// Errors that can occur when loading a settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Contents of a settings file
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sampling: Option<Sampling>,
    pub output: OutputSettings,
    pub input: InputSettings,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: Option<OutputFormat>,
    pub headings: Option<bool>,
    pub flip_y: Option<bool>,
    pub margin: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    pub strict: Option<bool>,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load settings from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay the keys present in this file onto `config`
    pub fn apply(&self, mut config: ConvertConfig) -> ConvertConfig {
        if let Some(sampling) = self.sampling {
            config.emit.sampling = sampling;
        }
        if let Some(headings) = self.output.headings {
            config.emit.headings = headings;
        }
        if let Some(flip_y) = self.output.flip_y {
            config.flip_y = flip_y;
        }
        if let Some(margin) = self.output.margin {
            config.margin = margin;
        }
        if let Some(strict) = self.input.strict {
            config.strict = strict;
        }
        config
    }

    /// Output format from the file, or the default
    pub fn format(&self) -> OutputFormat {
        self.output.format.unwrap_or_default()
    }
}
