//! CLI configuration.
//!
//! Values come from three layers: command line flags (or their `WMC_*`
//! environment variables), an optional YAML file, and built-in defaults.
//! The first layer that sets a value wins.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use wmc_protocol::{ParseOptions, WriteOptions};

/// Line ending of written documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Newline {
    #[default]
    Lf,
    Crlf,
}

impl Newline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::Crlf => "\r\n",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Contents of the YAML configuration file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub tab_size: Option<usize>,
    pub newline: Option<Newline>,
    pub generate_layers_group: Option<bool>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

impl FileConfig {
    /// Load the YAML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config from {:?}", path.as_ref()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path.as_ref()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file is a valid, empty configuration
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub tab_size: Option<usize>,
    pub newline: Option<Newline>,
    /// Flags can only switch this on
    pub generate_layers_group: bool,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub tab_size: usize,
    pub newline: Newline,
    pub generate_layers_group: bool,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            tab_size: WriteOptions::default().tab_size,
            newline: Newline::Lf,
            generate_layers_group: false,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl ToolConfig {
    /// Layer the overrides over the file over the defaults.
    pub fn resolve(overrides: &Overrides, file: Option<&FileConfig>) -> Self {
        let defaults = Self::default();
        let file = file.cloned().unwrap_or_default();

        Self {
            tab_size: overrides
                .tab_size
                .or(file.tab_size)
                .unwrap_or(defaults.tab_size),
            newline: overrides
                .newline
                .or(file.newline)
                .unwrap_or(defaults.newline),
            generate_layers_group: overrides.generate_layers_group
                || file
                    .generate_layers_group
                    .unwrap_or(defaults.generate_layers_group),
            log_level: overrides
                .log_level
                .clone()
                .or(file.log_level)
                .unwrap_or(defaults.log_level),
            log_format: overrides
                .log_format
                .or(file.log_format)
                .unwrap_or(defaults.log_format),
        }
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            generate_layers_group: self.generate_layers_group,
        }
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            tab_size: self.tab_size,
            newline: self.newline.as_str().to_string(),
        }
    }
}
