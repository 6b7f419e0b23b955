//! YAML configuration file support.
//!
//! Every field is optional; an empty file (apart from `version`) yields the
//! defaults, which match the behavior of the command line without flags.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "deid training set"
//!
//! align:
//!   cursor: retry          # or "legacy" to reproduce old .con files exactly
//!   group_by: text         # or "label_and_text"
//!
//! segment:
//!   kind: unicode          # or "whitespace" for pre-tokenized text
//!
//! output:
//!   concept_dir: con
//!   text_dir: txt
//!
//! parallel: true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ConvertOptions, CursorPolicy, GroupKey, SegmenterKind};

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration for a conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ConverterConfig {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub align: AlignYamlConfig,

    #[serde(default)]
    pub segment: SegmentYamlConfig,

    #[serde(default)]
    pub output: OutputYamlConfig,

    #[serde(default)]
    pub parallel: bool,
}

impl ConverterConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: ConverterConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.output.validate()
    }

    /// Options for [`convert_directory`](crate::convert_directory).
    pub fn to_options(&self) -> ConvertOptions {
        ConvertOptions {
            cursor: self.align.cursor,
            group_by: self.align.group_by,
            concept_dir: self.output.concept_dir.clone(),
            text_dir: self.output.text_dir.clone(),
            parallel: self.parallel,
        }
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            name: None,
            align: AlignYamlConfig::default(),
            segment: SegmentYamlConfig::default(),
            output: OutputYamlConfig::default(),
            parallel: false,
        }
    }
}

/// Alignment stage YAML configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignYamlConfig {
    #[serde(default)]
    pub cursor: CursorPolicy,

    #[serde(default)]
    pub group_by: GroupKey,
}

/// Segmentation stage YAML configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentYamlConfig {
    #[serde(default)]
    pub kind: SegmenterKind,
}

/// Output layout YAML configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputYamlConfig {
    #[serde(default = "default_concept_dir")]
    pub concept_dir: String,

    #[serde(default = "default_text_dir")]
    pub text_dir: String,
}

impl OutputYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        for (field, value) in [("concept_dir", &self.concept_dir), ("text_dir", &self.text_dir)] {
            if !is_single_component(value) {
                return Err(ConfigLoadError::Validation(format!(
                    "output.{field} must be a plain directory name, got {value:?}"
                )));
            }
        }
        if self.concept_dir == self.text_dir {
            return Err(ConfigLoadError::Validation(
                "output.concept_dir and output.text_dir must differ".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for OutputYamlConfig {
    fn default() -> Self {
        Self {
            concept_dir: default_concept_dir(),
            text_dir: default_text_dir(),
        }
    }
}

fn is_single_component(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

fn default_version() -> String {
    "1.0".to_string()
}
fn default_concept_dir() -> String {
    crate::DEFAULT_CONCEPT_DIR.to_string()
}
fn default_text_dir() -> String {
    crate::DEFAULT_TEXT_DIR.to_string()
}
