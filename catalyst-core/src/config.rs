use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_min_content_length() -> usize {
    50
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Tunables for section matching and fallback extraction.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ParserConfig {
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Skip bold-label patterns when the document already carries ## or ###
    /// markdown headers. Bold runs inside structured documents are emphasis,
    /// not section labels.
    #[serde(default = "default_true")]
    pub skip_bold_when_structured: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            skip_bold_when_structured: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Whether whole-document fallback extraction runs when no project
    /// details sections were matched.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Minimum cleaned length for promoting an unstructured document to a
    /// solution section. Shorter documents carry too little signal.
    #[serde(default = "default_min_content_length")]
    pub min_content_length: usize,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_content_length: default_min_content_length(),
        }
    }
}

impl ParserConfig {
    /// Load config from a YAML file path.
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Load config with fallback to defaults.
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|_| {
                eprintln!("⚠️  Failed to load config from {}, using defaults", p);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}
