//! Configuration for a [`ContentModel`](crate::ContentModel).
//!
//! Stored as JSON, every field optional:
//!
//! ```
//! use scoped_model::{Locality, ModelConfig};
//!
//! let config = ModelConfig::from_json_str(r#"{"default_locality": "root"}"#)?;
//! assert_eq!(config.default_locality, Locality::Root);
//! assert!(!config.pretty_json);
//! assert!(config.attribute_prefix);
//! # Ok::<(), scoped_model::Error>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Placement policy for [`ContentModel::set_with`](crate::ContentModel::set_with).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locality {
    /// Write relative to the root scope's data.
    Root,
    /// Write relative to the current scope's data, reusing the closest
    /// existing intermediate maps.
    #[default]
    Closest,
    /// Write a freshly built structure into the current scope only.
    Isolated,
}

impl std::str::FromStr for Locality {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "root" => Ok(Locality::Root),
            "closest" => Ok(Locality::Closest),
            "isolated" => Ok(Locality::Isolated),
            other => Err(format!("unknown locality '{other}'")),
        }
    }
}

/// Behavioural switches for a content model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Locality used by [`ContentModel::set`](crate::ContentModel::set).
    pub default_locality: Locality,

    /// Pretty-print the text produced by `to_json_text`.
    pub pretty_json: bool,

    /// Route `get("@name")` to the attribute namespace.
    pub attribute_prefix: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            default_locality: Locality::Closest,
            pretty_json: false,
            attribute_prefix: true,
        }
    }
}

impl ModelConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), ?config, "Loaded model config");
        Ok(config)
    }
}
