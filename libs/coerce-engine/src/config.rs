use serde::Deserialize;

use crate::error::EngineError;
use crate::handlers;

/// Root configuration, parsed from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Handler names in dispatch order. The first accepting handler wins.
    #[serde(default = "default_handlers")]
    pub handlers: Vec<String>,

    /// Named class declarations.
    #[serde(default)]
    pub types: Vec<TypeConfig>,
}

fn default_handlers() -> Vec<String> {
    handlers::DEFAULT_ORDER.iter().map(|s| s.to_string()).collect()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            handlers: default_handlers(),
            types: Vec::new(),
        }
    }
}

/// A named class.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeConfig {
    pub name: String,
    /// Direct supertypes, as type descriptors (`Shape`, `Number`, `String[]`).
    #[serde(default)]
    pub supertypes: Vec<String>,
    /// Parameter classes of single-argument record constructors. Each builds
    /// an instance holding the argument in its `value` field.
    #[serde(default)]
    pub constructors: Vec<String>,
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, EngineError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| EngineError::Config(format!("{path}: {e}")))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))
    }
}
