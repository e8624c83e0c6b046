use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::Field;

/// Engine configuration
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Directory holding the committed index segment
    pub data_dir: PathBuf,
    /// Field searched by unqualified query terms
    pub default_search_field: Field,
    /// Result cap applied by the default search entry point
    pub default_limit: u32,
    pub tokenizer_config: TokenizerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./indexdir"),
            default_search_field: Field::Text,
            default_limit: 20,
            tokenizer_config: TokenizerConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Create a configuration rooted at `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Set the field searched by unqualified terms
    pub fn with_default_search_field(mut self, field: Field) -> Self {
        self.default_search_field = field;
        self
    }

    /// Set the default result limit
    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }
}

/// Tokenizer configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenizerConfig {
    pub lowercase: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self { lowercase: true }
    }
}
