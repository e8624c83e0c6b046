use std::collections::BTreeSet;

use unicode_segmentation::UnicodeSegmentation;

use crate::config::TokenizerConfig;

/// Text tokenizer shared by the index and query paths
///
/// Both paths must produce identical terms for identical surface text, so
/// the tokenizer is pure: no per-call state, no external lookups.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create a new tokenizer from configuration
    pub fn new(config: &TokenizerConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Tokenize text into a vector of terms
    ///
    /// Unicode word segmentation runs first so scripts without whitespace
    /// still separate; the second pass splits on non-alphanumeric boundaries
    /// inside each word. Empty tokens are dropped.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .flat_map(|word| word.split(|c: char| !c.is_alphanumeric()))
            .filter(|token| !token.is_empty())
            .map(|token| {
                if self.config.lowercase {
                    token.to_lowercase()
                } else {
                    token.to_string()
                }
            })
            .collect()
    }

    /// Distinct terms from text, ordered
    pub fn unique_terms(&self, text: &str) -> BTreeSet<String> {
        self.tokenize(text).into_iter().collect()
    }
}
