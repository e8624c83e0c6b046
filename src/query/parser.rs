//! Parser for keyword query strings
//!
//! # Grammar
//!
//! ```text
//! query  := group (OR group)*
//! group  := clause (AND? clause)*
//! clause := FIELD ':' value | value
//! value  := free text, normalized by the shared tokenizer
//! ```
//!
//! Adjacent clauses combine conjunctively; `OR` binds looser. The `AND` and
//! `OR` keywords are case-insensitive. Query terms go through the same
//! tokenizer as indexed text, so identical surface terms map to identical
//! index terms.

use crate::error::{EngineError, Result};
use crate::models::Field;
use crate::query::Query;
use crate::tokenizer::Tokenizer;

/// Parser translating raw query text into a [`Query`] expression
pub struct QueryParser<'a> {
    tokenizer: &'a Tokenizer,
    default_field: Field,
}

impl<'a> QueryParser<'a> {
    pub fn new(tokenizer: &'a Tokenizer, default_field: Field) -> Self {
        Self {
            tokenizer,
            default_field,
        }
    }

    /// Set the default field for unqualified clauses
    pub fn with_default_field(mut self, field: Field) -> Self {
        self.default_field = field;
        self
    }

    /// Parse `input` into a query expression
    pub fn parse(&self, input: &str) -> Result<Query> {
        // Completed OR branches, and the conjunctive group being built
        let mut branches: Vec<Query> = Vec::new();
        let mut current: Vec<Query> = Vec::new();
        let mut pending_operator = false;

        for raw in input.split_whitespace() {
            let upper = raw.to_ascii_uppercase();
            match upper.as_str() {
                "OR" | "AND" => {
                    if current.is_empty() || pending_operator {
                        return Err(EngineError::MalformedQuery(format!(
                            "dangling {} operator",
                            upper
                        )));
                    }
                    if upper == "OR" {
                        branches.push(Query::conjunction(std::mem::take(&mut current)));
                    }
                    pending_operator = true;
                }
                _ => {
                    if let Some(clause) = self.parse_clause(raw)? {
                        current.push(clause);
                        pending_operator = false;
                    }
                }
            }
        }

        if pending_operator {
            return Err(EngineError::MalformedQuery(
                "operator with no following clause".to_string(),
            ));
        }
        if !current.is_empty() {
            branches.push(Query::conjunction(current));
        }
        if branches.is_empty() {
            return Err(EngineError::MalformedQuery(
                "query is empty after tokenization".to_string(),
            ));
        }
        Ok(Query::disjunction(branches))
    }

    /// Parse one whitespace-delimited clause
    ///
    /// Returns `None` when an unqualified clause normalizes to nothing
    /// (punctuation-only input); a field qualifier with no usable value is
    /// an error instead.
    fn parse_clause(&self, raw: &str) -> Result<Option<Query>> {
        let (field, value) = match raw.split_once(':') {
            Some((name, value)) => {
                let field = Field::from_name(name).ok_or_else(|| {
                    EngineError::MalformedQuery(format!("unknown field: {}", name))
                })?;
                if !field.is_indexed() {
                    return Err(EngineError::MalformedQuery(format!(
                        "field is not searchable: {}",
                        field
                    )));
                }
                (field, value)
            }
            None => (self.default_field, raw),
        };

        let terms = self.tokenizer.tokenize(value);
        if terms.is_empty() {
            if raw.contains(':') {
                return Err(EngineError::MalformedQuery(format!(
                    "unterminated field qualifier: {}",
                    raw
                )));
            }
            return Ok(None);
        }

        let clauses = terms
            .into_iter()
            .map(|term| Query::Term { field, term })
            .collect();
        Ok(Some(Query::conjunction(clauses)))
    }
}
