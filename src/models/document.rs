use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique document identifier
pub type DocumentId = String;

/// Canonical timestamp format for `created_date`
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Generate a fresh document identifier
pub fn generate_document_id() -> DocumentId {
    Uuid::new_v4().to_string()
}

/// Parse a timestamp in the canonical format
pub fn parse_created_date(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw.trim(), DATE_FORMAT)
}

/// Record fields known to the engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    Rubrics,
    Text,
    CreatedDate,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Rubrics => "rubrics",
            Field::Text => "text",
            Field::CreatedDate => "created_date",
        }
    }

    /// Resolve a query-qualifier name; `None` for unknown fields
    pub fn from_name(name: &str) -> Option<Field> {
        match name.to_ascii_lowercase().as_str() {
            "rubrics" => Some(Field::Rubrics),
            "text" => Some(Field::Text),
            "created_date" => Some(Field::CreatedDate),
            _ => None,
        }
    }

    /// Fields whose content is tokenized into the inverted index
    pub fn indexed() -> [Field; 2] {
        [Field::Rubrics, Field::Text]
    }

    pub fn is_indexed(&self) -> bool {
        matches!(self, Field::Rubrics | Field::Text)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input fields for a document about to be indexed
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentSource {
    pub rubrics: String,
    pub text: String,
    pub created_date: NaiveDateTime,
}

/// Stored document with retrievable field values
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub rubrics: String,
    pub text: String,
    #[serde(with = "created_date_serde")]
    pub created_date: NaiveDateTime,
}

impl Document {
    pub fn from_source(id: DocumentId, source: DocumentSource) -> Self {
        Self {
            id,
            rubrics: source.rubrics,
            text: source.text,
            created_date: source.created_date,
        }
    }

    /// Canonical string form of `created_date`, identical to the ingested value
    pub fn created_date_str(&self) -> String {
        self.created_date.format(DATE_FORMAT).to_string()
    }

    /// Raw text of an indexed field; `None` for fields that are stored only
    pub fn indexed_text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Rubrics => Some(&self.rubrics),
            Field::Text => Some(&self.text),
            Field::CreatedDate => None,
        }
    }

    /// Stored value of a field in its surface form
    pub fn stored_value(&self, field: Field) -> String {
        match field {
            Field::Rubrics => self.rubrics.clone(),
            Field::Text => self.text.clone(),
            Field::CreatedDate => self.created_date_str(),
        }
    }
}

/// `created_date` crosses serialization boundaries in its canonical string form
mod created_date_serde {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
