use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::index::InvertedIndex;
use crate::models::{Document, DocumentId, Field};
use crate::tokenizer::Tokenizer;

/// Point-in-time unit combining the document store and the inverted index
///
/// Committed segments are immutable; writer sessions mutate a private clone
/// and publish it atomically.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Segment {
    docs: BTreeMap<DocumentId, Document>,
    index: InvertedIndex,
}

impl Segment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(docs: BTreeMap<DocumentId, Document>, index: InvertedIndex) -> Self {
        Self { docs, index }
    }

    /// Store a document verbatim and index its text fields
    pub fn insert_document(&mut self, doc: Document, tokenizer: &Tokenizer) {
        for field in Field::indexed() {
            if let Some(raw) = doc.indexed_text(field) {
                self.index.add(&doc.id, field, tokenizer.unique_terms(raw));
            }
        }
        self.docs.insert(doc.id.clone(), doc);
    }

    /// Remove a document from the store and from every posting list
    ///
    /// Returns false when the id resolves to no live document.
    pub fn delete_document(&mut self, doc_id: &str) -> bool {
        if self.docs.remove(doc_id).is_none() {
            return false;
        }
        self.index.remove(doc_id);
        true
    }

    /// Stored fields for a document, verbatim
    pub fn get(&self, doc_id: &str) -> Option<&Document> {
        self.docs.get(doc_id)
    }

    /// All stored documents as of the call, ordered by id
    pub fn all_documents(&self) -> Vec<Document> {
        self.docs.values().cloned().collect()
    }

    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub(crate) fn docs(&self) -> &BTreeMap<DocumentId, Document> {
        &self.docs
    }
}
