use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::{DocumentId, Field};

/// Term to posting-list mapping for the indexed fields
///
/// A posting list is an ordered set of document ids, so membership is
/// duplicate-free and iteration order is stable.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InvertedIndex {
    postings: HashMap<Field, HashMap<String, BTreeSet<DocumentId>>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `doc_id` into the posting list of every given term
    ///
    /// Re-adding a document with the same terms leaves the lists unchanged.
    pub fn add<I>(&mut self, doc_id: &str, field: Field, terms: I)
    where
        I: IntoIterator<Item = String>,
    {
        let field_postings = self.postings.entry(field).or_default();
        for term in terms {
            field_postings
                .entry(term)
                .or_default()
                .insert(doc_id.to_string());
        }
    }

    /// Remove `doc_id` from every posting list across all fields
    ///
    /// Safe to call for an absent document. Emptied posting lists are
    /// dropped so no dangling entries remain.
    pub fn remove(&mut self, doc_id: &str) {
        for field_postings in self.postings.values_mut() {
            field_postings.retain(|_, ids| {
                ids.remove(doc_id);
                !ids.is_empty()
            });
        }
    }

    /// Posting list for an exact term, if any
    pub fn postings(&self, field: Field, term: &str) -> Option<&BTreeSet<DocumentId>> {
        self.postings.get(&field).and_then(|terms| terms.get(term))
    }

    /// Document ids containing `term` in `field`; empty when unknown
    pub fn terms_matching(&self, field: Field, term: &str) -> BTreeSet<DocumentId> {
        self.postings(field, term).cloned().unwrap_or_default()
    }

    /// Number of distinct terms indexed for a field
    pub fn term_count(&self, field: Field) -> usize {
        self.postings
            .get(&field)
            .map(|terms| terms.len())
            .unwrap_or(0)
    }
}
