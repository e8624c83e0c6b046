use std::cmp::Ordering;
use std::sync::Arc;

use crate::index::Segment;
use crate::models::{Document, Field};
use crate::query::Query;

/// Reader over one committed snapshot
///
/// The snapshot is fixed at construction; commits that land later are not
/// observed by this searcher.
pub struct Searcher {
    snapshot: Arc<Segment>,
}

impl Searcher {
    pub(crate) fn new(snapshot: Arc<Segment>) -> Self {
        Self { snapshot }
    }

    /// Evaluate `query`, order ascending by `order_by` with document-id
    /// tie-break, and truncate to `limit`
    ///
    /// Zero matches produce an empty vector, never an error.
    pub fn search(&self, query: &Query, limit: u32, order_by: Field) -> Vec<Document> {
        let candidates = query.evaluate(&self.snapshot);
        let mut results: Vec<Document> = candidates
            .iter()
            .filter_map(|id| self.snapshot.get(id).cloned())
            .collect();

        results.sort_by(|a, b| Self::compare(a, b, order_by));
        results.truncate(limit as usize);
        results
    }

    fn compare(a: &Document, b: &Document, order_by: Field) -> Ordering {
        let by_key = match order_by {
            Field::CreatedDate => a.created_date.cmp(&b.created_date),
            Field::Rubrics => a.rubrics.cmp(&b.rubrics),
            Field::Text => a.text.cmp(&b.text),
        };
        by_key.then_with(|| a.id.cmp(&b.id))
    }

    /// Stored document by id
    pub fn get(&self, doc_id: &str) -> Option<Document> {
        self.snapshot.get(doc_id).cloned()
    }

    /// Every stored document in this snapshot, ordered by id
    pub fn all_documents(&self) -> Vec<Document> {
        self.snapshot.all_documents()
    }

    pub fn doc_count(&self) -> usize {
        self.snapshot.doc_count()
    }
}
