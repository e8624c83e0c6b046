use parking_lot::MutexGuard;
use tracing::info;

use crate::error::Result;
use crate::index::Segment;
use crate::models::{generate_document_id, Document, DocumentId, DocumentSource};

use super::SearchEngine;

/// Single-writer session staging mutations against a private segment copy
///
/// Holds the engine's writer lock for its whole lifetime. Dropping the
/// session without [`commit`](WriterSession::commit) aborts it: staged
/// mutations are discarded and the lock is released.
pub struct WriterSession<'a> {
    engine: &'a SearchEngine,
    _guard: MutexGuard<'a, ()>,
    staged: Segment,
    staged_ops: usize,
}

impl<'a> WriterSession<'a> {
    pub(crate) fn new(engine: &'a SearchEngine, guard: MutexGuard<'a, ()>) -> Self {
        let staged = (*engine.committed_segment()).clone();
        Self {
            engine,
            _guard: guard,
            staged,
            staged_ops: 0,
        }
    }

    /// Stage a new document; returns its generated identifier
    pub fn add_document(&mut self, source: DocumentSource) -> DocumentId {
        let id = generate_document_id();
        let doc = Document::from_source(id.clone(), source);
        self.staged.insert_document(doc, self.engine.tokenizer());
        self.staged_ops += 1;
        id
    }

    /// Stage a delete; false when the id resolves to no live document
    ///
    /// A miss is a normal outcome, not a failure.
    pub fn delete_by_id(&mut self, doc_id: &str) -> bool {
        let deleted = self.staged.delete_document(doc_id);
        if deleted {
            self.staged_ops += 1;
        }
        deleted
    }

    /// Number of staged mutations in this session
    pub fn staged_ops(&self) -> usize {
        self.staged_ops
    }

    /// Live documents the segment will hold after commit
    pub fn doc_count(&self) -> usize {
        self.staged.doc_count()
    }

    /// Atomically publish every staged mutation
    ///
    /// Reader sessions opened after the commit observe the new segment;
    /// sessions opened before keep their snapshot.
    pub fn commit(self) -> Result<()> {
        let generation = self.engine.next_generation();
        let doc_count = self.staged.doc_count();
        let staged_ops = self.staged_ops;
        self.engine.publish(self.staged, generation)?;
        info!(generation, doc_count, staged_ops, "committed writer session");
        Ok(())
    }
}
