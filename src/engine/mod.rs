mod searcher;
mod writer;

pub use searcher::Searcher;
pub use writer::WriterSession;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use tracing::info;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::index::{Segment, SegmentStore};
use crate::models::{Document, Field};
use crate::query::{Query, QueryParser};
use crate::tokenizer::Tokenizer;

/// Long-lived handle over one index directory
///
/// Readers take immutable snapshots of the committed segment and never block
/// each other or a concurrent writer. All mutation is staged inside a
/// [`WriterSession`] and published atomically on commit. Closing the engine
/// is dropping it; there are no background threads.
pub struct SearchEngine {
    config: EngineConfig,
    tokenizer: Tokenizer,
    store: SegmentStore,
    committed: ArcSwap<Segment>,
    generation: AtomicU64,
    writer_lock: Mutex<()>,
}

impl SearchEngine {
    /// Open the engine over `config.data_dir`
    ///
    /// An absent or empty directory yields an empty engine; ingestion must
    /// populate it before the first search returns anything.
    pub fn open(config: EngineConfig) -> Result<Self> {
        let store = SegmentStore::open(&config.data_dir)?;
        let (segment, generation) = match store.load_manifest()? {
            Some(manifest) => {
                let segment = store.load_segment(&manifest)?;
                store.sweep_stale_generations(Some(manifest.generation));
                (segment, manifest.generation)
            }
            None => {
                store.sweep_stale_generations(None);
                (Segment::new(), 0)
            }
        };

        info!(
            data_dir = %config.data_dir.display(),
            generation,
            doc_count = segment.doc_count(),
            "opened search engine"
        );

        Ok(Self {
            tokenizer: Tokenizer::new(&config.tokenizer_config),
            store,
            committed: ArcSwap::from_pointee(segment),
            generation: AtomicU64::new(generation),
            writer_lock: Mutex::new(()),
            config,
        })
    }

    /// Snapshot-bound reader over the current committed segment
    pub fn searcher(&self) -> Searcher {
        Searcher::new(self.committed.load_full())
    }

    /// Open a writer session
    ///
    /// Fails fast with [`EngineError::WriterBusy`] when another session
    /// holds uncommitted mutations; callers may retry after it commits or
    /// aborts.
    pub fn writer(&self) -> Result<WriterSession<'_>> {
        let guard = self
            .writer_lock
            .try_lock()
            .ok_or(EngineError::WriterBusy)?;
        Ok(WriterSession::new(self, guard))
    }

    /// Parse query text against the configured default search field
    pub fn parse_query(&self, query_text: &str) -> Result<Query> {
        QueryParser::new(&self.tokenizer, self.config.default_search_field).parse(query_text)
    }

    /// Keyword search with the configured defaults: primary search field,
    /// result limit, ascending `created_date` order
    pub fn search(&self, query_text: &str) -> Result<Vec<Document>> {
        let query = self.parse_query(query_text)?;
        Ok(self
            .searcher()
            .search(&query, self.config.default_limit, Field::CreatedDate))
    }

    /// Search with an explicit query expression, limit and sort field
    pub fn search_with(&self, query: &Query, limit: u32, order_by: Field) -> Vec<Document> {
        self.searcher().search(query, limit, order_by)
    }

    /// Fetch a stored document by id
    ///
    /// [`EngineError::DocumentNotFound`] is the normal outcome for an id
    /// that does not resolve, not a fault.
    pub fn get_document(&self, doc_id: &str) -> Result<Document> {
        self.searcher()
            .get(doc_id)
            .ok_or_else(|| EngineError::DocumentNotFound(doc_id.to_string()))
    }

    /// Delete one document; false when the id does not resolve
    pub fn delete(&self, doc_id: &str) -> Result<bool> {
        let mut session = self.writer()?;
        if !session.delete_by_id(doc_id) {
            return Ok(false);
        }
        session.commit()?;
        info!(doc_id, "deleted document");
        Ok(true)
    }

    /// All stored documents in the current committed segment
    pub fn all_documents(&self) -> Vec<Document> {
        self.searcher().all_documents()
    }

    /// Live document count
    pub fn doc_count(&self) -> usize {
        self.committed.load().doc_count()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub(crate) fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub(crate) fn committed_segment(&self) -> Arc<Segment> {
        self.committed.load_full()
    }

    pub(crate) fn next_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst) + 1
    }

    /// Persist `segment` and swap it in as the committed snapshot
    pub(crate) fn publish(&self, segment: Segment, generation: u64) -> Result<()> {
        self.store.commit(&segment, generation)?;
        self.generation.store(generation, Ordering::SeqCst);
        self.committed.store(Arc::new(segment));
        Ok(())
    }
}
