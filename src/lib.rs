pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod ingest;
pub mod models;
pub mod query;
pub mod tokenizer;

pub use config::{EngineConfig, TokenizerConfig};
pub use engine::{SearchEngine, Searcher, WriterSession};
pub use error::{EngineError, Result};
pub use models::{Document, DocumentId, DocumentSource, Field};
pub use query::{Query, QueryParser};
pub use tokenizer::Tokenizer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
