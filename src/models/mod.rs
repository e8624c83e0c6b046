mod document;

pub use document::{
    generate_document_id, parse_created_date, Document, DocumentId, DocumentSource, Field,
    DATE_FORMAT,
};
