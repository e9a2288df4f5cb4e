pub mod document;
pub mod updates;

pub use document::{DocumentError, read_document, write_document_atomic};
pub use updates::{load_updates, parse_updates};
