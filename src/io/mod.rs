//! Loading widget documents from structured data.

mod format;
mod input;

pub use format::DocumentFormat;
pub use input::{load_document, parse_document_str};
