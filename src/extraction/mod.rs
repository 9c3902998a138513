//! Safety-data-sheet text extraction.
//!
//! Turns an uploaded document into plain text for the matcher. Failures
//! never reach the matcher: `extract_document` degrades to empty text.

pub mod document;
pub mod format;
pub mod pdf;
pub mod sanitize;
pub mod types;

pub use document::*;
pub use format::*;
pub use pdf::*;
pub use sanitize::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("Document has no pages")]
    EmptyDocument,
}
