use serde::{Deserialize, Serialize};

use super::ExtractionError;

/// Per-page extraction result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageExtraction {
    pub page_number: usize,
    pub text: String,
}

/// Text handed to the matcher, plus what happened on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Concatenated page text. Empty when extraction failed.
    pub text: String,
    pub page_count: usize,
    /// Set when the document could not be read completely.
    pub warning: Option<String>,
}

impl ExtractedDocument {
    pub fn failed(warning: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            page_count: 0,
            warning: Some(warning.into()),
        }
    }

    pub fn text_length(&self) -> usize {
        self.text.chars().count()
    }
}

/// PDF text extraction abstraction (allows mocking for tests)
pub trait PdfExtractor {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<Vec<PageExtraction>, ExtractionError>;
}
