//! Shared types for the API layer.

use std::sync::Arc;

use serde::Serialize;

use crate::extraction::{ExtractedDocument, PdfExtractor, PdfTextExtractor};
use crate::guidance::{ExamTables, ResultView};

/// Shared context for all API routes.
/// Immutable after startup; every request evaluates independently.
#[derive(Clone)]
pub struct ApiContext {
    pub tables: Arc<ExamTables>,
    pub extractor: Arc<dyn PdfExtractor + Send + Sync>,
}

impl ApiContext {
    pub fn new(tables: ExamTables) -> Self {
        Self::with_extractor(tables, Arc::new(PdfTextExtractor))
    }

    pub fn with_extractor(
        tables: ExamTables,
        extractor: Arc<dyn PdfExtractor + Send + Sync>,
    ) -> Self {
        Self {
            tables: Arc::new(tables),
            extractor,
        }
    }
}

/// What the upload endpoint read from the attached document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub page_count: usize,
    pub text_length: usize,
    pub warning: Option<String>,
}

impl From<&ExtractedDocument> for DocumentSummary {
    fn from(doc: &ExtractedDocument) -> Self {
        Self {
            page_count: doc.page_count,
            text_length: doc.text_length(),
            warning: doc.warning.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub tables_version: String,
    pub view: ResultView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentSummary>,
}
