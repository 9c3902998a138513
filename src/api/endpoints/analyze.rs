//! Analysis endpoints.
//!
//! `POST /api/analyze` takes a JSON request with the query, optional
//! pre-extracted document text and toggles. `POST /api/analyze/upload`
//! takes the same inputs as a multipart form with an optional PDF.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{AnalyzeResponse, ApiContext, DocumentSummary};
use crate::extraction::{detect_format, extract_document, ExtractedDocument};
use crate::guidance::{analyze as run_analysis, ExamRequest, ResultView, Toggles};

/// `POST /api/analyze`
///
/// Body rejections (malformed JSON, oversized body) use the same error
/// envelope as every other route.
pub async fn analyze(
    State(ctx): State<ApiContext>,
    payload: Result<Json<ExamRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload?;
    Ok(Json(respond(&ctx, &request, None)))
}

/// `POST /api/analyze/upload`: multipart form.
///
/// Text fields: `query`, `pre_placement`, `vibration`, `outdoor`.
/// File field: `document` (PDF, optional; an empty part counts as absent).
pub async fn upload(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let mut query = String::new();
    let mut toggles = Toggles::default();
    let mut document: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "query" => query = field.text().await?,
            "pre_placement" => toggles.pre_placement = parse_toggle(&name, &field.text().await?)?,
            "vibration" => toggles.vibration = parse_toggle(&name, &field.text().await?)?,
            "outdoor" => toggles.outdoor = parse_toggle(&name, &field.text().await?)?,
            "document" => {
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    document = Some(bytes.to_vec());
                }
            }
            other => tracing::debug!(field = other, "Ignoring unknown upload field"),
        }
    }

    let extracted = match document {
        Some(bytes) => {
            if !detect_format(&bytes).is_supported() {
                return Err(ApiError::UnsupportedFormat);
            }
            Some(extract_off_runtime(&ctx, bytes).await?)
        }
        None => None,
    };

    let mut request = ExamRequest::new(query).with_toggles(toggles);
    if let Some(doc) = &extracted {
        request = request.with_document_text(doc.text.clone());
    }

    Ok(Json(respond(&ctx, &request, extracted.as_ref())))
}

/// PDF parsing is CPU-bound; keep it off the async workers. A panic inside
/// the parser degrades like any other extraction failure.
async fn extract_off_runtime(
    ctx: &ApiContext,
    bytes: Vec<u8>,
) -> Result<ExtractedDocument, ApiError> {
    let extractor = ctx.extractor.clone();
    let size_bytes = bytes.len();

    match tokio::task::spawn_blocking(move || extract_document(&*extractor, &bytes)).await
    {
        Ok(doc) => Ok(doc),
        Err(e) if e.is_panic() => {
            tracing::warn!(size_bytes, "PDF parser panicked; continuing without document text");
            Ok(ExtractedDocument::failed("Document could not be parsed"))
        }
        Err(e) => Err(ApiError::Internal(format!("Extraction task failed: {e}"))),
    }
}

fn respond(
    ctx: &ApiContext,
    request: &ExamRequest,
    document: Option<&ExtractedDocument>,
) -> AnalyzeResponse {
    let analysis = run_analysis(&ctx.tables, request);

    tracing::debug!(
        detected = analysis.detected.len(),
        tests = analysis.tests.len(),
        pre_placement = request.toggles.pre_placement,
        vibration = request.toggles.vibration,
        outdoor = request.toggles.outdoor,
        has_document = document.is_some(),
        "Analysis complete"
    );

    AnalyzeResponse {
        tables_version: ctx.tables.version.clone(),
        view: ResultView::new(request, analysis),
        document: document.map(DocumentSummary::from),
    }
}

/// Form checkboxes and toggles arrive as text.
pub fn parse_toggle(field: &str, value: &str) -> Result<bool, ApiError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Ok(true),
        "false" | "off" | "0" | "no" | "" => Ok(false),
        _ => Err(ApiError::BadRequest(format!(
            "Field '{field}' must be a boolean"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_toggle_accepts_form_values() {
        for v in ["true", "on", "1", "yes", " TRUE "] {
            assert!(parse_toggle("vibration", v).unwrap(), "{v}");
        }
        for v in ["false", "off", "0", "no", ""] {
            assert!(!parse_toggle("vibration", v).unwrap(), "{v}");
        }
    }

    #[test]
    fn parse_toggle_rejects_garbage() {
        let err = parse_toggle("outdoor", "maybe").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m.contains("outdoor")));
    }
}
