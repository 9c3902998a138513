use super::format::detect_format;
use super::sanitize::sanitize_extracted_text;
use super::types::{ExtractedDocument, PdfExtractor};

/// Extract matcher-ready text from an uploaded document.
///
/// Never fails. Unsupported formats and parse errors are logged and come
/// back as an empty document with a warning, so the analysis simply runs on
/// the query alone. Pages without a text layer are skipped.
pub fn extract_document(extractor: &dyn PdfExtractor, bytes: &[u8]) -> ExtractedDocument {
    let format = detect_format(bytes);
    if !format.is_supported() {
        tracing::warn!(
            size_bytes = bytes.len(),
            "Document extraction skipped: unsupported format"
        );
        return ExtractedDocument::failed("Unsupported document format (PDF expected)");
    }

    let pages = match extractor.extract_text(bytes) {
        Ok(pages) => pages,
        Err(e) => {
            tracing::warn!(error = %e, size_bytes = bytes.len(), "Document extraction failed");
            return ExtractedDocument::failed(e.to_string());
        }
    };

    let page_count = pages.len();
    let joined = pages
        .iter()
        .map(|p| p.text.as_str())
        .filter(|t| !t.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    let text = sanitize_extracted_text(&joined);

    let warning = text
        .is_empty()
        .then(|| "No text layer found; scanned documents are not read".to_string());

    tracing::info!(
        format = format.as_str(),
        pages = page_count,
        text_length = text.len(),
        "Document text extracted"
    );

    ExtractedDocument {
        text,
        page_count,
        warning,
    }
}
