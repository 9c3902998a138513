use serde::{Deserialize, Serialize};

/// Upload formats we can pull text from. Safety data sheets arrive as PDF.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Unsupported,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Unsupported => "unsupported",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

/// Detect format from magic bytes (NOT file names or declared content types).
pub fn detect_format(bytes: &[u8]) -> DocumentFormat {
    // Some generators emit a BOM or whitespace before the header
    let start = bytes
        .iter()
        .position(|b| !matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0xEF | 0xBB | 0xBF))
        .unwrap_or(bytes.len());

    if bytes[start..].starts_with(b"%PDF-") {
        DocumentFormat::Pdf
    } else {
        DocumentFormat::Unsupported
    }
}
