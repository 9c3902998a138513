use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Per-request exam toggles. Passed explicitly into the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toggles {
    /// Pre-placement (배치전) exam. Selects the audiometry frequency band.
    pub pre_placement: bool,
    /// Vibration exposure (진동작업).
    pub vibration: bool,
    /// Outdoor / UV exposure (실외작업).
    pub outdoor: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            pre_placement: true,
            vibration: false,
            outdoor: false,
        }
    }
}

/// Inputs of a single evaluation. Exists only for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRequest {
    #[serde(default)]
    pub query: String,
    /// Text extracted from an uploaded safety data sheet, if any.
    #[serde(default)]
    pub document_text: Option<String>,
    #[serde(flatten)]
    pub toggles: Toggles,
}

impl ExamRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_document_text(mut self, text: impl Into<String>) -> Self {
        self.document_text = Some(text.into());
        self
    }

    pub fn with_toggles(mut self, toggles: Toggles) -> Self {
        self.toggles = toggles;
        self
    }

    /// Whether the request carries anything to analyse beyond the defaults.
    ///
    /// Pre-placement alone does not count; it is on by default.
    pub fn has_input(&self) -> bool {
        !self.query.trim().is_empty()
            || self.document_text.is_some()
            || self.toggles.vibration
            || self.toggles.outdoor
    }
}

/// Matcher output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Recommended test items, deduplicated and sorted.
    pub tests: BTreeSet<String>,
    /// Keywords and toggle markers that fired, first-seen order, no repeats.
    pub detected: Vec<String>,
}

impl Analysis {
    pub fn contains_test(&self, item: &str) -> bool {
        self.tests.contains(item)
    }

    pub fn sorted_tests(&self) -> Vec<&str> {
        self.tests.iter().map(String::as_str).collect()
    }
}
