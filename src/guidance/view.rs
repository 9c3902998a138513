//! Two-panel result view: detected factors on one side, recommended tests on
//! the other. Layout-free; the API serialises it and the CLI renders it as
//! plain text.

use std::fmt::Write as _;

use serde::Serialize;

use super::types::{Analysis, ExamRequest};

pub const FACTOR_PANEL_TITLE: &str = "분석된 유해인자";
pub const FACTOR_PANEL_BADGE: &str = "직종/물질";
pub const TEST_PANEL_TITLE: &str = "권장 검사항목";
pub const TEST_PANEL_BADGE: &str = "별표24 기준";

const FACTOR_PLACEHOLDER: &str = "분석할 데이터를 입력하세요.";
const TEST_PLACEHOLDER: &str = "표시할 항목이 없습니다.";
/// Shown instead of a factor list when input was given but nothing matched.
const MANUAL_DATA_LABEL: &str = "수기 데이터";
const FACTOR_FOOTNOTE: &str = "※ 해당 직종의 주요 노출 인자를 바탕으로 구성되었습니다.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactorPanel {
    pub detected: Vec<String>,
    /// Summary line, or the placeholder when there was no input.
    pub message: String,
    pub footnote: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestPanel {
    /// Sorted recommended tests. Always populated, even without input.
    pub items: Vec<String>,
    pub placeholder: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub input_provided: bool,
    pub factors: FactorPanel,
    pub tests: TestPanel,
}

impl ResultView {
    pub fn new(request: &ExamRequest, analysis: Analysis) -> Self {
        let input_provided = request.has_input();
        let Analysis { tests, detected } = analysis;

        let factors = if input_provided {
            let summary = if detected.is_empty() {
                MANUAL_DATA_LABEL.to_string()
            } else {
                detected.join(", ")
            };
            FactorPanel {
                message: format!("분석 결과: {summary}"),
                detected,
                footnote: Some(FACTOR_FOOTNOTE),
            }
        } else {
            FactorPanel {
                detected,
                message: FACTOR_PLACEHOLDER.to_string(),
                footnote: None,
            }
        };

        let items: Vec<String> = tests.into_iter().collect();
        let placeholder = (!input_provided || items.is_empty()).then_some(TEST_PLACEHOLDER);

        Self {
            input_provided,
            factors,
            tests: TestPanel { items, placeholder },
        }
    }

    /// Plain-text rendering of both panels.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "[{FACTOR_PANEL_TITLE} | {FACTOR_PANEL_BADGE}]");
        let _ = writeln!(out, "{}", self.factors.message);
        if let Some(note) = self.factors.footnote {
            let _ = writeln!(out, "{note}");
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "[{TEST_PANEL_TITLE} | {TEST_PANEL_BADGE}]");
        match self.tests.placeholder {
            Some(placeholder) => {
                let _ = writeln!(out, "{placeholder}");
            }
            None => {
                for item in &self.tests.items {
                    let _ = writeln!(out, "✅ {item}");
                }
            }
        }

        out
    }
}
