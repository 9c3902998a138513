use std::collections::BTreeSet;

use super::tables::ExamTables;
use super::types::{Analysis, ExamRequest};

/// Match the request text against the job and agent tables and collect the
/// recommended tests.
///
/// Document text and query are joined with a space and lower-cased; every
/// keyword that occurs as a substring fires, regardless of overlap with other
/// keywords. Audiometry items collapse to the single band selected by the
/// pre-placement toggle. Pure and infallible.
pub fn analyze(tables: &ExamTables, request: &ExamRequest) -> Analysis {
    let content = format!(
        "{} {}",
        request.document_text.as_deref().unwrap_or_default(),
        request.query
    )
    .to_lowercase();

    let mut items: Vec<&str> = Vec::new();
    let mut detected: Vec<String> = Vec::new();

    for entry in tables.keyword_entries() {
        if content.contains(entry.keyword.as_str()) {
            push_unique(&mut detected, &entry.keyword);
            items.extend(entry.tests.iter().map(String::as_str));
        }
    }

    let toggles = request.toggles;
    if toggles.outdoor {
        push_unique(&mut detected, &tables.outdoor.marker);
        items.extend(tables.outdoor.tests.iter().map(String::as_str));
    }
    if toggles.vibration {
        push_unique(&mut detected, &tables.vibration.marker);
        items.extend(tables.vibration.tests.iter().map(String::as_str));
    }

    items.extend(tables.baseline.iter().map(String::as_str));

    let band = tables.audiometry_band(toggles.pre_placement);
    let tests: BTreeSet<String> = items
        .into_iter()
        .map(|item| if tables.is_audiometry(item) { band } else { item })
        .map(str::to_owned)
        .collect();

    Analysis { tests, detected }
}

fn push_unique(detected: &mut Vec<String>, keyword: &str) {
    if !detected.iter().any(|d| d == keyword) {
        detected.push(keyword.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidance::types::Toggles;

    fn tables() -> &'static ExamTables {
        ExamTables::bundled()
    }

    fn baseline() -> BTreeSet<String> {
        ["신장", "체중", "혈압(공통)"].iter().map(|s| s.to_string()).collect()
    }

    fn toggles(pre_placement: bool, vibration: bool, outdoor: bool) -> Toggles {
        Toggles {
            pre_placement,
            vibration,
            outdoor,
        }
    }

    fn band_a() -> &'static str {
        tables().audiometry_band(true)
    }

    fn band_b() -> &'static str {
        tables().audiometry_band(false)
    }

    #[test]
    fn empty_input_yields_baseline_only() {
        let req = ExamRequest::default().with_toggles(toggles(false, false, false));
        let result = analyze(tables(), &req);
        assert_eq!(result.tests, baseline());
        assert!(result.detected.is_empty());
    }

    #[test]
    fn empty_input_with_default_pre_placement_yields_baseline_only() {
        let result = analyze(tables(), &ExamRequest::default());
        assert_eq!(result.tests, baseline());
        assert!(result.detected.is_empty());
    }

    #[test]
    fn baseline_always_present() {
        let inputs = ["", "용접공", "벤젠 취급", "전혀 관계없는 문장", "야간 도장"];
        for query in inputs {
            for t in [toggles(true, true, true), toggles(false, false, false)] {
                let result = analyze(tables(), &ExamRequest::new(query).with_toggles(t));
                for item in baseline() {
                    assert!(result.contains_test(&item), "{item} missing for {query:?}");
                }
            }
        }
    }

    #[test]
    fn welder_pre_placement() {
        let result = analyze(tables(), &ExamRequest::new("용접공"));

        assert!(result.detected.contains(&"용접".to_string()));
        for item in [
            "신장",
            "체중",
            "혈압(공통)",
            "용접흄",
            "망간/니켈",
            "소음",
            "흉부X-ray",
            "LFT(간기능)",
            "심전도(ECG)",
        ] {
            assert!(result.contains_test(item), "missing {item}");
        }
        assert!(result.contains_test(band_a()));
        assert!(!result.contains_test(band_b()));
    }

    #[test]
    fn welder_periodic_uses_band_b() {
        let req = ExamRequest::new("용접공").with_toggles(toggles(false, false, false));
        let result = analyze(tables(), &req);
        assert!(result.contains_test(band_b()));
        assert!(!result.contains_test(band_a()));
    }

    #[test]
    fn raw_audiometry_item_never_emitted() {
        for pre in [true, false] {
            let req = ExamRequest::new("조적 철거 소음").with_toggles(toggles(pre, false, false));
            let result = analyze(tables(), &req);
            assert!(!result.contains_test("순음청력검사"));
            let audiometry: Vec<&str> = result
                .sorted_tests()
                .into_iter()
                .filter(|t| tables().is_audiometry(t))
                .collect();
            assert_eq!(audiometry, vec![tables().audiometry_band(pre)]);
        }
    }

    #[test]
    fn trade_suffix_still_matches() {
        let with_suffix = analyze(tables(), &ExamRequest::new("도장공"));
        let bare = analyze(tables(), &ExamRequest::new("도장"));
        assert_eq!(with_suffix, bare);
        assert_eq!(bare.detected, vec!["도장"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let upper = analyze(tables(), &ExamRequest::new("BENZENE"));
        let mixed = analyze(tables(), &ExamRequest::new("Benzene"));
        assert_eq!(upper, mixed);
        assert!(upper.detected.contains(&"benzene".to_string()));
        assert!(upper.contains_test("CBC정밀"));
    }

    #[test]
    fn cas_number_in_document_text_matches() {
        let req = ExamRequest::default().with_document_text("Composition: CAS No. 71-43-2 (90%)");
        let result = analyze(tables(), &req);
        assert_eq!(result.detected, vec!["71-43-2"]);
        assert!(result.contains_test("CBC정밀"));
    }

    #[test]
    fn document_and_query_both_contribute() {
        let req = ExamRequest::new("미장공").with_document_text("톨루엔 함유 접착제");
        let result = analyze(tables(), &req);
        assert!(result.detected.contains(&"미장".to_string()));
        assert!(result.detected.contains(&"톨루엔".to_string()));
        assert!(result.contains_test("시멘트분진"));
        assert!(result.contains_test("유기용제(톨루엔/자일렌)"));
    }

    #[test]
    fn keywords_do_not_match_across_document_query_boundary() {
        let req = ExamRequest::new("장").with_document_text("도");
        let result = analyze(tables(), &req);
        assert!(result.detected.is_empty());
    }

    #[test]
    fn overlapping_keywords_fire_independently() {
        // "철거" work also mentions "분진" which is an agent keyword
        let result = analyze(tables(), &ExamRequest::new("철거 현장 광물성분진"));
        assert!(result.detected.contains(&"철거".to_string()));
        assert!(result.detected.contains(&"분진".to_string()));
        assert_eq!(
            result.tests.iter().filter(|t| t.as_str() == "흉부X-ray").count(),
            1
        );
    }

    #[test]
    fn job_keywords_detected_before_agent_keywords() {
        let result = analyze(tables(), &ExamRequest::new("소음 심한 용접"));
        assert_eq!(result.detected, vec!["용접", "소음"]);
    }

    #[test]
    fn repeated_keyword_detected_once() {
        let result = analyze(tables(), &ExamRequest::new("도장 도장 도장"));
        assert_eq!(result.detected, vec!["도장"]);
    }

    #[test]
    fn vibration_adds_two_tests_and_marker() {
        for query in ["", "용접공", "벤젠"] {
            let off = analyze(tables(), &ExamRequest::new(query));
            let on = analyze(
                tables(),
                &ExamRequest::new(query).with_toggles(toggles(true, true, false)),
            );
            let added: Vec<&String> = on.tests.difference(&off.tests).collect();
            assert_eq!(added, vec!["악력검사", "통각검사"]);
            assert_eq!(on.detected.len(), off.detected.len() + 1);
            assert_eq!(on.detected.last().map(String::as_str), Some("진동작업"));
        }
    }

    #[test]
    fn outdoor_adds_one_test_and_marker() {
        let off = analyze(tables(), &ExamRequest::new("철근"));
        let on = analyze(
            tables(),
            &ExamRequest::new("철근").with_toggles(toggles(true, false, true)),
        );
        let added: Vec<&String> = on.tests.difference(&off.tests).collect();
        assert_eq!(added, vec!["시력검사(자외선)"]);
        assert_eq!(on.detected, vec!["철근", "실외작업"]);
    }

    #[test]
    fn toggles_only_without_text() {
        let req = ExamRequest::default().with_toggles(toggles(true, true, true));
        let result = analyze(tables(), &req);
        assert_eq!(result.detected, vec!["실외작업", "진동작업"]);
        assert_eq!(result.tests.len(), 6);
    }

    #[test]
    fn analysis_is_idempotent() {
        let req = ExamRequest::new("야간 방수 작업")
            .with_document_text("xylene 1330-20-7")
            .with_toggles(toggles(false, true, true));
        let first = analyze(tables(), &req);
        let second = analyze(tables(), &req);
        assert_eq!(first, second);
        assert_eq!(first.sorted_tests(), second.sorted_tests());
    }

    #[test]
    fn tests_are_sorted_by_code_point() {
        let result = analyze(tables(), &ExamRequest::new("도장 용접 야간"));
        let sorted = result.sorted_tests();
        let mut expected = sorted.clone();
        expected.sort_unstable();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn keyword_in_both_tables_fires_once_in_detected() {
        let mut custom = tables().clone();
        custom.jobs.push(crate::guidance::KeywordEntry {
            keyword: "소음".into(),
            tests: vec!["귀마개 착용 확인".into()],
        });
        let result = analyze(&custom, &ExamRequest::new("소음"));
        assert_eq!(result.detected, vec!["소음"]);
        assert!(result.contains_test("귀마개 착용 확인"));
        assert!(result.contains_test(band_a()));
    }
}
