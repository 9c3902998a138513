/// Sanitize extracted text before it reaches the matcher.
/// Control characters become spaces, runs of whitespace collapse to one
/// space, lines are trimmed and blank lines dropped. Every other character
/// is kept as extracted so the matcher never sees two fragments glued into
/// one word.
pub fn sanitize_extracted_text(raw: &str) -> String {
    raw.lines()
        .map(|line| {
            line.split(|c: char| c.is_control() || c.is_whitespace())
                .filter(|word| !word.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_null_bytes() {
        let raw = "제품명: 신나\x00희석제";
        let clean = sanitize_extracted_text(raw);
        assert!(!clean.contains('\x00'));
        assert_eq!(clean, "제품명: 신나 희석제");
    }

    #[test]
    fn strips_control_characters() {
        let raw = "톨루엔\x01\x02\x03\n함유량: 30%";
        let clean = sanitize_extracted_text(raw);
        assert!(!clean.contains('\x01'));
        assert!(clean.contains("톨루엔"));
        assert!(clean.contains("함유량: 30%"));
    }

    #[test]
    fn preserves_cas_numbers() {
        let raw = "CAS No. 71-43-2 / 1330-20-7";
        assert_eq!(sanitize_extracted_text(raw), "CAS No. 71-43-2 / 1330-20-7");
    }

    #[test]
    fn preserves_exposure_limit_notation() {
        let raw = "TWA 0.5 ppm, 인화점 -11℃, 비중 0.88 (20°C)";
        let clean = sanitize_extracted_text(raw);
        assert!(clean.contains("-11℃"));
        assert!(clean.contains("(20°C)"));
    }

    #[test]
    fn collapses_blank_lines() {
        let raw = "1. 화학제품\n\n\n\n2. 유해성\n\n\n3. 구성성분";
        let clean = sanitize_extracted_text(raw);
        assert_eq!(clean, "1. 화학제품\n2. 유해성\n3. 구성성분");
    }

    #[test]
    fn trims_whitespace_per_line() {
        let raw = "  벤젠  \n  납  ";
        assert_eq!(sanitize_extracted_text(raw), "벤젠\n납");
    }

    #[test]
    fn keeps_symbols_between_syllables() {
        let raw = "■ 방●수 시트 ■ 전|기 배선";
        assert_eq!(sanitize_extracted_text(raw), "■ 방●수 시트 ■ 전|기 배선");
    }

    #[test]
    fn collapses_inner_whitespace() {
        assert_eq!(sanitize_extracted_text("톨루엔\t\t 30%\r\n"), "톨루엔 30%");
    }

    #[test]
    fn empty_input_returns_empty() {
        assert_eq!(sanitize_extracted_text(""), "");
    }

    #[test]
    fn only_control_chars_returns_empty() {
        assert_eq!(sanitize_extracted_text("\x00\x01\x02"), "");
    }
}
