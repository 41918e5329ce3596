//! OCR text cleanup.
//!
//! Turns raw recognizer output into a canonical form the date patterns can
//! scan: common misreads fixed, glued tokens split apart, stray symbols
//! blanked out and whitespace collapsed.
//!
//! The result only contains letters, digits, single spaces and `. , / - :`,
//! with no leading or trailing whitespace.

use regex::Regex;
use std::sync::OnceLock;

use crate::pattern::MONTH_NAMES;

fn rules() -> &'static CleanupRules {
    static RULES: OnceLock<CleanupRules> = OnceLock::new();
    RULES.get_or_init(CleanupRules::new)
}

struct CleanupRules {
    // "0f" misread for "of"
    zero_f: Regex,
    // "25thofJanuary"
    glued_of: Regex,
    // "25January", "25thMarch2020"
    digits_then_month: Regex,
    // "January1971"
    month_then_digits: Regex,
    // everything outside letters, digits, whitespace and date punctuation
    noise: Regex,
    whitespace: Regex,
}

impl CleanupRules {
    fn new() -> Self {
        Self {
            zero_f: Regex::new(r"(?i)0f").unwrap(),
            glued_of: Regex::new(r"(\d)((?i:st|nd|rd|th)?)(?i:of)(\p{Lu})").unwrap(),
            digits_then_month: Regex::new(&format!(
                r"(?i)(\d)((?:st|nd|rd|th)?)({MONTH_NAMES})(\b|\d)"
            ))
            .unwrap(),
            month_then_digits: Regex::new(&format!(r"(?i)\b({MONTH_NAMES})(\d)")).unwrap(),
            noise: Regex::new(r"[^\p{L}\p{N}\s.,/\-:]").unwrap(),
            whitespace: Regex::new(r"\s+").unwrap(),
        }
    }
}

/// Normalize raw OCR text.
///
/// Never fails; the empty string normalizes to the empty string.
///
/// # Examples
///
/// ```
/// use datefinder_core::normalize;
///
/// assert_eq!(normalize("25thofJanuary1971"), "25th of January 1971");
/// assert_eq!(normalize("  Due:\t15/06/2021 ** "), "Due: 15/06/2021");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    let rules = rules();

    let text = rules.zero_f.replace_all(raw, "of");
    let text = text.replace('@', "a");
    let text = rules.glued_of.replace_all(&text, "${1}${2} of ${3}");
    let text = rules.digits_then_month.replace_all(&text, "${1}${2} ${3}${4}");
    let text = rules.month_then_digits.replace_all(&text, "${1} ${2}");
    // Replace rather than delete so unrelated tokens never merge.
    let text = rules.noise.replace_all(&text, " ");
    let text = rules.whitespace.replace_all(&text, " ");

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t "), "");
    }

    #[test]
    fn test_zero_f_misread() {
        assert_eq!(normalize("25 0f January 1971"), "25 of January 1971");
        assert_eq!(normalize("25 0F January 1971"), "25 of January 1971");
    }

    #[test]
    fn test_at_sign() {
        assert_eq!(normalize("M@y 5 2020"), "May 5 2020");
    }

    #[test]
    fn test_glued_ordinal_and_of() {
        assert_eq!(normalize("25thofJanuary 1971"), "25th of January 1971");
        assert_eq!(normalize("1stofMarch 2020"), "1st of March 2020");
        assert_eq!(normalize("3ofMay 2020"), "3 of May 2020");
    }

    #[test]
    fn test_glued_of_requires_uppercase() {
        assert_eq!(normalize("25thofjanuary"), "25thofjanuary");
    }

    #[test]
    fn test_fully_glued_date() {
        assert_eq!(normalize("25thofJanuary1971"), "25th of January 1971");
    }

    #[test]
    fn test_month_glued_to_digits() {
        assert_eq!(normalize("Jan1971"), "Jan 1971");
        assert_eq!(normalize("25January 1971"), "25 January 1971");
        assert_eq!(normalize("25thMarch2020"), "25th March 2020");
    }

    #[test]
    fn test_noise_replaced_with_space() {
        assert_eq!(normalize("25*01*1971"), "25 01 1971");
        assert_eq!(normalize("Date:#15/06/2021!"), "Date: 15/06/2021");
        assert_eq!(normalize("a|b"), "a b");
    }

    #[test]
    fn test_date_punctuation_kept() {
        assert_eq!(
            normalize("Jan. 25, 1971 - 21.03.2020 10:30"),
            "Jan. 25, 1971 - 21.03.2020 10:30"
        );
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(normalize("\u{0}25/01/1971\u{7}"), "25/01/1971");
        assert_eq!(normalize("line one\r\nline two"), "line one line two");
    }

    #[test]
    fn test_unicode_letters_survive() {
        assert_eq!(normalize("Fälligkeit: 01.02.2024"), "Fälligkeit: 01.02.2024");
    }

    #[test]
    fn test_output_alphabet() {
        let inputs = [
            "€100 paid on 12/03/2022 (ref #77)",
            "«Mon, Jan 25, 1971»",
            "\u{feff}≈ 2024-01-05 ≈",
            "💡 tip @ 3pm",
        ];
        for input in inputs {
            let out = normalize(input);
            assert!(
                out.chars().all(|c| c.is_alphanumeric()
                    || c == ' '
                    || matches!(c, '.' | ',' | '/' | '-' | ':')),
                "unexpected character in {out:?}"
            );
            assert!(!out.contains("  "), "double space in {out:?}");
            assert_eq!(out, out.trim());
        }
    }
}
