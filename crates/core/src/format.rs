//! Format interpretations: turning a candidate span into a calendar date.
//!
//! Each interpretation is an anchored shape (e.g. `dd/MM/yyyy`). A candidate
//! is tried against the catalog in order and the first shape that matches
//! exactly *and* names a real calendar day wins. Nothing is coerced: a month
//! of 13, a 30th of February or a weekday that disagrees with the date all
//! reject the interpretation.

use chrono::{Datelike, NaiveDate, Weekday};
use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::config::DEFAULT_PIVOT_LOOKAHEAD;
use crate::types::ParsedDate;

/// The 100-year window two-digit years are resolved into.
///
/// The window ends at the pivot year (inclusive), so with a pivot of 2040 the
/// two-digit year `41` means 1941 and `40` means 2040.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CenturyWindow {
    pivot: i32,
}

impl CenturyWindow {
    /// Window whose pivot sits `lookahead` years after the reference date.
    #[must_use]
    pub fn new(reference: NaiveDate, lookahead: i32) -> Self {
        Self {
            pivot: reference.year() + lookahead,
        }
    }

    #[must_use]
    pub fn pivot(&self) -> i32 {
        self.pivot
    }

    /// Resolve a two-digit year to the year in `[pivot - 99, pivot]` with the
    /// same last two digits.
    #[must_use]
    pub fn resolve(&self, two_digit: u32) -> i32 {
        let last_two = (two_digit % 100) as i32;
        self.pivot - (self.pivot - last_two).rem_euclid(100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YearDigits {
    Four,
    Two,
}

/// A successful interpretation of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interpretation {
    pub date: ParsedDate,
    /// Id of the format that matched (e.g. `dd/MM/yyyy`).
    pub format: &'static str,
}

/// (four-digit id, two-digit id, shape). `{YEAR}` is filled per year width.
type FormatTemplate = (&'static str, &'static str, &'static str);

// Month names and abbreviations share one shape; the name is checked against
// the month table after matching.
const TEXTUAL: &[FormatTemplate] = &[
    (
        "dd MMMM yyyy",
        "dd MMMM yy",
        r"(?P<day>\d{1,2}),?\s+(?P<month>\p{L}+)\.?,?\s+{YEAR}",
    ),
    (
        "MMMM dd, yyyy",
        "MMMM dd, yy",
        r"(?P<month>\p{L}+)\.?\s+(?P<day>\d{1,2}),?\s+{YEAR}",
    ),
    (
        "dd-MMM-yyyy",
        "dd-MMM-yy",
        r"(?P<day>\d{1,2})-(?P<month>\p{L}+)-{YEAR}",
    ),
    (
        "MMM-dd-yyyy",
        "MMM-dd-yy",
        r"(?P<month>\p{L}+)-(?P<day>\d{1,2})-{YEAR}",
    ),
];

const NUMERIC: &[FormatTemplate] = &[
    ("dd/MM/yyyy", "dd/MM/yy", r"(?P<day>\d{1,2})/(?P<month>\d{1,2})/{YEAR}"),
    ("MM/dd/yyyy", "MM/dd/yy", r"(?P<month>\d{1,2})/(?P<day>\d{1,2})/{YEAR}"),
    ("dd-MM-yyyy", "dd-MM-yy", r"(?P<day>\d{1,2})-(?P<month>\d{1,2})-{YEAR}"),
    ("MM-dd-yyyy", "MM-dd-yy", r"(?P<month>\d{1,2})-(?P<day>\d{1,2})-{YEAR}"),
    ("yyyy-MM-dd", "yy-MM-dd", r"{YEAR}-(?P<month>\d{1,2})-(?P<day>\d{1,2})"),
    ("dd.MM.yyyy", "dd.MM.yy", r"(?P<day>\d{1,2})\.(?P<month>\d{1,2})\.{YEAR}"),
    ("MM.dd.yyyy", "MM.dd.yy", r"(?P<month>\d{1,2})\.(?P<day>\d{1,2})\.{YEAR}"),
    ("yyyy/MM/dd", "yy/MM/dd", r"{YEAR}/(?P<month>\d{1,2})/(?P<day>\d{1,2})"),
    ("yyyy.MM.dd", "yy.MM.dd", r"{YEAR}\.(?P<month>\d{1,2})\.(?P<day>\d{1,2})"),
];

const WEEKDAY: &[FormatTemplate] = &[
    (
        "EEEE, MMMM dd, yyyy",
        "EEEE, MMMM dd, yy",
        r"(?P<weekday>\p{L}+)\.?(?:,\s*|\s+)(?P<month>\p{L}+)\.?\s+(?P<day>\d{1,2}),?\s+{YEAR}",
    ),
    (
        "EEEE, dd MMMM yyyy",
        "EEEE, dd MMMM yy",
        r"(?P<weekday>\p{L}+)\.?(?:,\s*|\s+)(?P<day>\d{1,2}),?\s+(?P<month>\p{L}+)\.?,?\s+{YEAR}",
    ),
];

struct DateFormat {
    id: &'static str,
    year: YearDigits,
    regex: Regex,
}

impl DateFormat {
    fn compile(template: &FormatTemplate, year: YearDigits) -> Self {
        let (long_id, short_id, shape) = *template;
        let (id, year_shape) = match year {
            YearDigits::Four => (long_id, r"(?P<year>\d{4})"),
            YearDigits::Two => (short_id, r"(?P<year>\d{2})"),
        };
        let source = format!("(?i)^{}$", shape.replace("{YEAR}", year_shape));
        Self {
            id,
            year,
            regex: Regex::new(&source).unwrap(),
        }
    }

    fn interpret(&self, text: &str, window: CenturyWindow) -> Option<ParsedDate> {
        let caps = self.regex.captures(text)?;

        let day: u32 = caps["day"].parse().ok()?;
        let month = month_value(&caps["month"])?;
        let year_digits: u32 = caps["year"].parse().ok()?;
        let year = match self.year {
            YearDigits::Four => i32::try_from(year_digits).ok()?,
            YearDigits::Two => window.resolve(year_digits),
        };

        let date = ParsedDate::from_ymd(year, month, day)?;
        check_weekday(&caps, date)?;
        Some(date)
    }
}

/// The catalog, most specific and most common shapes first.
fn formats() -> &'static [DateFormat] {
    static FORMATS: OnceLock<Vec<DateFormat>> = OnceLock::new();
    FORMATS.get_or_init(|| {
        let groups = [
            (TEXTUAL, YearDigits::Four),
            (NUMERIC, YearDigits::Four),
            (TEXTUAL, YearDigits::Two),
            (NUMERIC, YearDigits::Two),
            (WEEKDAY, YearDigits::Four),
            (WEEKDAY, YearDigits::Two),
        ];
        groups
            .iter()
            .flat_map(|(templates, year)| {
                templates
                    .iter()
                    .map(move |template| DateFormat::compile(template, *year))
            })
            .collect()
    })
}

/// Ids of all format interpretations, in the order they are tried.
#[must_use]
pub fn format_ids() -> Vec<&'static str> {
    formats().iter().map(|f| f.id).collect()
}

fn ordinal_suffix() -> &'static Regex {
    static ORDINAL: OnceLock<Regex> = OnceLock::new();
    ORDINAL.get_or_init(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").unwrap())
}

/// Strip ordinal suffixes from day numbers and drop standalone `of`.
fn denoise(candidate: &str) -> String {
    let text = ordinal_suffix().replace_all(candidate, "${1}");
    text.split_whitespace()
        .filter(|token| !token.eq_ignore_ascii_case("of"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Interpret a candidate, reporting which format matched.
#[must_use]
pub fn interpret(candidate: &str, window: CenturyWindow) -> Option<Interpretation> {
    let text = denoise(candidate);
    formats().iter().find_map(|format| {
        format.interpret(&text, window).map(|date| Interpretation {
            date,
            format: format.id,
        })
    })
}

/// Parse a candidate into a calendar date.
///
/// Two-digit years resolve into the window ending
/// [`DEFAULT_PIVOT_LOOKAHEAD`] years after `reference`. Returns `None` when no
/// format fits; that is an expected outcome, not an error.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use datefinder_core::parse;
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let date = parse("25 Jan 71", today).unwrap();
/// assert_eq!(date.year(), 1971);
///
/// assert!(parse("31/02/2024", today).is_none());
/// ```
#[must_use]
pub fn parse(candidate: &str, reference: NaiveDate) -> Option<ParsedDate> {
    let window = CenturyWindow::new(reference, DEFAULT_PIVOT_LOOKAHEAD);
    interpret(candidate, window).map(|found| found.date)
}

fn month_value(text: &str) -> Option<u32> {
    if text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse().ok();
    }
    month_from_name(text)
}

fn month_from_name(name: &str) -> Option<u32> {
    const MONTHS: [(&str, &str); 12] = [
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("may", "may"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    let lower = name.to_lowercase();
    if lower == "sept" {
        return Some(9);
    }
    MONTHS
        .iter()
        .position(|(abbr, full)| lower == *abbr || lower == *full)
        .map(|idx| idx as u32 + 1)
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name.to_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// A weekday prefix must name the weekday the date actually falls on.
fn check_weekday(caps: &Captures<'_>, date: ParsedDate) -> Option<()> {
    let Some(name) = caps.name("weekday") else {
        return Some(());
    };
    let weekday = weekday_from_name(name.as_str())?;
    (date.naive().weekday() == weekday).then_some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn ymd(text: &str) -> Option<(i32, u32, u32)> {
        parse(text, reference()).map(|d| (d.year(), d.month(), d.day()))
    }

    fn format_of(text: &str) -> Option<&'static str> {
        interpret(text, CenturyWindow::new(reference(), DEFAULT_PIVOT_LOOKAHEAD))
            .map(|found| found.format)
    }

    #[test]
    fn test_century_window_examples() {
        let window = CenturyWindow::new(reference(), 15);
        assert_eq!(window.pivot(), 2040);
        assert_eq!(window.resolve(71), 1971);
        assert_eq!(window.resolve(25), 2025);
        assert_eq!(window.resolve(40), 2040);
        assert_eq!(window.resolve(41), 1941);
        assert_eq!(window.resolve(0), 2000);
        assert_eq!(window.resolve(99), 1999);
    }

    #[test]
    fn test_century_window_bounds() {
        for lookahead in [0, 10, 15, 50] {
            let window = CenturyWindow::new(reference(), lookahead);
            for yy in 0..100 {
                let year = window.resolve(yy);
                assert!(year <= window.pivot() && year >= window.pivot() - 99);
                assert_eq!(year.rem_euclid(100), yy as i32);
            }
        }
    }

    #[test]
    fn test_century_window_ten_year_lookahead() {
        let window = CenturyWindow::new(reference(), 10);
        assert_eq!(window.pivot(), 2035);
        assert_eq!(window.resolve(35), 2035);
        assert_eq!(window.resolve(36), 1936);
    }

    #[test]
    fn test_two_digit_years_in_text() {
        assert_eq!(ymd("25 Jan 71"), Some((1971, 1, 25)));
        assert_eq!(ymd("25 Jan 25"), Some((2025, 1, 25)));
        assert_eq!(ymd("25 Jan 40"), Some((2040, 1, 25)));
    }

    #[test]
    fn test_reference_date_drives_the_window() {
        let old = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        assert_eq!(parse("25/01/10", old).map(|d| d.year()), Some(1910));
        assert_eq!(parse("25/01/05", old).map(|d| d.year()), Some(2005));
    }

    #[test]
    fn test_numeric_day_first_wins_when_ambiguous() {
        assert_eq!(ymd("01/02/2024"), Some((2024, 2, 1)));
        assert_eq!(format_of("01/02/2024"), Some("dd/MM/yyyy"));
    }

    #[test]
    fn test_numeric_falls_back_to_month_first() {
        assert_eq!(ymd("12/25/2024"), Some((2024, 12, 25)));
        assert_eq!(format_of("12/25/2024"), Some("MM/dd/yyyy"));
    }

    #[test]
    fn test_numeric_separators() {
        assert_eq!(ymd("21.03.2020"), Some((2020, 3, 21)));
        assert_eq!(ymd("21-03-2020"), Some((2020, 3, 21)));
        assert_eq!(ymd("21-03-20"), Some((2020, 3, 21)));
        assert_eq!(format_of("21.03.20"), Some("dd.MM.yy"));
    }

    #[test]
    fn test_mixed_separators_rejected() {
        assert_eq!(ymd("21/03-2020"), None);
        assert_eq!(ymd("2020/03-21"), None);
    }

    #[test]
    fn test_year_first() {
        assert_eq!(ymd("1971-01-25"), Some((1971, 1, 25)));
        assert_eq!(ymd("2024/03/05"), Some((2024, 3, 5)));
        assert_eq!(ymd("2020.12.31"), Some((2020, 12, 31)));
        assert_eq!(format_of("71-01-25"), Some("yy-MM-dd"));
        assert_eq!(ymd("71-01-25"), Some((1971, 1, 25)));
    }

    #[test]
    fn test_invalid_calendar_dates() {
        assert_eq!(ymd("31/02/2024"), None);
        assert_eq!(ymd("13/13/2024"), None);
        assert_eq!(ymd("32/01/2024"), None);
        assert_eq!(ymd("29/02/2023"), None);
        assert_eq!(ymd("30 February 2024"), None);
        assert_eq!(ymd("00/01/2024"), None);
        assert_eq!(ymd("01/01/0000"), None);
    }

    #[test]
    fn test_leap_day() {
        assert_eq!(ymd("29/02/2024"), Some((2024, 2, 29)));
        assert_eq!(ymd("Feb 29, 2000"), Some((2000, 2, 29)));
        assert_eq!(ymd("Feb 29, 1900"), None);
    }

    #[test]
    fn test_shape_must_be_exact() {
        assert_eq!(ymd("25/01/197"), None);
        assert_eq!(ymd("25/01/19711"), None);
        assert_eq!(ymd("25/01"), None);
        assert_eq!(ymd("25/01/1971 extra"), None);
        assert_eq!(ymd("123/01/1971"), None);
    }

    #[test]
    fn test_textual_months() {
        assert_eq!(ymd("25 January 1971"), Some((1971, 1, 25)));
        assert_eq!(ymd("January 25, 1971"), Some((1971, 1, 25)));
        assert_eq!(ymd("January 25 1971"), Some((1971, 1, 25)));
        assert_eq!(ymd("Jan. 25, 1971"), Some((1971, 1, 25)));
        assert_eq!(ymd("25 Jan. 1971"), Some((1971, 1, 25)));
        assert_eq!(ymd("Sept 5, 2020"), Some((2020, 9, 5)));
        assert_eq!(ymd("25-Jan-71"), Some((1971, 1, 25)));
        assert_eq!(ymd("Jan-25-1971"), Some((1971, 1, 25)));
        assert_eq!(ymd("25 JANUARY 1971"), Some((1971, 1, 25)));
    }

    #[test]
    fn test_unknown_month_names_rejected() {
        assert_eq!(ymd("25 Janu 1971"), None);
        assert_eq!(ymd("25 Smarch 1971"), None);
    }

    #[test]
    fn test_denoise_ordinals_and_of() {
        assert_eq!(denoise("25th of January 1971"), "25 January 1971");
        assert_eq!(denoise("March 1st, 2020"), "March 1, 2020");
        assert_eq!(denoise("2nd OF May 20"), "2 May 20");
        assert_eq!(denoise("125th of May"), "125th May");
        assert_eq!(ymd("25th of January 1971"), Some((1971, 1, 25)));
        assert_eq!(ymd("25 of January 1971"), Some((1971, 1, 25)));
        assert_eq!(ymd("March 1st, 2020"), Some((2020, 3, 1)));
    }

    #[test]
    fn test_weekday_prefixes() {
        // 25 January 1971 was a Monday.
        assert_eq!(ymd("Mon, Jan 25, 1971"), Some((1971, 1, 25)));
        assert_eq!(ymd("Monday, January 25, 1971"), Some((1971, 1, 25)));
        assert_eq!(ymd("Mon, 25 Jan 1971"), Some((1971, 1, 25)));
        assert_eq!(ymd("Monday 25th of January 71"), Some((1971, 1, 25)));
        assert_eq!(format_of("Mon, Jan 25, 1971"), Some("EEEE, MMMM dd, yyyy"));
        assert_eq!(format_of("Mon, 25 Jan 71"), Some("EEEE, dd MMMM yy"));
    }

    #[test]
    fn test_weekday_must_agree_with_date() {
        assert_eq!(ymd("Tue, Jan 25, 1971"), None);
        assert_eq!(ymd("Funday, Jan 25, 1971"), None);
    }

    #[test]
    fn test_four_digit_formats_tried_before_two_digit() {
        assert_eq!(format_of("25 Jan 1971"), Some("dd MMMM yyyy"));
        assert_eq!(format_of("25 Jan 71"), Some("dd MMMM yy"));
    }

    #[test]
    fn test_catalog_order() {
        let ids = format_ids();
        assert_eq!(ids.first(), Some(&"dd MMMM yyyy"));
        assert_eq!(ids.last(), Some(&"EEEE, dd MMMM yy"));
        assert_eq!(ids.len(), 2 * (TEXTUAL.len() + NUMERIC.len() + WEEKDAY.len()));
        let pos = |id: &str| ids.iter().position(|i| *i == id).unwrap();
        assert!(pos("dd/MM/yyyy") < pos("MM/dd/yyyy"));
        assert!(pos("yyyy.MM.dd") < pos("dd MMMM yy"));
        assert!(pos("dd.MM.yy") < pos("EEEE, MMMM dd, yyyy"));
    }

    #[test]
    fn test_garbage() {
        assert_eq!(ymd(""), None);
        assert_eq!(ymd("of"), None);
        assert_eq!(ymd("hello world"), None);
        assert_eq!(ymd("99999999999999999999/1/2024"), None);
    }
}
