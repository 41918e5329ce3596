//! Date-shaped pattern catalog and the matcher that scans text with it.
//!
//! The catalog is fixed and ordered. Matching yields every hit of every
//! pattern: catalog order first, then left to right within a pattern. The same
//! span may come out of several patterns; those duplicates are kept so later
//! stages can decide between them.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

use crate::types::Candidate;

/// Full and abbreviated English month names, as a regex alternation.
pub(crate) const MONTH_NAMES: &str = r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

const MONTH_ABBREVIATIONS: &str = r"jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec";

const WEEKDAY_NAMES: &str = r"mon(?:day)?|tue(?:sday)?|wed(?:nesday)?|thu(?:rsday)?|fri(?:day)?|sat(?:urday)?|sun(?:day)?";

/// Metadata about a pattern for help/documentation.
#[derive(Debug, Clone, Serialize)]
pub struct PatternInfo {
    /// Unique identifier (e.g., "numeric-dmy")
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Short description
    pub description: &'static str,
    /// Example spans this pattern finds
    pub examples: &'static [&'static str],
}

/// One entry of the pattern catalog.
///
/// `template` is a regex with placeholders for the shared building blocks
/// (`{DAY}`, `{MONTH}`, `{MONTH_NAME}`, `{MON}`, `{YEAR}`, `{ORD}`,
/// `{WEEKDAY}`), expanded once when the catalog is compiled.
#[derive(Debug)]
pub struct DatePattern {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub examples: &'static [&'static str],
    template: &'static str,
}

impl DatePattern {
    #[must_use]
    pub fn info(&self) -> PatternInfo {
        PatternInfo {
            id: self.id,
            name: self.name,
            description: self.description,
            examples: self.examples,
        }
    }

    fn expand(&self) -> String {
        let body = self
            .template
            .replace("{DAY}", r"(0?[1-9]|[12]\d|3[01])")
            .replace("{MONTH}", r"(0?[1-9]|1[0-2])")
            .replace("{MONTH_NAME}", &format!("({MONTH_NAMES})"))
            .replace("{MON}", &format!("({MONTH_ABBREVIATIONS})"))
            .replace("{YEAR}", r"(\d{4}|\d{2})")
            .replace("{ORD}", r"(?:st|nd|rd|th)?")
            .replace("{WEEKDAY}", &format!("(?:{WEEKDAY_NAMES})"));
        format!(r"(?i)\b{body}\b")
    }
}

/// The catalog, in scan order.
pub const PATTERNS: &[DatePattern] = &[
    DatePattern {
        id: "numeric-dmy",
        name: "Numeric day-first",
        description: "DD/MM/YY(YY) with /, - or . separators",
        examples: &["25/01/1971", "25-01-71", "21.03.2020"],
        template: r"{DAY}[/\-.]{MONTH}[/\-.]{YEAR}",
    },
    DatePattern {
        id: "numeric-mdy",
        name: "Numeric month-first",
        description: "MM/DD/YY(YY) with /, - or . separators",
        examples: &["01/25/1971", "12-31-99"],
        template: r"{MONTH}[/\-.]{DAY}[/\-.]{YEAR}",
    },
    DatePattern {
        id: "numeric-ymd",
        name: "ISO-like year-first",
        description: "YYYY-MM-DD, YYYY/MM/DD or YYYY.MM.DD",
        examples: &["1971-01-25", "2024/03/05", "2020.12.31"],
        template: r"(\d{4})[/\-.]{MONTH}[/\-.]{DAY}",
    },
    DatePattern {
        id: "numeric-short-ymd",
        name: "Short year-first",
        description: "YY-MM-DD",
        examples: &["71-01-25"],
        template: r"(\d{2})-{MONTH}-{DAY}",
    },
    DatePattern {
        id: "month-day-year",
        name: "Month day, year",
        description: "Full or abbreviated month, then day and year",
        examples: &["January 25, 1971", "Jan. 25th 1971", "Sept 5, 20"],
        template: r"{MONTH_NAME}\.?\s+{DAY}{ORD},?\s+{YEAR}",
    },
    DatePattern {
        id: "day-month-year",
        name: "Day month year",
        description: "Day, optional 'of', full or abbreviated month, year",
        examples: &["25 January 1971", "25th of Jan. 71", "3, March 2020"],
        template: r"{DAY}{ORD},?(?:\s+of)?\s+{MONTH_NAME}\.?,?\s+{YEAR}",
    },
    DatePattern {
        id: "day-mon-year",
        name: "Day-Mon-Year",
        description: "Hyphen or space joined abbreviated month",
        examples: &["25-Jan-71", "25 Jan 1971"],
        template: r"{DAY}[\- ]{MON}[\- ]{YEAR}",
    },
    DatePattern {
        id: "weekday-month-day-year",
        name: "Weekday, month day, year",
        description: "Day-of-week name before a month-first date",
        examples: &["Mon, Jan 25, 1971", "Monday, January 25, 1971"],
        template: r"{WEEKDAY}\.?(?:,\s*|\s+){MONTH_NAME}\.?\s+{DAY}{ORD},?\s+{YEAR}",
    },
    DatePattern {
        id: "weekday-day-month-year",
        name: "Weekday, day month year",
        description: "Day-of-week name before a day-first date",
        examples: &["Mon, 25 Jan 1971", "Monday 25th of January 1971"],
        template: r"{WEEKDAY}\.?(?:,\s*|\s+){DAY}{ORD},?(?:\s+of)?\s+{MONTH_NAME}\.?,?\s+{YEAR}",
    },
];

struct CompiledPattern {
    pattern: &'static DatePattern,
    regex: Regex,
}

fn compiled() -> &'static [CompiledPattern] {
    static COMPILED: OnceLock<Vec<CompiledPattern>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        PATTERNS
            .iter()
            .map(|pattern| CompiledPattern {
                pattern,
                regex: Regex::new(&pattern.expand()).unwrap(),
            })
            .collect()
    })
}

/// Scan normalized text for date-shaped spans.
///
/// The returned iterator is lazy and finite. Calling this again on the same
/// text yields the same sequence.
///
/// # Examples
///
/// ```
/// use datefinder_core::match_candidates;
///
/// let found: Vec<_> = match_candidates("paid 01/02/2024")
///     .map(|c| (c.pattern, c.text))
///     .collect();
/// assert_eq!(
///     found,
///     [("numeric-dmy", "01/02/2024"), ("numeric-mdy", "01/02/2024")]
/// );
/// ```
pub fn match_candidates(text: &str) -> impl Iterator<Item = Candidate<'_>> + '_ {
    compiled().iter().flat_map(move |compiled| {
        let id = compiled.pattern.id;
        compiled.regex.find_iter(text).map(move |m| Candidate {
            text: m.as_str(),
            pattern: id,
        })
    })
}
