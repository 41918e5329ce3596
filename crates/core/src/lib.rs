//! Datefinder Core
//!
//! Finds the most relevant calendar date in noisy OCR text. Feed it whatever
//! the recognizer produced (misread characters, stray symbols, glued words)
//! and get back the exact text of the latest date it could make sense of.
//!
//! # Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use datefinder_core::DateFinder;
//!
//! let finder = DateFinder::new();
//! let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//!
//! let text = "Invoice: 01/01/2020. Due: 15/06/2021.";
//! assert_eq!(
//!     finder.extract_most_relevant(text, today).as_deref(),
//!     Some("15/06/2021")
//! );
//!
//! // Nothing date-like is not an error.
//! assert_eq!(finder.extract_most_relevant("", today), None);
//! ```
//!
//! # Pipeline
//!
//! 1. [`normalize`] cleans the raw text.
//! 2. [`match_candidates`] scans it with the pattern catalog ([`PATTERNS`]).
//! 3. [`parse`] strictly interprets each candidate as a calendar date.
//! 4. [`select`] keeps the latest, first one on ties.
//!
//! # All Matches
//!
//! ```
//! use chrono::NaiveDate;
//! use datefinder_core::DateFinder;
//!
//! let finder = DateFinder::new();
//! let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//!
//! let all = finder.extract_all("Issued 3 March 2020, paid 2020-03-05", today);
//! let dates: Vec<_> = all.iter().map(|m| m.date.to_string()).collect();
//! assert_eq!(dates, ["2020-03-05", "2020-03-03"]);
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod normalize;
pub mod pattern;
pub mod select;
pub mod types;

pub use config::{parse_reference_date, FinderConfig, DEFAULT_PIVOT_LOOKAHEAD};
pub use error::{Error, Result};
pub use format::{format_ids, interpret, parse, CenturyWindow, Interpretation};
pub use normalize::normalize;
pub use pattern::{match_candidates, DatePattern, PatternInfo, PATTERNS};
pub use select::select;
pub use types::*;

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, trace};

/// Main entry point - a configured date finder.
///
/// Holds no per-call state, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct DateFinder {
    config: FinderConfig,
}

impl DateFinder {
    /// Create a finder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a finder with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPivotLookahead`] when the lookahead does not fit
    /// in one century.
    ///
    /// # Examples
    ///
    /// ```
    /// use datefinder_core::{DateFinder, FinderConfig};
    ///
    /// let finder = DateFinder::with_config(FinderConfig { pivot_lookahead: 10 }).unwrap();
    /// assert_eq!(finder.config().pivot_lookahead, 10);
    ///
    /// assert!(DateFinder::with_config(FinderConfig { pivot_lookahead: 150 }).is_err());
    /// ```
    pub fn with_config(config: FinderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the current configuration.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    fn window(&self, reference: NaiveDate) -> CenturyWindow {
        CenturyWindow::new(reference, self.config.pivot_lookahead)
    }

    /// Candidates of `normalized` that parse, in scan order.
    fn scored<'a>(
        &self,
        normalized: &'a str,
        reference: NaiveDate,
    ) -> impl Iterator<Item = DateMatch> + 'a {
        let window = self.window(reference);
        match_candidates(normalized).filter_map(move |candidate| {
            match interpret(candidate.text, window) {
                Some(found) => {
                    trace!(
                        text = candidate.text,
                        pattern = candidate.pattern,
                        format = found.format,
                        date = %found.date,
                        "candidate parsed"
                    );
                    Some(DateMatch {
                        text: candidate.text.to_string(),
                        date: found.date,
                        pattern: candidate.pattern.to_string(),
                        format: found.format.to_string(),
                    })
                }
                None => {
                    trace!(
                        text = candidate.text,
                        pattern = candidate.pattern,
                        "candidate rejected"
                    );
                    None
                }
            }
        })
    }

    fn prepare(text: &str) -> String {
        debug!(raw = text, "extracting dates");
        let normalized = normalize(text);
        debug!(normalized = %normalized, "normalized text");
        normalized
    }

    /// The best match with its date and provenance.
    ///
    /// The latest date wins; among equal dates the first one in scan order.
    #[must_use]
    pub fn extract_best(&self, text: &str, reference: NaiveDate) -> Option<DateMatch> {
        let normalized = Self::prepare(text);
        let best = select(self.scored(&normalized, reference));
        match &best {
            Some(found) => debug!(text = %found.text, date = %found.date, "selected date"),
            None => debug!("no date detected"),
        }
        best
    }

    /// The text of the most relevant date, exactly as it appears in the
    /// normalized input.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use datefinder_core::DateFinder;
    ///
    /// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    /// let found = DateFinder::new().extract_most_relevant("25thofJanuary1971", today);
    /// assert_eq!(found.as_deref(), Some("25th of January 1971"));
    /// ```
    #[must_use]
    pub fn extract_most_relevant(&self, text: &str, reference: NaiveDate) -> Option<String> {
        self.extract_best(text, reference).map(|found| found.text)
    }

    /// Every date found, in scan order, each distinct text reported once.
    #[must_use]
    pub fn extract_all(&self, text: &str, reference: NaiveDate) -> Vec<DateMatch> {
        let normalized = Self::prepare(text);
        let mut seen = HashSet::new();
        let all: Vec<DateMatch> = self
            .scored(&normalized, reference)
            .filter(|found| seen.insert(found.text.clone()))
            .collect();
        debug!(count = all.len(), "dates found");
        all
    }

    /// Info about every pattern, in scan order.
    #[must_use]
    pub fn pattern_infos(&self) -> Vec<PatternInfo> {
        PATTERNS.iter().map(DatePattern::info).collect()
    }

    /// Ids of every format interpretation, in the order they are tried.
    #[must_use]
    pub fn format_ids(&self) -> Vec<&'static str> {
        format_ids()
    }
}

/// Most relevant date in `text` using the default configuration.
#[must_use]
pub fn extract_most_relevant_date(text: &str, reference: NaiveDate) -> Option<String> {
    DateFinder::new().extract_most_relevant(text, reference)
}

/// All dates in `text` using the default configuration.
#[must_use]
pub fn extract_all_dates(text: &str, reference: NaiveDate) -> Vec<DateMatch> {
    DateFinder::new().extract_all(text, reference)
}
