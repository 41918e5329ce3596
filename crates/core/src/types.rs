//! Core types for datefinder.
//!
//! These types carry a date through the pipeline: a [`Candidate`] span found in
//! normalized text, the [`ParsedDate`] it resolves to, and the [`DateMatch`]
//! pairing both that the selector ranks.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A substring of normalized text that matched a date-shaped pattern.
///
/// Not yet validated: the span looks like a date, but may still name a day that
/// does not exist (e.g. `31/02/2024`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// The matched text, borrowed from the normalized input.
    pub text: &'a str,
    /// Id of the pattern that produced this candidate.
    pub pattern: &'static str,
}

/// A validated calendar date.
///
/// Only produced by strict parsing, so the month is always 1-12 and the day
/// always exists in that month (leap years included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParsedDate(NaiveDate);

impl ParsedDate {
    /// Build a date from components, rejecting anything the calendar doesn't have.
    ///
    /// Year 0 is rejected as well: documents don't carry proleptic dates.
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        if year < 1 {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The underlying chrono date.
    #[must_use]
    pub fn naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for ParsedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// A candidate that parsed successfully, ready for selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateMatch {
    /// The exact text seen in the (normalized) document.
    pub text: String,
    /// The calendar date it denotes.
    pub date: ParsedDate,
    /// Id of the pattern that found the span.
    pub pattern: String,
    /// Id of the format interpretation that parsed it.
    pub format: String,
}
