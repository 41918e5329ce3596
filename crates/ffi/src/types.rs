//! FFI-safe types for UniFFI export.
//!
//! These mirror the core types with plain fields UniFFI can carry: the date
//! is split into components and also given as an ISO string.

use datefinder_core::{DateMatch, Error};

#[derive(uniffi::Record, Debug, Clone, PartialEq, Eq)]
pub struct FfiDateMatch {
    /// Text of the date as it appears in the normalized input.
    pub text: String,
    /// ISO 8601 date (`YYYY-MM-DD`).
    pub iso_date: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Id of the pattern that found the span.
    pub pattern: String,
    /// Id of the format that parsed it.
    pub format: String,
}

impl From<DateMatch> for FfiDateMatch {
    fn from(m: DateMatch) -> Self {
        Self {
            iso_date: m.date.to_string(),
            year: m.date.year(),
            month: m.date.month(),
            day: m.date.day(),
            text: m.text,
            pattern: m.pattern,
            format: m.format,
        }
    }
}

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum FfiError {
    #[error("{0}")]
    InvalidReferenceDate(String),
    #[error("{0}")]
    InvalidConfig(String),
}

impl From<Error> for FfiError {
    fn from(e: Error) -> Self {
        match e {
            Error::InvalidReferenceDate(_) => Self::InvalidReferenceDate(e.to_string()),
            Error::InvalidPivotLookahead(_) => Self::InvalidConfig(e.to_string()),
        }
    }
}
