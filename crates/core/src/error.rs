//! Error types for datefinder.
//!
//! Extraction itself never fails: a document without a date is an ordinary
//! outcome. These errors cover the fallible edges around it.

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A reference date string was not a valid `YYYY-MM-DD` date.
    #[error("invalid reference date '{0}' (expected YYYY-MM-DD)")]
    InvalidReferenceDate(String),

    /// The two-digit-year lookahead must leave the window inside one century.
    #[error("pivot lookahead {0} is out of range (expected 0..=99)")]
    InvalidPivotLookahead(i32),
}
