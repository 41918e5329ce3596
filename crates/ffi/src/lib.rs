//! UniFFI bindings for datefinder.
//!
//! This crate exposes date extraction via UniFFI for integration with Kotlin
//! (Android camera/OCR apps), Swift, Python, and other languages.

mod types;

pub use types::*;

use chrono::NaiveDate;
use datefinder_core::{parse_reference_date, DateFinder};
use std::sync::OnceLock;

uniffi::setup_scaffolding!();

static INSTANCE: OnceLock<DateFinder> = OnceLock::new();

fn get_instance() -> &'static DateFinder {
    INSTANCE.get_or_init(DateFinder::new)
}

/// Parse an optional `YYYY-MM-DD` reference date, defaulting to today.
fn reference(reference_date: Option<String>) -> Result<NaiveDate, FfiError> {
    match reference_date {
        Some(date) => Ok(parse_reference_date(&date)?),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

// =============================================================================
// Exported Functions
// =============================================================================

/// Get the library version string.
#[uniffi::export]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get information about all date patterns as JSON.
///
/// Using JSON here since PatternInfo holds static str references which UniFFI
/// cannot handle.
#[uniffi::export]
pub fn list_patterns() -> String {
    let infos = get_instance().pattern_infos();
    serde_json::to_string(&infos).unwrap_or_else(|_| "[]".to_string())
}

/// Clean up raw OCR text the way the finder does before scanning.
#[uniffi::export]
pub fn normalize_text(text: String) -> String {
    datefinder_core::normalize(&text)
}

/// Find the most relevant date and return its text.
///
/// `reference_date` (`YYYY-MM-DD`) anchors two-digit years; `None` uses today.
/// Returns `None` when the text holds no valid date.
#[uniffi::export]
pub fn extract_most_relevant_date(
    text: String,
    reference_date: Option<String>,
) -> Result<Option<String>, FfiError> {
    let reference = reference(reference_date)?;
    Ok(get_instance().extract_most_relevant(&text, reference))
}

/// Find the most relevant date with its parsed components.
#[uniffi::export]
pub fn extract_best_date(
    text: String,
    reference_date: Option<String>,
) -> Result<Option<FfiDateMatch>, FfiError> {
    let reference = reference(reference_date)?;
    Ok(get_instance().extract_best(&text, reference).map(Into::into))
}

/// Find every distinct date in scan order.
#[uniffi::export]
pub fn extract_all_dates(
    text: String,
    reference_date: Option<String>,
) -> Result<Vec<FfiDateMatch>, FfiError> {
    let reference = reference(reference_date)?;
    let matches = get_instance().extract_all(&text, reference);
    Ok(matches.into_iter().map(Into::into).collect())
}
