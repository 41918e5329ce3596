//! Finder configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of years past the reference year that a two-digit year may
/// still land in.
pub const DEFAULT_PIVOT_LOOKAHEAD: i32 = 15;

/// Tunables for a [`DateFinder`](crate::DateFinder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Years added to the reference year to get the pivot year. Two-digit years
    /// resolve into the 100-year window ending at the pivot.
    pub pivot_lookahead: i32,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            pivot_lookahead: DEFAULT_PIVOT_LOOKAHEAD,
        }
    }
}

impl FinderConfig {
    /// Check that the config describes a usable century window.
    pub fn validate(&self) -> Result<()> {
        if !(0..=99).contains(&self.pivot_lookahead) {
            return Err(Error::InvalidPivotLookahead(self.pivot_lookahead));
        }
        Ok(())
    }

    /// Whether any value differs from the defaults.
    #[must_use]
    pub fn is_customized(&self) -> bool {
        *self != Self::default()
    }
}

/// Parse a `YYYY-MM-DD` reference date.
pub fn parse_reference_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidReferenceDate(input.to_string()))
}
