//! Choosing the most relevant date among parsed candidates.

use crate::types::DateMatch;

/// Pick the chronologically latest match.
///
/// Ties go to the match seen first, so the result only depends on scan order.
/// An empty input selects nothing.
pub fn select<I>(matches: I) -> Option<DateMatch>
where
    I: IntoIterator<Item = DateMatch>,
{
    matches
        .into_iter()
        .reduce(|best, next| if next.date > best.date { next } else { best })
}
