//! Per-form-type filing selection.
//!
//! Output is grouped by form type in the configured order, most recent first
//! within each group. There is no global date sort across groups.

use crate::config::SelectionConfig;
use crate::edgar::{RawFilingEntry, SelectedFiling};
use tracing::debug;

/// Keep the most recent `per_category_limit` filings of each form type.
///
/// Matching is exact and case-sensitive, so `"10-K/A"` is not a `"10-K"`.
/// Entries of any other form type are dropped. Filings with the same date
/// keep their input order. A label repeated in `categories` only produces one
/// group.
///
/// # Example
/// ```
/// # use edgarlink::edgar::RawFilingEntry;
/// # use edgarlink::selector::select_top_filings;
/// # use chrono::NaiveDate;
/// let entry = |form: &str, y, m, d| RawFilingEntry {
///     form: form.to_string(),
///     filing_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
///     accession_number: String::new(),
///     primary_document: String::new(),
/// };
/// let entries = [
///     entry("10-K", 2023, 1, 1),
///     entry("10-K", 2024, 1, 1),
///     entry("8-K", 2023, 6, 1),
/// ];
/// let selected = select_top_filings(&entries, &["10-K", "8-K"], 1);
/// assert_eq!(selected.len(), 2);
/// assert_eq!(selected[0].filing_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
/// assert_eq!(selected[1].form, "8-K");
/// ```
pub fn select_top_filings<S: AsRef<str>>(
    entries: &[RawFilingEntry],
    categories: &[S],
    per_category_limit: usize,
) -> Vec<SelectedFiling> {
    let mut selected = Vec::new();
    let mut seen: Vec<&str> = Vec::with_capacity(categories.len());

    for category in categories {
        let category: &str = category.as_ref();
        if seen.contains(&category) {
            continue;
        }
        seen.push(category);

        let mut subset: Vec<&RawFilingEntry> =
            entries.iter().filter(|e| e.form == category).collect();
        // sort_by is stable: same-day filings stay in registry order.
        subset.sort_by(|a, b| b.filing_date.cmp(&a.filing_date));

        let before = selected.len();
        selected.extend(
            subset
                .into_iter()
                .take(per_category_limit)
                .cloned()
                .map(SelectedFiling::from),
        );
        debug!(category, kept = selected.len() - before, "selected filings");
    }

    selected
}

impl SelectionConfig {
    /// Apply this selection to a filing history.
    pub fn select(&self, entries: &[RawFilingEntry]) -> Vec<SelectedFiling> {
        select_top_filings(entries, self.categories.as_slice(), self.per_category_limit)
    }
}
