//! CIK normalization.
//!
//! EDGAR addresses filers by a Central Index Key. The submissions API wants the
//! key zero-padded to ten digits, while archive document paths use the plain
//! integer and accession numbers without their dashes.

use crate::error::{EdgarError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Width of a canonical CIK.
pub const CIK_WIDTH: usize = 10;

/// Largest CIK that fits in [`CIK_WIDTH`] digits.
pub const MAX_CIK: i64 = 9_999_999_999;

/// A CIK in the registry's canonical form: exactly ten ASCII digits.
///
/// Stripping the leading zeros gives back the original integer, see
/// [`NormalizedIdentifier::as_integer`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedIdentifier(String);

impl NormalizedIdentifier {
    /// The ten-digit string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier as a plain integer, leading zeros dropped.
    ///
    /// # Example
    /// ```
    /// # use edgarlink::identifier::to_canonical_form;
    /// let cik = to_canonical_form(320193).unwrap();
    /// assert_eq!(cik.as_integer(), 320193);
    /// ```
    pub fn as_integer(&self) -> u64 {
        self.0
            .bytes()
            .fold(0, |acc, digit| acc * 10 + u64::from(digit - b'0'))
    }
}

impl fmt::Display for NormalizedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NormalizedIdentifier {
    type Err = EdgarError;

    /// Accepts padded or unpadded decimal CIKs.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
            return Err(EdgarError::Parse(format!("Invalid CIK: '{}'", s)));
        }
        let identifier: i64 = trimmed
            .parse()
            .map_err(|_| EdgarError::Parse(format!("Invalid CIK: '{}'", s)))?;
        to_canonical_form(identifier)
    }
}

/// Render a CIK in the registry's canonical ten-digit form.
///
/// # Errors
/// Returns [`EdgarError::InvalidIdentifier`] if `identifier` is negative or has
/// more than ten digits. Oversized keys are rejected, never truncated.
///
/// # Example
/// ```
/// # use edgarlink::identifier::to_canonical_form;
/// assert_eq!(to_canonical_form(320193).unwrap().as_str(), "0000320193");
/// ```
pub fn to_canonical_form(identifier: i64) -> Result<NormalizedIdentifier> {
    if !(0..=MAX_CIK).contains(&identifier) {
        return Err(EdgarError::InvalidIdentifier(identifier));
    }
    Ok(NormalizedIdentifier(format!(
        "{:0>width$}",
        identifier,
        width = CIK_WIDTH
    )))
}

/// Remove every `'-'` from an accession number.
///
/// # Example
/// ```
/// # use edgarlink::identifier::strip_separators;
/// assert_eq!(strip_separators("0000320193-23-000077"), "000032019323000077");
/// ```
pub fn strip_separators(accession: &str) -> String {
    accession.replace('-', "")
}
