//! Bangladeshi mobile phone number normalization.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A Bangladeshi mobile phone number in E.164 form (`+8801XXXXXXXXX`).
///
/// The backend and SMS gateways expect the international form, but customers
/// type numbers in whichever shape they are used to. Three input shapes are
/// accepted:
///
/// - Local: `01712345678` (11 digits, leading `01`)
/// - International without `+`: `8801712345678`
/// - Full E.164: `+8801712345678`
///
/// The operator prefix (digit after `01`) must be 3-9; anything else is not
/// a valid Bangladeshi mobile number.
///
/// ## Examples
///
/// ```
/// use padma_core::BdPhone;
///
/// assert_eq!(
///     BdPhone::normalize("01712345678").as_deref(),
///     Some("+8801712345678")
/// );
/// assert_eq!(
///     BdPhone::normalize("+8801712345678").as_deref(),
///     Some("+8801712345678")
/// );
/// assert_eq!(
///     BdPhone::normalize("8801712345678").as_deref(),
///     Some("+8801712345678")
/// );
/// assert!(BdPhone::normalize("12345").is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct BdPhone(String);

impl BdPhone {
    /// Parse a `BdPhone` from any of the accepted input shapes.
    ///
    /// Returns `None` when the input does not match any accepted shape.
    /// Surrounding whitespace is ignored.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();

        // Reduce all three accepted shapes to the 11-digit national form.
        let national = if let Some(rest) = input.strip_prefix("+880") {
            format!("0{rest}")
        } else if let Some(rest) = input.strip_prefix("880") {
            format!("0{rest}")
        } else if input.starts_with("01") {
            input.to_owned()
        } else {
            return None;
        };

        if national.len() != 11 || !national.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        // Operator prefix: 013-019 are assigned mobile ranges.
        match national.as_bytes().get(2) {
            Some(b'3'..=b'9') => {}
            _ => return None,
        }

        let rest = national.get(1..)?;
        Some(Self(format!("+880{rest}")))
    }

    /// Normalize an input string to E.164, returning the normalized string.
    ///
    /// Convenience wrapper over [`BdPhone::parse`] for call sites that only
    /// need the string form.
    #[must_use]
    pub fn normalize(input: &str) -> Option<String> {
        Self::parse(input).map(Self::into_inner)
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `BdPhone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for BdPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
