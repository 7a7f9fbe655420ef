//! Pay item codes.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::InputError;

/// `NNN-NNNNN` or `NNN-NNNNNN` in ASCII digits, hyphen optional, optional
/// letter suffix.
static CODE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([0-9]{3})-?([0-9]{5,6})([A-Z]?)$").ok());

/// A validated pay item code in canonical form (`401-10258`).
///
/// Input is trimmed and uppercased before validation, so comparisons are
/// case-insensitive. The hyphen-less form (`40110258`) is accepted and
/// normalised. Once built, a code is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PayItemCode(String);

impl PayItemCode {
    /// Validate and normalise a raw code.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let upper = raw.trim().to_ascii_uppercase();
        let invalid = || InputError::InvalidItemCode {
            raw: raw.to_string(),
        };
        let pattern = CODE_PATTERN.as_ref().ok_or_else(invalid)?;
        let caps = pattern.captures(&upper).ok_or_else(invalid)?;
        let prefix = &caps[1];
        let body = &caps[2];
        let suffix = caps.get(3).map_or("", |m| m.as_str());
        Ok(Self(format!("{prefix}-{body}{suffix}")))
    }

    /// The canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The three-digit section prefix (e.g. `401` for HMA items).
    pub fn section(&self) -> &str {
        &self.0[..3]
    }
}

impl fmt::Display for PayItemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PayItemCode {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PayItemCode {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PayItemCode> for String {
    fn from(code: PayItemCode) -> Self {
        code.0
    }
}

impl AsRef<str> for PayItemCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
