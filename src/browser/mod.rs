//! Browser identifiers
//!
//! A browser is written as `"family version"` (e.g. `"chrome 56"`,
//! `"firefox esr"`). The family is the grouping key, the version is either
//! an integer or an opaque token such as a release channel name.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors produced while parsing a `"family version"` string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrowserIdError {
    #[error("'{0}' is missing a version (expected \"family version\")")]
    MissingVersion(String),
    #[error("'{0}' has an empty family or version")]
    Empty(String),
}

/// A single browser: family key plus raw version string
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BrowserId {
    /// Family key as used by the dataset (e.g. `chrome`, `ios_saf`)
    pub family: String,
    /// Version exactly as written by the resolver
    pub version: String,
}

/// Classified form of a raw version string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionKind<'a> {
    /// Parses losslessly to an integer
    Numeric(i64),
    /// Anything else (`ESR`, `TP`, `15.2-15.3`, `05`)
    Raw(&'a str),
}

impl BrowserId {
    /// Create a browser id from its parts
    pub fn new(family: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            version: version.into(),
        }
    }

    /// Parse `"family version"`, splitting on the first space
    pub fn parse(input: &str) -> Result<Self, BrowserIdError> {
        let (family, version) = input
            .split_once(' ')
            .ok_or_else(|| BrowserIdError::MissingVersion(input.to_string()))?;

        if family.is_empty() || version.is_empty() {
            return Err(BrowserIdError::Empty(input.to_string()));
        }

        Ok(Self::new(family, version))
    }

    /// Numeric or raw classification of the version
    pub fn version_kind(&self) -> VersionKind<'_> {
        classify_version(&self.version)
    }
}

/// Classify a version string.
///
/// A version is numeric only if it parses as an integer and formatting the
/// integer reproduces the input byte for byte, so `"05"` and `"+5"` are raw.
pub fn classify_version(raw: &str) -> VersionKind<'_> {
    match raw.parse::<i64>() {
        Ok(n) if n.to_string() == raw => VersionKind::Numeric(n),
        _ => VersionKind::Raw(raw),
    }
}

impl fmt::Display for BrowserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.version)
    }
}

impl std::str::FromStr for BrowserId {
    type Err = BrowserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse a whole list, failing on the first malformed entry
pub fn parse_all<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<BrowserId>, BrowserIdError> {
    inputs.iter().map(|s| BrowserId::parse(s.as_ref())).collect()
}
