//! Support code parsing
//!
//! A support code is the string stored per browser version in the dataset,
//! e.g. `"y"`, `"a x #2"` or `"n d #1 #4"`. The first character of the first
//! token is the status class; every following token is a modifier. Tokens
//! starting with `#` reference a footnote, everything else is a flag.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors produced while parsing a support code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SupportCodeError {
    #[error("support code is empty")]
    Empty,
    #[error("support code '{0}' has an empty footnote reference")]
    EmptyNote(String),
}

/// Support category of one browser for one feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "char", from = "char")]
pub enum StatusClass {
    /// `y`
    Supported,
    /// `a`
    Partial,
    /// `p`
    Polyfillable,
    /// `n`
    Unsupported,
    /// `u`
    Unknown,
    /// No entry in the dataset for this browser.
    /// Never produced by [`StatusClass::from_char`]; `?` is its marker
    /// character in rendered and serialized output.
    NoData,
    /// Any other class character the dataset may use
    Other(char),
}

impl StatusClass {
    /// Marker character used for [`StatusClass::NoData`]
    pub const NO_DATA_MARKER: char = '?';

    /// Map a dataset class character to its status.
    /// A literal `?` in the dataset is `Other('?')`, not missing data.
    pub fn from_char(c: char) -> Self {
        match c {
            'y' => StatusClass::Supported,
            'a' => StatusClass::Partial,
            'p' => StatusClass::Polyfillable,
            'n' => StatusClass::Unsupported,
            'u' => StatusClass::Unknown,
            other => StatusClass::Other(other),
        }
    }

    /// Inverse of [`StatusClass::as_char`], used when reading serialized
    /// output back. Maps the marker to [`StatusClass::NoData`].
    pub fn from_marker(c: char) -> Self {
        if c == Self::NO_DATA_MARKER {
            StatusClass::NoData
        } else {
            Self::from_char(c)
        }
    }

    /// Class character as found in the dataset
    pub fn as_char(&self) -> char {
        match self {
            StatusClass::Supported => 'y',
            StatusClass::Partial => 'a',
            StatusClass::Polyfillable => 'p',
            StatusClass::Unsupported => 'n',
            StatusClass::Unknown => 'u',
            StatusClass::NoData => Self::NO_DATA_MARKER,
            StatusClass::Other(c) => *c,
        }
    }
}

impl From<char> for StatusClass {
    fn from(c: char) -> Self {
        Self::from_marker(c)
    }
}

impl From<StatusClass> for char {
    fn from(status: StatusClass) -> Self {
        status.as_char()
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A token following the status class
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modifier {
    /// Caveat such as `x` (needs prefix) or `d` (behind a flag)
    Flag(String),
    /// Footnote id, without the leading `#`
    Note(String),
}

/// Parsed support code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportCode {
    pub status: StatusClass,
    pub modifiers: Vec<Modifier>,
}

impl SupportCode {
    /// Parse a raw code such as `"a x #2"`
    pub fn parse(raw: &str) -> Result<Self, SupportCodeError> {
        let mut tokens = raw.split(' ').filter(|t| !t.is_empty());

        let status = tokens
            .next()
            .and_then(|first| first.chars().next())
            .map(StatusClass::from_char)
            .ok_or(SupportCodeError::Empty)?;

        let modifiers = tokens
            .map(|token| match token.strip_prefix('#') {
                Some("") => Err(SupportCodeError::EmptyNote(raw.to_string())),
                Some(id) => Ok(Modifier::Note(id.to_string())),
                None => Ok(Modifier::Flag(token.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { status, modifiers })
    }

    /// Flag modifiers in code order
    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.modifiers.iter().filter_map(|m| match m {
            Modifier::Flag(flag) => Some(flag.as_str()),
            Modifier::Note(_) => None,
        })
    }

    /// Footnote ids in code order
    pub fn notes(&self) -> impl Iterator<Item = &str> {
        self.modifiers.iter().filter_map(|m| match m {
            Modifier::Note(id) => Some(id.as_str()),
            Modifier::Flag(_) => None,
        })
    }
}

impl std::str::FromStr for SupportCode {
    type Err = SupportCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_status() {
        let code = SupportCode::parse("y").unwrap();
        assert_eq!(code.status, StatusClass::Supported);
        assert!(code.modifiers.is_empty());
    }

    #[test]
    fn test_parse_flags_and_notes() {
        let code = SupportCode::parse("a x #2 d #10").unwrap();
        assert_eq!(code.status, StatusClass::Partial);
        assert_eq!(code.flags().collect::<Vec<_>>(), vec!["x", "d"]);
        assert_eq!(code.notes().collect::<Vec<_>>(), vec!["2", "10"]);
    }

    #[test]
    fn test_only_first_character_is_status() {
        let code = SupportCode::parse("yx").unwrap();
        assert_eq!(code.status, StatusClass::Supported);
        assert!(code.modifiers.is_empty());
    }

    #[test]
    fn test_unrecognized_class() {
        let code = SupportCode::parse("z").unwrap();
        assert_eq!(code.status, StatusClass::Other('z'));
        assert_eq!(code.status.as_char(), 'z');
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(SupportCode::parse(""), Err(SupportCodeError::Empty));
        assert_eq!(SupportCode::parse("   "), Err(SupportCodeError::Empty));
        assert!(matches!(
            SupportCode::parse("a #"),
            Err(SupportCodeError::EmptyNote(_))
        ));
    }

    #[test]
    fn test_status_char_round_trip() {
        for c in ['y', 'a', 'p', 'n', 'u', '?', 'd'] {
            assert_eq!(StatusClass::from_char(c).as_char(), c);
            assert_eq!(StatusClass::from_marker(c).as_char(), c);
        }
    }

    #[test]
    fn test_question_mark_code_is_not_no_data() {
        let code = SupportCode::parse("? #1").unwrap();
        assert_eq!(code.status, StatusClass::Other('?'));
        assert_ne!(code.status, StatusClass::NoData);
    }

    #[test]
    fn test_serde_keeps_no_data() {
        let json = serde_json::to_string(&StatusClass::NoData).unwrap();
        assert_eq!(json, "\"?\"");
        let back: StatusClass = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StatusClass::NoData);
    }
}
