//! Display labels for status classes and support flags

use crate::support::StatusClass;
use thiserror::Error;

/// No label is defined for a status class or flag
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("no label for status class '{0}'")]
    MissingStatusLabel(char),
    #[error("no label for support flag '{0}'")]
    MissingFlagLabel(String),
}

/// Label for a status class
pub fn status_label(status: StatusClass) -> Result<&'static str, LabelError> {
    match status {
        StatusClass::Supported => Ok("Supported"),
        StatusClass::Partial => Ok("Partial"),
        StatusClass::Polyfillable => Ok("Polyfillable"),
        StatusClass::Unsupported => Ok("Unsupported"),
        StatusClass::Unknown => Ok("Unknown"),
        StatusClass::NoData => Ok("No data"),
        StatusClass::Other(c) => Err(LabelError::MissingStatusLabel(c)),
    }
}

/// Label for a support flag (`x`, `d`)
pub fn flag_label(flag: &str) -> Result<&'static str, LabelError> {
    match flag {
        "x" => Ok("Needs Prefix"),
        "d" => Ok("Behind a flag"),
        other => Err(LabelError::MissingFlagLabel(other.to_string())),
    }
}

/// Status label, falling back to the raw class character
pub fn status_label_or_raw(status: StatusClass) -> String {
    status_label(status)
        .map(str::to_string)
        .unwrap_or_else(|e| {
            tracing::debug!("{}", e);
            format!("Status '{}'", status.as_char())
        })
}

/// Flag label, falling back to the raw flag token
pub fn flag_label_or_raw(flag: &str) -> String {
    flag_label(flag)
        .map(str::to_string)
        .unwrap_or_else(|e| {
            tracing::debug!("{}", e);
            format!("Flag '{}'", flag)
        })
}
