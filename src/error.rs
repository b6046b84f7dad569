//! Structured error type for the command line
//!
//! Library modules return their own `thiserror` enums. At the CLI boundary
//! those are converted into a [`CaniuseError`], which can be printed as
//! human-readable text or as JSON.

pub mod help_db;

use crate::dataset::DatasetError;
use crate::resolver::ResolveError;
use crate::support::ClassifyError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Structured error for caniuse-next operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaniuseError {
    /// Error code category
    pub error_code: String,
    /// Human-readable error message
    pub message: String,
    /// Process exit code
    pub exit_code: i32,
    /// Additional context information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

impl CaniuseError {
    /// Create a new error with the given code, message, and exit code
    pub fn new(error_code: impl Into<String>, message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            exit_code,
            context: None,
        }
    }

    /// Add context information to the error
    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }

    /// No dataset path configured
    pub fn dataset_not_configured() -> Self {
        Self::new(
            "DATASET_NOT_CONFIGURED",
            "no dataset given (use --data or CANIUSE_DATA)",
            2,
        )
    }

    /// Dataset file missing
    pub fn dataset_not_found(path: &Path) -> Self {
        Self::new(
            "DATASET_NOT_FOUND",
            format!("{}: No such file or directory", path.display()),
            2,
        )
    }

    /// Invalid command line usage
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new("USAGE", message, 2)
    }

    /// Format error as JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                r#"{{"error_code":"{}","message":"{}","exit_code":{}}}"#,
                self.error_code, self.message, self.exit_code
            )
        })
    }

    /// Format error as human-readable text
    pub fn to_text(&self) -> String {
        self.message.clone()
    }

    /// Get help text for this error code, if available
    pub fn get_help(&self) -> Option<&'static help_db::HelpEntry> {
        help_db::get_help(&self.error_code)
    }

    /// Format error with help text appended
    pub fn with_help(&self) -> String {
        let mut output = self.to_text();
        if let Some(help) = self.get_help() {
            output.push_str("\n\n");
            output.push_str("Help: ");
            output.push_str(help.title);
            output.push('\n');
            output.push_str(help.fix);
        }
        output
    }
}

impl std::fmt::Display for CaniuseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CaniuseError {}

impl From<DatasetError> for CaniuseError {
    fn from(err: DatasetError) -> Self {
        match &err {
            DatasetError::Io { path, source } if source.kind() == std::io::ErrorKind::NotFound => {
                Self::dataset_not_found(path)
            }
            DatasetError::Io { .. } => Self::new("DATASET_IO", err.to_string(), 2),
            DatasetError::Json(_) => Self::new("DATASET_INVALID", err.to_string(), 2),
            DatasetError::UnknownFeature { id, suggestions } => {
                Self::new("UNKNOWN_FEATURE", err.to_string(), 1).with_context(serde_json::json!({
                    "feature": id,
                    "suggestions": suggestions,
                }))
            }
        }
    }
}

impl From<ClassifyError> for CaniuseError {
    fn from(err: ClassifyError) -> Self {
        match &err {
            ClassifyError::MissingSupportData { family, version } => {
                Self::new("MISSING_SUPPORT_DATA", err.to_string(), 3).with_context(
                    serde_json::json!({ "family": family, "version": version }),
                )
            }
            ClassifyError::InvalidCode { browser, .. } => {
                Self::new("INVALID_SUPPORT_CODE", err.to_string(), 3)
                    .with_context(serde_json::json!({ "browser": browser.to_string() }))
            }
        }
    }
}

impl From<ResolveError> for CaniuseError {
    fn from(err: ResolveError) -> Self {
        Self::new("INVALID_QUERY", err.to_string(), 1)
    }
}

/// Check if errors should be output in JSON format
///
/// Checks the CANIUSE_ERROR_FORMAT environment variable.
pub fn should_output_json_errors() -> bool {
    std::env::var("CANIUSE_ERROR_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false)
}
