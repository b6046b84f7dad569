//! Records of the caniuse `data-2.0.json` format
//!
//! Only the fields the reports use are modelled; everything else in the
//! upstream file is ignored by serde.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One browser family from the `agents` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    /// Display name (e.g. `Chrome` for key `chrome`)
    #[serde(default)]
    pub browser: Option<String>,
    /// Short display name
    #[serde(default)]
    pub abbr: Option<String>,
    /// `desktop` or `mobile`
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Global usage share per version, in percent
    #[serde(default)]
    pub usage_global: HashMap<String, f64>,
}

/// One feature from the `data` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Standardisation status (`rec`, `cr`, `wd`, `ls`, `other`, `unoff`)
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    /// Comma separated search keywords
    #[serde(default)]
    pub keywords: String,
    /// Free-text notes shown under the feature
    #[serde(default)]
    pub notes: String,
    /// family -> version -> support code (e.g. `"a x #2"`)
    #[serde(default)]
    pub stats: HashMap<String, HashMap<String, String>>,
    /// note id -> note text
    #[serde(default)]
    pub notes_by_num: HashMap<String, String>,
}

impl FeatureRecord {
    /// Raw support code for one browser, if the dataset knows it
    pub fn support_code(&self, family: &str, version: &str) -> Option<&str> {
        self.stats
            .get(family)
            .and_then(|versions| versions.get(version))
            .map(String::as_str)
    }

    /// Text of a footnote, if present
    pub fn note_text(&self, id: &str) -> Option<&str> {
        self.notes_by_num.get(id).map(String::as_str)
    }
}
