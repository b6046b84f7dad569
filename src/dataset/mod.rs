//! Feature dataset in the caniuse `data-2.0.json` format
//!
//! The dataset provides the three lookups the rest of the crate needs:
//! family display names, feature records, and global usage per browser
//! version for coverage figures.

pub mod record;

use crate::browser::BrowserId;
use crate::compact::FamilyNames;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use record::{AgentRecord, FeatureRecord};

/// Errors produced while loading or querying a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown feature '{id}'")]
    UnknownFeature { id: String, suggestions: Vec<String> },
}

/// Lookup of feature records by id
pub trait FeatureLookup {
    fn feature(&self, id: &str) -> Option<&FeatureRecord>;

    /// All feature ids, sorted
    fn feature_ids(&self) -> Vec<&str>;
}

/// In-memory dataset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub agents: HashMap<String, AgentRecord>,
    #[serde(default)]
    pub data: HashMap<String, FeatureRecord>,
}

impl Dataset {
    /// Load from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            agents = dataset.agents.len(),
            features = dataset.data.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Parse from a JSON string
    pub fn from_json(content: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Feature by id, with "did you mean" suggestions when absent
    pub fn require_feature(&self, id: &str) -> Result<&FeatureRecord, DatasetError> {
        self.data.get(id).ok_or_else(|| DatasetError::UnknownFeature {
            id: id.to_string(),
            suggestions: self.suggest_features(id),
        })
    }

    /// Up to three feature ids similar to `typo`, best first
    pub fn suggest_features(&self, typo: &str) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .data
            .keys()
            .map(|id| (strsim::jaro_winkler(typo, id), id.as_str()))
            .filter(|(score, _)| *score >= 0.8)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored.into_iter().take(3).map(|(_, id)| id.to_string()).collect()
    }

    /// Whether the agents table knows this browser version
    pub fn knows_browser(&self, browser: &BrowserId) -> bool {
        self.agents
            .get(&browser.family)
            .map(|agent| agent.usage_global.contains_key(&browser.version))
            .unwrap_or(false)
    }

    /// Global usage share of a browser list, in percent.
    /// Versions without usage data count as zero.
    pub fn coverage<S: AsRef<str>>(&self, browsers: &[S]) -> f64 {
        browsers
            .iter()
            .filter_map(|s| BrowserId::parse(s.as_ref()).ok())
            .filter_map(|b| {
                self.agents
                    .get(&b.family)
                    .and_then(|agent| agent.usage_global.get(&b.version))
                    .copied()
            })
            .sum()
    }
}

impl FamilyNames for Dataset {
    fn display_name(&self, family: &str) -> Option<&str> {
        self.agents.get(family).and_then(|agent| agent.browser.as_deref())
    }
}

impl FeatureLookup for Dataset {
    fn feature(&self, id: &str) -> Option<&FeatureRecord> {
        self.data.get(id)
    }

    fn feature_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.data.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "agents": {
            "chrome": { "browser": "Chrome", "usage_global": { "56": 1.5, "57": 2.25 } },
            "and_chr": { "usage_global": { "99": 30.0 } }
        },
        "data": {
            "flexbox": { "title": "Flexbox", "stats": { "chrome": { "56": "y" } } },
            "flexbox-gap": { "title": "gap for flexbox", "stats": {} }
        }
    }"#;

    #[test]
    fn test_display_names() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        assert_eq!(dataset.display_name("chrome"), Some("Chrome"));
        assert_eq!(dataset.display_name("and_chr"), None);
        assert_eq!(dataset.display_name("ie"), None);
    }

    #[test]
    fn test_coverage_sums_usage() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        let coverage = dataset.coverage(&["chrome 56", "chrome 57", "chrome 1", "ie 11"]);
        assert!((coverage - 3.75).abs() < 1e-9);
        let empty: [&str; 0] = [];
        assert_eq!(dataset.coverage(&empty), 0.0);
    }

    #[test]
    fn test_feature_ids_sorted() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        assert_eq!(dataset.feature_ids(), vec!["flexbox", "flexbox-gap"]);
    }

    #[test]
    fn test_unknown_feature_suggestions() {
        let dataset = Dataset::from_json(SAMPLE).unwrap();
        match dataset.require_feature("flexbx") {
            Err(DatasetError::UnknownFeature { id, suggestions }) => {
                assert_eq!(id, "flexbx");
                assert_eq!(suggestions.first().map(String::as_str), Some("flexbox"));
            }
            other => panic!("expected UnknownFeature, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(Dataset::from_json("{"), Err(DatasetError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = Dataset::from_file(Path::new("/nonexistent/data.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
