//! Feature support classification
//!
//! Given a feature record and a resolved browser list, every browser is put
//! into exactly one bucket keyed by its status class. Buckets keep the
//! browsers in input order and collect the distinct flags and footnotes
//! seen for that class. Footnote texts are merged into one collection for
//! the whole feature.

pub mod code;

use crate::browser::BrowserId;
use crate::dataset::record::FeatureRecord;
use serde::{Serialize, Serializer};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

pub use code::{Modifier, StatusClass, SupportCode, SupportCodeError};

/// Errors produced by [`classify`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The dataset has no entry for this browser (usually a browser newer
    /// than the dataset)
    #[error("no support data for {family} {version}")]
    MissingSupportData { family: String, version: String },
    #[error("invalid support code for {browser}: {source}")]
    InvalidCode {
        browser: BrowserId,
        #[source]
        source: SupportCodeError,
    },
}

/// Text of one footnote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteText {
    Known(String),
    /// Referenced by a support code but absent from `notes_by_num`
    Missing,
}

impl NoteText {
    pub const MISSING_PLACEHOLDER: &'static str = "(note text unavailable)";

    pub fn as_str(&self) -> &str {
        match self {
            NoteText::Known(text) => text,
            NoteText::Missing => Self::MISSING_PLACEHOLDER,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, NoteText::Missing)
    }
}

impl Serialize for NoteText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NoteText::Known(text) => serializer.serialize_some(text),
            NoteText::Missing => serializer.serialize_none(),
        }
    }
}

/// Footnotes referenced during one classification, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteCollection {
    entries: Vec<(String, NoteText)>,
    index: HashMap<String, usize>,
}

impl NoteCollection {
    /// Empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a note unless the id is already present.
    /// Returns `true` when the note was new.
    pub fn insert(&mut self, id: &str, text: NoteText) -> bool {
        if self.index.contains_key(id) {
            return false;
        }
        self.index.insert(id.to_string(), self.entries.len());
        self.entries.push((id.to_string(), text));
        true
    }

    /// Whether `id` has been recorded
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Text recorded for `id`
    pub fn get(&self, id: &str) -> Option<&NoteText> {
        self.index.get(id).map(|&i| &self.entries[i].1)
    }

    /// Number of distinct note ids
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Notes in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NoteText)> {
        self.entries.iter().map(|(id, text)| (id.as_str(), text))
    }
}

impl Serialize for NoteCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, text) in &self.entries {
            map.serialize_entry(id, text)?;
        }
        map.end()
    }
}

/// Browsers sharing one status class for a feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportBucket {
    pub status: StatusClass,
    pub browsers: Vec<BrowserId>,
    pub flags: BTreeSet<String>,
    pub notes: BTreeSet<String>,
}

impl SupportBucket {
    pub fn new(status: StatusClass) -> Self {
        Self {
            status,
            browsers: Vec::new(),
            flags: BTreeSet::new(),
            notes: BTreeSet::new(),
        }
    }

    /// Footnote ids ordered numerically (`2` before `10`); non-numeric ids
    /// sort after the numeric ones
    pub fn note_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.notes.iter().map(String::as_str).collect();
        ids.sort_by_key(|id| (id.parse::<u64>().map_err(|_| ()), *id));
        ids
    }

    /// Browsers formatted as `"family version"`
    pub fn browser_strings(&self) -> Vec<String> {
        self.browsers.iter().map(ToString::to_string).collect()
    }
}

/// Result of classifying one feature against a browser list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// One bucket per status class, in order of first appearance
    pub buckets: Vec<SupportBucket>,
    pub notes: NoteCollection,
    /// Browsers without support data (lenient mode only)
    pub missing: Vec<BrowserId>,
}

impl Classification {
    pub fn bucket(&self, status: StatusClass) -> Option<&SupportBucket> {
        self.buckets.iter().find(|b| b.status == status)
    }

    /// Total number of browsers across all buckets
    pub fn browser_count(&self) -> usize {
        self.buckets.iter().map(|b| b.browsers.len()).sum()
    }

    fn bucket_mut(&mut self, status: StatusClass) -> &mut SupportBucket {
        let position = match self.buckets.iter().position(|b| b.status == status) {
            Some(position) => position,
            None => {
                self.buckets.push(SupportBucket::new(status));
                self.buckets.len() - 1
            }
        };
        &mut self.buckets[position]
    }

    fn record(&mut self, feature: &FeatureRecord, browser: &BrowserId, code: SupportCode) {
        let mut new_notes = Vec::new();
        {
            let bucket = self.bucket_mut(code.status);
            for modifier in &code.modifiers {
                match modifier {
                    Modifier::Note(id) => {
                        bucket.notes.insert(id.clone());
                        new_notes.push(id.as_str());
                    }
                    Modifier::Flag(flag) => {
                        bucket.flags.insert(flag.clone());
                    }
                }
            }
            bucket.browsers.push(browser.clone());
        }

        for id in new_notes {
            if self.notes.contains(id) {
                continue;
            }
            let text = match feature.note_text(id) {
                Some(text) => NoteText::Known(text.to_string()),
                None => {
                    tracing::warn!(note = id, feature = %feature.title, "footnote has no text");
                    NoteText::Missing
                }
            };
            self.notes.insert(id, text);
        }
    }
}

fn lookup_code(feature: &FeatureRecord, browser: &BrowserId) -> Result<SupportCode, ClassifyError> {
    let raw = feature
        .support_code(&browser.family, &browser.version)
        .ok_or_else(|| ClassifyError::MissingSupportData {
            family: browser.family.clone(),
            version: browser.version.clone(),
        })?;

    SupportCode::parse(raw).map_err(|source| ClassifyError::InvalidCode {
        browser: browser.clone(),
        source,
    })
}

/// Classify `browsers` for `feature`.
///
/// Fails on the first browser the dataset has no data for, or whose code
/// cannot be parsed.
pub fn classify(feature: &FeatureRecord, browsers: &[BrowserId]) -> Result<Classification, ClassifyError> {
    let mut result = Classification::default();

    for browser in browsers {
        let code = lookup_code(feature, browser)?;
        result.record(feature, browser, code);
    }

    tracing::debug!(
        feature = %feature.title,
        browsers = browsers.len(),
        buckets = result.buckets.len(),
        "classified feature"
    );
    Ok(result)
}

/// Classify `browsers` for `feature`, never failing.
///
/// Browsers without data (or with an unparsable code) go into a
/// [`StatusClass::NoData`] bucket and are also listed in
/// [`Classification::missing`].
pub fn classify_lenient(feature: &FeatureRecord, browsers: &[BrowserId]) -> Classification {
    let mut result = Classification::default();

    for browser in browsers {
        match lookup_code(feature, browser) {
            Ok(code) => result.record(feature, browser, code),
            Err(e) => {
                tracing::warn!(feature = %feature.title, "{}", e);
                result.bucket_mut(StatusClass::NoData).browsers.push(browser.clone());
                result.missing.push(browser.clone());
            }
        }
    }

    result
}
