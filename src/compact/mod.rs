//! Browser list compaction
//!
//! Turns a flat list of `"family version"` identifiers into short display
//! labels: versions are grouped per family and runs of consecutive integer
//! versions collapse into a single range (`Chrome 56 → 58`). Non-numeric
//! versions (`ESR`, `TP`, `15.2-15.3`) always stay on their own and are
//! listed after the numeric ranges of their family, in input order.
//!
//! A version repeated within a family is listed once, so every distinct
//! input version appears in exactly one entry.

use crate::browser::{BrowserId, BrowserIdError, VersionKind};
use std::collections::HashMap;
use std::fmt;

/// Lookup of human-readable family names (`chrome` -> `Chrome`)
pub trait FamilyNames {
    /// Display name for a family key, `None` when unknown
    fn display_name(&self, family: &str) -> Option<&str>;
}

/// Uses the family keys verbatim
#[derive(Debug, Clone, Copy, Default)]
pub struct RawFamilyNames;

impl FamilyNames for RawFamilyNames {
    fn display_name(&self, _family: &str) -> Option<&str> {
        None
    }
}

impl FamilyNames for HashMap<String, String> {
    fn display_name(&self, family: &str) -> Option<&str> {
        self.get(family).map(String::as_str)
    }
}

impl<T: FamilyNames + ?Sized> FamilyNames for &T {
    fn display_name(&self, family: &str) -> Option<&str> {
        (**self).display_name(family)
    }
}

/// What one compacted entry covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeKind {
    /// One integer version
    Single(i64),
    /// Inclusive, `start < end`
    Range { start: i64, end: i64 },
    /// Non-numeric version, never merged with anything
    RawToken(String),
}

/// One compacted entry for a family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    pub family: String,
    pub kind: RangeKind,
}

impl VersionRange {
    /// Render with the given display name in place of the family key
    pub fn render(&self, name: &str) -> String {
        match &self.kind {
            RangeKind::Single(version) => format!("{} {}", name, version),
            RangeKind::Range { start, end } => format!("{} {} → {}", name, start, end),
            RangeKind::RawToken(token) => format!("{} {}", name, token),
        }
    }

    /// Number of distinct versions the entry stands for
    pub fn span(&self) -> usize {
        match &self.kind {
            RangeKind::Single(_) | RangeKind::RawToken(_) => 1,
            RangeKind::Range { start, end } => (end - start + 1) as usize,
        }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&self.family))
    }
}

/// Per-call grouping of versions by family, families in first-seen order
#[derive(Default)]
struct FamilyGroups<'a> {
    order: Vec<&'a str>,
    versions: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> FamilyGroups<'a> {
    fn push(&mut self, browser: &'a BrowserId) {
        let family = browser.family.as_str();
        let slot = self.versions.entry(family).or_insert_with(|| {
            self.order.push(family);
            Vec::new()
        });
        let version = browser.version.as_str();
        if slot.contains(&version) {
            tracing::debug!(family, version, "dropping duplicate browser version");
        } else {
            slot.push(version);
        }
    }

    fn into_families(self) -> impl Iterator<Item = (&'a str, Vec<&'a str>)> {
        let Self { order, mut versions } = self;
        order
            .into_iter()
            .map(move |family| (family, versions.remove(family).unwrap_or_default()))
    }
}

/// Versions of one family split by kind.
///
/// Numeric versions come back sorted ascending; raw tokens cannot be
/// ordered against integers and keep their input order.
fn split_versions<'v>(versions: &[&'v str]) -> (Vec<i64>, Vec<&'v str>) {
    let mut numeric = Vec::new();
    let mut raw = Vec::new();
    for &version in versions {
        match crate::browser::classify_version(version) {
            VersionKind::Numeric(n) => numeric.push(n),
            VersionKind::Raw(token) => raw.push(token),
        }
    }
    numeric.sort_unstable();
    (numeric, raw)
}

/// Open run of consecutive versions
struct OpenRange {
    start: i64,
    last: i64,
}

impl OpenRange {
    fn close(self, family: &str) -> VersionRange {
        let kind = if self.start == self.last {
            RangeKind::Single(self.start)
        } else {
            RangeKind::Range {
                start: self.start,
                end: self.last,
            }
        };
        VersionRange {
            family: family.to_string(),
            kind,
        }
    }
}

/// Numeric ranges first, ascending, then raw tokens in input order
fn compact_family(family: &str, versions: &[&str], out: &mut Vec<VersionRange>) {
    let (numeric, raw) = split_versions(versions);
    let mut open: Option<OpenRange> = None;

    for version in numeric {
        match open.as_mut() {
            None => {
                open = Some(OpenRange {
                    start: version,
                    last: version,
                })
            }
            Some(range) if version > range.last.saturating_add(1) => {
                let closed = std::mem::replace(
                    range,
                    OpenRange {
                        start: version,
                        last: version,
                    },
                );
                out.push(closed.close(family));
            }
            Some(range) => range.last = version,
        }
    }

    if let Some(range) = open {
        out.push(range.close(family));
    }

    out.extend(raw.into_iter().map(|token| VersionRange {
        family: family.to_string(),
        kind: RangeKind::RawToken(token.to_string()),
    }));
}

/// Compact already-parsed browsers into ranges
pub fn compact_ids(browsers: &[BrowserId]) -> Vec<VersionRange> {
    let mut groups = FamilyGroups::default();
    for browser in browsers {
        groups.push(browser);
    }

    let mut out = Vec::with_capacity(browsers.len());
    for (family, versions) in groups.into_families() {
        compact_family(family, &versions, &mut out);
    }

    tracing::debug!(inputs = browsers.len(), entries = out.len(), "compacted browser list");
    out
}

/// Parse and compact `"family version"` strings into ranges
pub fn compact_ranges<S: AsRef<str>>(browsers: &[S]) -> Result<Vec<VersionRange>, BrowserIdError> {
    let ids = crate::browser::parse_all(browsers)?;
    Ok(compact_ids(&ids))
}

/// Render compacted ranges using display names from `names`
pub fn render_ranges(ranges: &[VersionRange], names: &impl FamilyNames) -> Vec<String> {
    ranges
        .iter()
        .map(|range| {
            let name = names.display_name(&range.family).unwrap_or(&range.family);
            range.render(name)
        })
        .collect()
}

/// Compact `"family version"` strings into display labels.
///
/// Entries that are not `"family version"` are skipped with a warning; use
/// [`compact_ranges`] to treat them as errors instead.
pub fn compact<S: AsRef<str>>(browsers: &[S], names: &impl FamilyNames) -> Vec<String> {
    let ids: Vec<BrowserId> = browsers
        .iter()
        .filter_map(|s| match BrowserId::parse(s.as_ref()) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!("skipping browser identifier: {}", e);
                None
            }
        })
        .collect();

    render_ranges(&compact_ids(&ids), names)
}
