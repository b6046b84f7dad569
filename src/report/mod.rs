//! Feature support reports
//!
//! Combines a [`Classification`] with compacted browser labels, display
//! labels and coverage figures into a report that can be printed as text
//! or serialized to JSON.

use crate::compact::{compact, FamilyNames};
use crate::labels::{flag_label_or_raw, status_label_or_raw};
use crate::resolver::BrowserResolver;
use crate::support::{Classification, StatusClass, SupportBucket};
use nu_ansi_term::Color;
use serde::Serialize;

/// Overview of the chosen browser target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowserSummary {
    pub query: String,
    pub count: usize,
    /// Global usage, in percent
    pub coverage: f64,
    /// Compacted browser labels
    pub browsers: Vec<String>,
}

impl BrowserSummary {
    pub fn generate<R, N>(query: &str, browsers: &[String], resolver: &R, names: &N) -> Self
    where
        R: BrowserResolver + ?Sized,
        N: FamilyNames,
    {
        Self {
            query: query.to_string(),
            count: browsers.len(),
            coverage: resolver.coverage(browsers),
            browsers: compact(browsers, names),
        }
    }

    pub fn format_summary(&self, use_colors: bool) -> String {
        let headline = format!("{} Browsers, {:.2}% coverage", self.count, self.coverage);
        let mut output = if use_colors {
            Color::White.bold().paint(headline).to_string()
        } else {
            headline
        };
        output.push('\n');
        if !self.browsers.is_empty() {
            output.push_str(&self.browsers.join(", "));
            output.push('\n');
        }
        output
    }
}

/// One status bucket, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketReport {
    pub status: StatusClass,
    pub label: String,
    pub browser_count: usize,
    /// Global usage of the bucket's browsers, in percent
    pub coverage: f64,
    /// Compacted browser labels
    pub browsers: Vec<String>,
    /// Flag labels (e.g. `Needs Prefix`)
    pub flags: Vec<String>,
    /// Footnote ids
    pub notes: Vec<String>,
}

/// One footnote line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteLine {
    pub id: String,
    pub text: String,
    pub missing_text: bool,
}

/// Support report for one feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureReport {
    pub feature_id: String,
    pub title: String,
    pub description: String,
    pub buckets: Vec<BucketReport>,
    pub notes: Vec<NoteLine>,
    /// Browsers the dataset has no data for
    pub missing: Vec<String>,
}

impl FeatureReport {
    /// Build a report from a classification
    pub fn generate<R, N>(
        feature_id: &str,
        title: &str,
        description: &str,
        classification: &Classification,
        resolver: &R,
        names: &N,
    ) -> Self
    where
        R: BrowserResolver + ?Sized,
        N: FamilyNames,
    {
        let buckets = classification
            .buckets
            .iter()
            .map(|bucket| Self::bucket_report(bucket, resolver, names))
            .collect();

        let notes = classification
            .notes
            .iter()
            .map(|(id, text)| NoteLine {
                id: id.to_string(),
                text: text.as_str().to_string(),
                missing_text: text.is_missing(),
            })
            .collect();

        Self {
            feature_id: feature_id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            buckets,
            notes,
            missing: classification.missing.iter().map(ToString::to_string).collect(),
        }
    }

    fn bucket_report<R, N>(bucket: &SupportBucket, resolver: &R, names: &N) -> BucketReport
    where
        R: BrowserResolver + ?Sized,
        N: FamilyNames,
    {
        let browsers = bucket.browser_strings();
        BucketReport {
            status: bucket.status,
            label: status_label_or_raw(bucket.status),
            browser_count: browsers.len(),
            coverage: resolver.coverage(&browsers),
            browsers: compact(&browsers, names),
            flags: bucket.flags.iter().map(|f| flag_label_or_raw(f)).collect(),
            notes: bucket.note_ids().into_iter().map(str::to_string).collect(),
        }
    }

    /// Whether any browser had no support data
    pub fn has_missing_data(&self) -> bool {
        !self.missing.is_empty()
    }

    fn status_color(status: StatusClass) -> Color {
        match status {
            StatusClass::Supported => Color::Green,
            StatusClass::Partial | StatusClass::Polyfillable => Color::Yellow,
            StatusClass::Unsupported => Color::Red,
            StatusClass::Unknown | StatusClass::NoData | StatusClass::Other(_) => Color::Purple,
        }
    }

    /// Format the report as human-readable text
    pub fn format_report(&self, use_colors: bool) -> String {
        let mut output = String::new();

        let heading = format!("{} [{}]", self.title, self.feature_id);
        if use_colors {
            output.push_str(&Color::Cyan.bold().paint(heading).to_string());
        } else {
            output.push_str(&heading);
        }
        output.push('\n');

        if !self.description.is_empty() {
            output.push_str(&format!("  {}\n", self.description));
        }

        if self.buckets.is_empty() {
            output.push_str("  No browsers selected.\n");
        }

        for bucket in &self.buckets {
            let label = if use_colors {
                Self::status_color(bucket.status)
                    .paint(&bucket.label)
                    .to_string()
            } else {
                bucket.label.clone()
            };

            let mut badges: Vec<String> = bucket.flags.clone();
            badges.extend(bucket.notes.iter().map(|n| format!("#{}", n)));

            output.push_str(&format!(
                "  {} ({} browsers, {:.2}%)",
                label, bucket.browser_count, bucket.coverage
            ));
            if !badges.is_empty() {
                output.push_str(&format!(" [{}]", badges.join("] [")));
            }
            output.push('\n');
            output.push_str(&format!("    {}\n", bucket.browsers.join(", ")));
        }

        if !self.notes.is_empty() {
            output.push_str("  Notes:\n");
            for note in &self.notes {
                output.push_str(&format!("    #{} {}\n", note.id, note.text));
            }
        }

        output
    }
}

/// Heading for the feature list: `N Features`, or `shown of total` when
/// the list was cut by the limit
pub fn feature_count_line(shown: usize, total: usize) -> String {
    if shown == total {
        format!("{} Features", total)
    } else {
        format!("{} of {} Features", shown, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compact::RawFamilyNames;
    use crate::resolver::ResolveError;
    use crate::support::{NoteCollection, NoteText};
    use crate::browser::BrowserId;
    use std::collections::BTreeSet;

    struct FixedCoverage;

    impl BrowserResolver for FixedCoverage {
        fn resolve(&self, _query: &str) -> Result<Vec<String>, ResolveError> {
            Ok(Vec::new())
        }

        fn coverage(&self, browsers: &[String]) -> f64 {
            browsers.len() as f64 * 1.5
        }
    }

    fn classification() -> Classification {
        let mut notes = NoteCollection::new();
        notes.insert("2", NoteText::Known("Only in workers".to_string()));
        notes.insert("10", NoteText::Missing);

        Classification {
            buckets: vec![
                SupportBucket {
                    status: StatusClass::Supported,
                    browsers: vec![BrowserId::new("chrome", "56"), BrowserId::new("chrome", "57")],
                    flags: BTreeSet::new(),
                    notes: BTreeSet::new(),
                },
                SupportBucket {
                    status: StatusClass::Partial,
                    browsers: vec![BrowserId::new("ie", "11")],
                    flags: BTreeSet::from(["x".to_string()]),
                    notes: BTreeSet::from(["10".to_string(), "2".to_string()]),
                },
            ],
            notes,
            missing: Vec::new(),
        }
    }

    #[test]
    fn test_generate_report() {
        let report = FeatureReport::generate(
            "fetch",
            "Fetch",
            "",
            &classification(),
            &FixedCoverage,
            &RawFamilyNames,
        );

        assert_eq!(report.buckets.len(), 2);
        assert_eq!(report.buckets[0].label, "Supported");
        assert_eq!(report.buckets[0].browsers, vec!["chrome 56 → 57"]);
        assert_eq!(report.buckets[0].coverage, 3.0);
        assert_eq!(report.buckets[1].flags, vec!["Needs Prefix"]);
        assert_eq!(report.notes[1].text, NoteText::MISSING_PLACEHOLDER);
        assert!(report.notes[1].missing_text);
        assert!(!report.has_missing_data());
    }

    #[test]
    fn test_format_report_plain() {
        let report = FeatureReport::generate(
            "fetch",
            "Fetch",
            "Modern replacement for XMLHttpRequest",
            &classification(),
            &FixedCoverage,
            &RawFamilyNames,
        );
        let text = report.format_report(false);

        assert!(text.contains("Fetch [fetch]"));
        assert!(text.contains("Supported (2 browsers, 3.00%)"));
        assert!(text.contains("Partial (1 browsers, 1.50%) [Needs Prefix] [#2] [#10]"));
        assert!(text.contains("#2 Only in workers"));
        assert!(!text.contains("\x1b["));
    }

    #[test]
    fn test_format_report_colors() {
        let report = FeatureReport::generate(
            "fetch",
            "Fetch",
            "",
            &classification(),
            &FixedCoverage,
            &RawFamilyNames,
        );
        assert!(report.format_report(true).contains("\x1b["));
    }

    #[test]
    fn test_browser_summary() {
        let browsers = vec!["chrome 56".to_string(), "chrome 57".to_string(), "ie 11".to_string()];
        let summary = BrowserSummary::generate("q", &browsers, &FixedCoverage, &RawFamilyNames);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.browsers, vec!["chrome 56 → 57", "ie 11"]);
        assert_eq!(
            summary.format_summary(false),
            "3 Browsers, 4.50% coverage\nchrome 56 → 57, ie 11\n"
        );
    }

    #[test]
    fn test_feature_count_line() {
        assert_eq!(feature_count_line(3, 3), "3 Features");
        assert_eq!(feature_count_line(10, 42), "10 of 42 Features");
        assert_eq!(feature_count_line(0, 0), "0 Features");
    }

    #[test]
    fn test_json_serialization() {
        let report = FeatureReport::generate(
            "fetch",
            "Fetch",
            "",
            &classification(),
            &FixedCoverage,
            &RawFamilyNames,
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["buckets"][0]["status"], "y");
        assert_eq!(json["buckets"][1]["notes"][0], "2");
        assert_eq!(json["buckets"][1]["notes"][1], "10");
    }
}
