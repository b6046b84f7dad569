//! End-to-end tests: resolve, classify, and render reports

use caniuse_next::browser;
use caniuse_next::config::Config;
use caniuse_next::dataset::FeatureLookup;
use caniuse_next::{
    classify_lenient, resolve_or_empty, BrowserResolver, BrowserSummary, Dataset, FeatureReport,
    LiteralResolver,
};
use std::io::Write;

fn fixture() -> Dataset {
    Dataset::from_json(include_str!("fixtures/data.json")).unwrap()
}

#[test]
fn test_browser_summary_from_query() {
    let dataset = fixture();
    let resolver = LiteralResolver::new(&dataset);
    let query = "chrome 56, chrome 57, chrome 58, firefox 51, ie 11";
    let browsers = resolve_or_empty(&resolver, query);
    let summary = BrowserSummary::generate(query, &browsers, &resolver, &dataset);

    assert_eq!(summary.count, 5);
    assert!((summary.coverage - 1.15).abs() < 1e-9);
    assert_eq!(summary.browsers, vec!["Chrome 56 → 58", "Firefox 51", "IE 11"]);
    assert!(summary.format_summary(false).starts_with("5 Browsers, 1.15% coverage\n"));
}

#[test]
fn test_malformed_query_yields_empty_report() {
    let dataset = fixture();
    let resolver = LiteralResolver::new(&dataset);
    let browsers = resolve_or_empty(&resolver, "> 0.25%, not dead");
    assert!(browsers.is_empty());
    assert_eq!(resolver.coverage(&browsers), 0.0);

    let fetch = dataset.feature("fetch").unwrap();
    let classification = classify_lenient(fetch, &browser::parse_all(&browsers).unwrap());
    let report = FeatureReport::generate("fetch", &fetch.title, "", &classification, &resolver, &dataset);
    assert!(report.buckets.is_empty());
    assert!(report.format_report(false).contains("No browsers selected."));
}

#[test]
fn test_feature_report_groups_and_compacts() {
    let dataset = fixture();
    let resolver = LiteralResolver::new(&dataset);
    let browsers = resolve_or_empty(
        &resolver,
        "ie 10, ie 11, firefox 51, firefox 52, firefox 53, chrome 56, chrome 57, chrome 58",
    );
    let grid = dataset.feature("css-grid").unwrap();
    let classification = classify_lenient(grid, &browser::parse_all(&browsers).unwrap());
    let report = FeatureReport::generate(
        "css-grid",
        &grid.title,
        &grid.description,
        &classification,
        &resolver,
        &dataset,
    );

    let labels: Vec<&str> = report.buckets.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Partial", "Unsupported", "Supported"]);
    assert_eq!(report.buckets[0].browsers, vec!["IE 10 → 11"]);
    assert_eq!(report.buckets[0].flags, vec!["Needs Prefix"]);
    assert_eq!(report.buckets[1].browsers, vec!["Firefox 51", "Chrome 56"]);
    assert_eq!(report.buckets[1].flags, vec!["Behind a flag"]);
    assert_eq!(report.buckets[2].browsers, vec!["Firefox 52 → 53", "Chrome 57 → 58"]);

    let note_ids: Vec<&str> = report.notes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(note_ids, vec!["2", "3", "4"]);
    assert!(report.notes[2].missing_text);

    let text = report.format_report(false);
    assert!(text.contains("CSS Grid Layout (level 1) [css-grid]"));
    assert!(text.contains("Partial (2 browsers, 0.60%) [Needs Prefix] [#2]"));
}

#[test]
fn test_missing_data_is_reported_separately() {
    let dataset = fixture();
    let resolver = LiteralResolver::new(&dataset);
    let browsers = resolve_or_empty(&resolver, "edge 15, edge 16");
    let flexbox = dataset.feature("flexbox").unwrap();
    let classification = classify_lenient(flexbox, &browser::parse_all(&browsers).unwrap());
    let report = FeatureReport::generate("flexbox", &flexbox.title, "", &classification, &resolver, &dataset);

    assert!(report.has_missing_data());
    assert_eq!(report.missing, vec!["edge 16"]);
    assert!(report.format_report(false).contains("No data (1 browsers, 0.30%)"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["buckets"][1]["status"], "?");
}

#[test]
fn test_config_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "CANIUSE_BROWSERS=\"chrome 56, ie 11\"").unwrap();
    writeln!(file, "CANIUSE_LIMIT=1").unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.browsers, "chrome 56, ie 11");
    assert_eq!(config.limit, 1);

    let dataset = fixture();
    let resolver = LiteralResolver::new(&dataset);
    assert_eq!(resolve_or_empty(&resolver, &config.browsers), vec!["chrome 56", "ie 11"]);
}

#[test]
fn test_dataset_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(include_str!("fixtures/data.json").as_bytes()).unwrap();

    let dataset = Dataset::from_file(file.path()).unwrap();
    assert_eq!(dataset.feature_ids(), vec!["css-grid", "fetch", "flexbox"]);
}
