//! Help text database for command line errors
//!
//! Each error code can be looked up to get guidance on how to fix the
//! problem.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Help text entry for an error
#[derive(Debug, Clone)]
pub struct HelpEntry {
    /// Short title of the problem
    pub title: &'static str,
    /// Detailed explanation of the error
    pub explanation: &'static str,
    /// How to fix the issue
    pub fix: &'static str,
}

/// Get help text for an error code
pub fn get_help(error_code: &str) -> Option<&'static HelpEntry> {
    HELP_DATABASE.get(error_code).copied()
}

static HELP_DATABASE: LazyLock<HashMap<&'static str, &'static HelpEntry>> =
    LazyLock::new(|| {
        let mut map = HashMap::new();

        // Dataset errors
        map.insert("DATASET_NOT_CONFIGURED", &HELP_DATASET_NOT_CONFIGURED);
        map.insert("DATASET_NOT_FOUND", &HELP_DATASET_NOT_FOUND);
        map.insert("DATASET_INVALID", &HELP_DATASET_INVALID);
        map.insert("UNKNOWN_FEATURE", &HELP_UNKNOWN_FEATURE);

        // Data consistency errors
        map.insert("MISSING_SUPPORT_DATA", &HELP_MISSING_SUPPORT_DATA);
        map.insert("INVALID_SUPPORT_CODE", &HELP_INVALID_SUPPORT_CODE);

        // Query errors
        map.insert("INVALID_QUERY", &HELP_INVALID_QUERY);

        map
    });

const HELP_DATASET_NOT_CONFIGURED: HelpEntry = HelpEntry {
    title: "No dataset configured",
    explanation: "Feature support data is read from a caniuse data-2.0.json file, \
        and no path to one was given.",
    fix: "1. Pass --data /path/to/data-2.0.json\n\
        2. Or set CANIUSE_DATA in the environment or in ~/.caniuserc",
};

const HELP_DATASET_NOT_FOUND: HelpEntry = HelpEntry {
    title: "Dataset file not found",
    explanation: "The dataset path does not point to an existing file.",
    fix: "1. Check the path for typos\n\
        2. The file ships with the caniuse-db package as fulldata-json/data-2.0.json",
};

const HELP_DATASET_INVALID: HelpEntry = HelpEntry {
    title: "Dataset is not valid JSON",
    explanation: "The dataset file could not be parsed as the caniuse data-2.0 format.",
    fix: "1. Make sure the file is data-2.0.json and not another caniuse export\n\
        2. Re-download the file if it may be truncated",
};

const HELP_UNKNOWN_FEATURE: HelpEntry = HelpEntry {
    title: "Feature id not in dataset",
    explanation: "Features are addressed by their dataset id (e.g. 'flexbox', 'fetch').",
    fix: "1. Run with --list-features to see every id\n\
        2. Check the suggestions printed with the error",
};

const HELP_MISSING_SUPPORT_DATA: HelpEntry = HelpEntry {
    title: "Browser missing from the feature's support table",
    explanation: "The browser list names a version the dataset has no support data for, \
        usually because the dataset is older than the browser.",
    fix: "1. Update the dataset\n\
        2. Or run without --strict to list such browsers under 'No data'",
};

const HELP_INVALID_SUPPORT_CODE: HelpEntry = HelpEntry {
    title: "Malformed support code in dataset",
    explanation: "A support entry in the dataset is empty or has an empty footnote reference.",
    fix: "1. Update the dataset\n\
        2. Or run without --strict to list such browsers under 'No data'",
};

const HELP_INVALID_QUERY: HelpEntry = HelpEntry {
    title: "Browser query could not be resolved",
    explanation: "Queries are comma separated 'family version' entries that must exist \
        in the dataset's agents table.",
    fix: "1. Use dataset family keys (chrome, firefox, ios_saf, ...)\n\
        2. Use versions exactly as the dataset lists them (e.g. 10.0-10.2)",
};
