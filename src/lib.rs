// Library interface for caniuse-next
// The binary, tests and benchmarks all go through these modules.

pub mod browser;
pub mod compact;
pub mod config;
pub mod dataset;
pub mod error;
pub mod labels;
pub mod report;
pub mod resolver;
pub mod support;

pub use browser::BrowserId;
pub use compact::{compact, compact_ranges, FamilyNames, RangeKind, VersionRange};
pub use dataset::{Dataset, FeatureLookup, FeatureRecord};
pub use error::CaniuseError;
pub use report::{BrowserSummary, FeatureReport};
pub use resolver::{resolve_or_empty, BrowserResolver, LiteralResolver};
pub use support::{classify, classify_lenient, Classification, NoteCollection, StatusClass, SupportBucket};
