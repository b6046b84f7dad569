//! Browser query resolution
//!
//! A resolver turns a user-entered query into `"family version"` strings
//! and reports their usage coverage. The full browserslist grammar
//! (`> 0.25%`, `last 2 versions`, ...) lives outside this crate; the
//! [`LiteralResolver`] here only accepts explicit browser lists.

use crate::browser::{BrowserId, BrowserIdError};
use crate::dataset::Dataset;
use thiserror::Error;

/// Errors produced while resolving a query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("malformed browser query entry: {0}")]
    Malformed(#[from] BrowserIdError),
    #[error("unknown browser version '{0}'")]
    UnknownBrowser(String),
}

/// Resolves browser queries into concrete browser lists
pub trait BrowserResolver {
    /// Resolve a query into `"family version"` strings
    fn resolve(&self, query: &str) -> Result<Vec<String>, ResolveError>;

    /// Global usage of the given browsers, in percent
    fn coverage(&self, browsers: &[String]) -> f64;
}

/// Resolve `query`, treating any failure as "no browsers matched"
pub fn resolve_or_empty<R: BrowserResolver + ?Sized>(resolver: &R, query: &str) -> Vec<String> {
    match resolver.resolve(query) {
        Ok(browsers) => browsers,
        Err(e) => {
            tracing::warn!(query, "browser query did not resolve: {}", e);
            Vec::new()
        }
    }
}

/// Resolver for comma separated `"family version"` lists.
///
/// Families are matched case-insensitively against the dataset's agents
/// and every version must be listed there.
pub struct LiteralResolver<'a> {
    dataset: &'a Dataset,
}

impl<'a> LiteralResolver<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    fn resolve_entry(&self, entry: &str) -> Result<String, ResolveError> {
        let parsed = BrowserId::parse(entry)?;
        let browser = BrowserId::new(parsed.family.to_lowercase(), parsed.version.trim());

        if !self.dataset.knows_browser(&browser) {
            return Err(ResolveError::UnknownBrowser(entry.to_string()));
        }
        Ok(browser.to_string())
    }
}

impl BrowserResolver for LiteralResolver<'_> {
    fn resolve(&self, query: &str) -> Result<Vec<String>, ResolveError> {
        let mut browsers: Vec<String> = Vec::new();
        for entry in query.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let browser = self.resolve_entry(entry)?;
            if !browsers.contains(&browser) {
                browsers.push(browser);
            }
        }
        Ok(browsers)
    }

    fn coverage(&self, browsers: &[String]) -> f64 {
        self.dataset.coverage(browsers)
    }
}
