//! Configuration parsing from .caniuserc
//!
//! Recognised settings (file lines or environment variables):
//! - CANIUSE_DATA (path to data-2.0.json)
//! - CANIUSE_BROWSERS (browser query, comma separated "family version")
//! - CANIUSE_LIMIT (maximum number of features rendered)
//! - CANIUSE_COLOR (auto, always, never)
//!
//! Environment variables override the file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Browsers used when nothing else is configured: the oldest version of
/// each family in the 2019 support baseline
pub const DEFAULT_BROWSERS: &str = "chrome 56, firefox 51, safari 10, ios_saf 10.0-10.2, edge 15, ie 11";

/// Default number of features rendered
pub const DEFAULT_LIMIT: usize = 10;

/// When to emit ANSI colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }

    /// Resolve `Auto` against the terminal and NO_COLOR
    pub fn enabled(&self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                atty::is(atty::Stream::Stdout) && std::env::var("NO_COLOR").is_err()
            }
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_path: Option<PathBuf>,
    pub browsers: String,
    pub limit: usize,
    pub color: ColorChoice,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            browsers: DEFAULT_BROWSERS.to_string(),
            limit: DEFAULT_LIMIT,
            color: ColorChoice::Auto,
        }
    }
}

impl Config {
    /// Load ~/.caniuserc (if any) and apply environment overrides
    pub fn load() -> Self {
        let mut config = Self::from_file(&Self::rc_path()).unwrap_or_default();
        config.apply_env(std::env::vars());
        config
    }

    /// Get the path to .caniuserc
    pub fn rc_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".caniuserc")
    }

    /// Parse configuration from a specific file
    pub fn from_file(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        tracing::debug!(path = %path.display(), "reading config file");
        Some(Self::parse(&content))
    }

    /// Parse configuration from content string
    pub fn parse(content: &str) -> Self {
        let mut values = HashMap::new();

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);

            if let Some((key, value)) = line.split_once('=') {
                values.insert(key.trim().to_string(), unquote(value.trim()).to_string());
            }
        }

        let mut config = Config::default();
        config.apply_env(values);
        config
    }

    /// Apply `CANIUSE_*` key/value pairs on top of the current settings
    pub fn apply_env<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            match key.as_str() {
                "CANIUSE_DATA" if !value.is_empty() => {
                    self.data_path = Some(PathBuf::from(value));
                }
                "CANIUSE_BROWSERS" => self.browsers = value,
                "CANIUSE_LIMIT" => match value.parse() {
                    Ok(limit) => self.limit = limit,
                    Err(_) => tracing::warn!(value = %value, "ignoring invalid CANIUSE_LIMIT"),
                },
                "CANIUSE_COLOR" => self.color = ColorChoice::from_str(&value),
                _ => {}
            }
        }
    }
}

/// Strip one pair of matching surrounding quotes
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
