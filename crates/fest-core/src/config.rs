//! Festival resolver configuration.
//!
//! [`FestivalConfig`] holds the two settings a resolver needs at
//! construction: where the rule source lives and which time zone input dates
//! are interpreted in.  It is a plain value passed to the constructor, not a
//! process-wide singleton, so several resolvers with different rule files can
//! coexist.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Rule file used when no path is configured.
pub const DEFAULT_RULE_SOURCE: &str = "./festival.json";

/// Time-zone name meaning "the system's local zone".
pub const LOCAL_TIME_ZONE: &str = "Local";

/// Configuration for a festival resolver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FestivalConfig {
    /// Path of the JSON rule source.
    pub rule_source_path: PathBuf,
    /// IANA time-zone name, or `"Local"` for the system zone.
    pub time_zone: String,
}

impl Default for FestivalConfig {
    fn default() -> Self {
        Self {
            rule_source_path: PathBuf::from(DEFAULT_RULE_SOURCE),
            time_zone: LOCAL_TIME_ZONE.to_string(),
        }
    }
}

impl FestivalConfig {
    /// Create a configuration from a rule-source path and a time-zone name.
    ///
    /// Empty values fall back to the defaults.
    pub fn new(rule_source_path: impl AsRef<Path>, time_zone: &str) -> Self {
        Self::default()
            .with_rule_source(rule_source_path)
            .with_time_zone(time_zone)
    }

    /// Replace the rule-source path.  An empty path keeps the current one.
    pub fn with_rule_source(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() {
            self.rule_source_path = path.to_path_buf();
        }
        self
    }

    /// Replace the time-zone name.  An empty name keeps the current one.
    pub fn with_time_zone(mut self, time_zone: &str) -> Self {
        let tz = time_zone.trim();
        if !tz.is_empty() {
            self.time_zone = tz.to_string();
        }
        self
    }
}
