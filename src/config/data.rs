use serde::{Deserialize, Serialize};

use crate::{ArcPath, ArcStr, log::LogLevel};

/// Options for path-based configuration values.
#[derive(Debug, Clone, Copy)]
pub enum PathOpt {
    /// Directory where log files are stored. Unset means stderr only
    LogDir,
}

/// Options for numeric configuration values.
#[derive(Debug, Clone, Copy)]
pub enum USizeOpt {
    /// Seconds a rendered feed stays fresh in the cache
    CacheDuration,
    /// Timeout for upstream requests in seconds, 0 disables it
    Timeout,
    /// Maximum age of log files in days before they are deleted
    MaxAge,
}

/// Options for string configuration values.
#[derive(Debug, Clone, Copy)]
pub enum StrOpt {
    /// Base URL the channel feeds are fetched from
    Upstream,
}

/// The configuration data structure that holds all configurable values.
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Data {
    /// Port the HTTP server listens on
    port: u16,
    /// Base URL of the feed upstream
    upstream: ArcStr,
    /// Seconds a rendered feed stays fresh
    cache_duration: usize,
    /// Upstream request timeout in seconds
    timeout: usize,
    /// Minimum level printed to stderr
    log_level: LogLevel,
    /// Directory where log files are stored
    log_dir: Option<ArcPath>,
    /// Maximum age of log files in days
    max_age: usize,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            port: 3000,
            upstream: ArcStr::from("https://www.youtube.com"),
            cache_duration: 3600,
            timeout: 0,
            log_level: LogLevel::Info,
            log_dir: None,
            max_age: 0,
        }
    }
}

impl Data {
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    pub fn path(&self, opt: PathOpt) -> Option<ArcPath> {
        match opt {
            PathOpt::LogDir => self.log_dir.clone(),
        }
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn set_log_level(&mut self, level: LogLevel) {
        self.log_level = level;
    }

    pub fn usize(&self, opt: USizeOpt) -> usize {
        match opt {
            USizeOpt::CacheDuration => self.cache_duration,
            USizeOpt::Timeout => self.timeout,
            USizeOpt::MaxAge => self.max_age,
        }
    }

    pub fn str(&self, opt: StrOpt) -> ArcStr {
        match opt {
            StrOpt::Upstream => self.upstream.clone(),
        }
    }
}
