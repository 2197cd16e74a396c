/// Error types for the few fallible operations outside the scan path.
///
/// Scanning itself never fails: unreadable entries and directories degrade
/// to missing metadata or an empty listing. Only pattern compilation and
/// configuration loading report errors to the caller.
use std::path::PathBuf;
use thiserror::Error;

/// A name filter pattern could not be compiled.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid pattern '{pattern}': {reason}")]
    Invalid { pattern: String, reason: String },
}

/// A configuration file could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
