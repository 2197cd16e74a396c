/// Explorer configuration — chunking, history bounds, and default ordering.
///
/// Every field has a default, so an empty JSON object (or no file at all)
/// gives a working configuration.
use crate::error::ConfigError;
use crate::history::MAX_NAV_HISTORY;
use crate::scanner::DEFAULT_CHUNK_SIZE;
use crate::store::SortKey;
use crate::supervisor::MAX_EVENTS_PER_DRAIN;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorerConfig {
    /// Rows per chunk sent from a scan thread.
    pub chunk_size: usize,
    /// Maximum entries kept on each of the back and forward stacks.
    pub history_limit: usize,
    /// Maximum scan messages applied per `process_events` call.
    pub max_events_per_drain: usize,
    /// Order applied when a scan completes.
    pub default_sort: SortKey,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            history_limit: MAX_NAV_HISTORY,
            max_events_per_drain: MAX_EVENTS_PER_DRAIN,
            default_sort: SortKey::default(),
        }
    }
}

impl ExplorerConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::Invalid("chunk_size must be at least 1".into()));
        }
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid("history_limit must be at least 1".into()));
        }
        if self.max_events_per_drain == 0 {
            return Err(ConfigError::Invalid(
                "max_events_per_drain must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
