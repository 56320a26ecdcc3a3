//! Engine configuration loaded from TOML.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use caseflow_contracts::error::{CaseflowError, CaseflowResult};
use caseflow_core::{
    clock::parse_instant, FixedClock, SystemClock, UuidIds, WorkflowEngine,
};

fn default_log_filter() -> String {
    "warn".to_string()
}

/// Host settings for one engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Pin "now" to this instant (RFC 3339 or `YYYY-MM-DD`). Unset means
    /// the wall clock.
    #[serde(default)]
    pub as_of: Option<String>,

    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// JSON case files to load, relative to the working directory.
    #[serde(default)]
    pub case_files: Vec<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            as_of: None,
            log_filter: default_log_filter(),
            case_files: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Parse `s` as TOML.
    ///
    /// Returns `CaseflowError::ConfigError` if the TOML is malformed, does
    /// not match the expected shape, or carries an unparseable `as_of`.
    pub fn from_toml_str(s: &str) -> CaseflowResult<Self> {
        let config: EngineConfig = toml::from_str(s).map_err(|e| CaseflowError::ConfigError {
            reason: format!("failed to parse engine TOML: {}", e),
        })?;
        config.fixed_now()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as TOML.
    pub fn from_file(path: &Path) -> CaseflowResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CaseflowError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        debug!(path = %path.display(), "loaded engine config");
        Self::from_toml_str(&contents)
    }

    /// The pinned instant, if any.
    pub fn fixed_now(&self) -> CaseflowResult<Option<DateTime<Utc>>> {
        match &self.as_of {
            None => Ok(None),
            Some(raw) => parse_instant(raw)
                .map(Some)
                .ok_or_else(|| CaseflowError::ConfigError {
                    reason: format!("as_of '{}' is not an RFC 3339 timestamp or YYYY-MM-DD date", raw),
                }),
        }
    }

    /// An engine using the pinned clock when `as_of` is set, otherwise the
    /// system clock. Ids are random UUIDs either way.
    ///
    /// Returns `CaseflowError::ConfigError` for an unparseable `as_of`; a bad
    /// pin never degrades to the wall clock.
    pub fn engine(&self) -> CaseflowResult<WorkflowEngine> {
        let engine = match self.fixed_now()? {
            Some(now) => WorkflowEngine::new(Box::new(FixedClock(now)), Box::new(UuidIds)),
            None => WorkflowEngine::new(Box::new(SystemClock), Box::new(UuidIds)),
        };
        Ok(engine)
    }
}
