//! # caseflow-config
//!
//! TOML configuration for hosting the caseflow engine.
//!
//! ## Overview
//!
//! The escalation thresholds are fixed in code and are not configurable.
//! What a host does configure is the environment the engine runs in:
//! which instant counts as "now", how verbosely to log, and where case
//! files live.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use caseflow_config::EngineConfig;
//!
//! let config = EngineConfig::from_file(Path::new("caseflow.toml"))?;
//! let engine = config.engine()?;
//! ```
//!
//! ## Example
//!
//! ```toml
//! as_of = "2026-03-01T12:00:00Z"
//! log_filter = "caseflow_core=debug"
//! case_files = ["cases/whitfield.json"]
//! ```

pub mod config;

pub use config::EngineConfig;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::{TimeZone, Utc};

    use caseflow_contracts::error::CaseflowError;

    use crate::EngineConfig;

    // ── 1. defaults ───────────────────────────────────────────────────────────

    /// An empty document is a valid configuration.
    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();

        assert_eq!(config.as_of, None);
        assert_eq!(config.log_filter, "warn");
        assert!(config.case_files.is_empty());
        assert_eq!(config.fixed_now().unwrap(), None);
    }

    // ── 2. full document ──────────────────────────────────────────────────────

    #[test]
    fn test_full_config() {
        let toml = r#"
            as_of = "2026-03-01T12:00:00Z"
            log_filter = "caseflow_core=debug"
            case_files = ["cases/a.json", "cases/b.json"]
        "#;

        let config = EngineConfig::from_toml_str(toml).unwrap();

        assert_eq!(config.log_filter, "caseflow_core=debug");
        assert_eq!(
            config.case_files,
            vec![PathBuf::from("cases/a.json"), PathBuf::from("cases/b.json")]
        );
        assert_eq!(
            config.fixed_now().unwrap(),
            Some(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap())
        );
    }

    // ── 3. date-only as_of ────────────────────────────────────────────────────

    #[test]
    fn test_date_only_as_of_is_midnight_utc() {
        let config = EngineConfig::from_toml_str(r#"as_of = "2026-03-01""#).unwrap();
        let engine = config.engine().unwrap();

        assert_eq!(engine.now(), Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap());
    }

    // ── 4. bad as_of ──────────────────────────────────────────────────────────

    /// An unparseable `as_of` is rejected at load time rather than silently
    /// falling back to the wall clock.
    #[test]
    fn test_unparseable_as_of_is_config_error() {
        let result = EngineConfig::from_toml_str(r#"as_of = "last thursday""#);

        match result {
            Err(CaseflowError::ConfigError { reason }) => {
                assert!(reason.contains("last thursday"), "unexpected reason: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    // ── 5. TOML parse error ───────────────────────────────────────────────────

    #[test]
    fn test_toml_parse_error() {
        let result = EngineConfig::from_toml_str("this is not valid toml ][[[");

        match result {
            Err(CaseflowError::ConfigError { reason }) => {
                assert!(
                    reason.contains("failed to parse engine TOML"),
                    "expected parse error message, got: {reason}"
                );
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    // ── 6. missing file ───────────────────────────────────────────────────────

    #[test]
    fn test_missing_file_is_config_error() {
        let result = EngineConfig::from_file(std::path::Path::new("/nonexistent/caseflow.toml"));
        assert!(matches!(result, Err(CaseflowError::ConfigError { .. })));
    }

    // ── 7. shipped demo config ────────────────────────────────────────────────

    const DEMO_CONFIG: &str = include_str!("../../../demo/caseflow.toml");

    /// The config shipped with the demo CLI loads and pins the clock.
    #[test]
    fn test_demo_config_loads() {
        let config = EngineConfig::from_toml_str(DEMO_CONFIG).unwrap();

        assert_eq!(config.log_filter, "warn,caseflow_core=info");
        assert_eq!(
            config.engine().unwrap().now(),
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
        );
    }

    // ── 8. bad as_of on a hand-built config ───────────────────────────────────

    /// A config built in code skips `from_toml_str` validation; `engine`
    /// must still refuse the bad pin instead of using the wall clock.
    #[test]
    fn test_engine_rejects_unparseable_as_of() {
        let config = EngineConfig {
            as_of: Some("last thursday".to_string()),
            ..EngineConfig::default()
        };

        assert!(config.fixed_now().is_err());
        match config.engine() {
            Err(CaseflowError::ConfigError { reason }) => {
                assert!(reason.contains("last thursday"), "unexpected reason: {reason}");
            }
            Err(other) => panic!("expected ConfigError, got {:?}", other),
            Ok(engine) => panic!("expected ConfigError, engine runs at {}", engine.now()),
        }
    }
}
