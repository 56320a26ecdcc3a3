//! Error types for the fallible edges around the caseflow engine.
//!
//! The rules engine itself never fails: malformed input degrades to
//! "generate nothing". Errors only arise where the engine meets the outside
//! world: configuration files, case JSON and the case store.

use thiserror::Error;

/// The unified error type for the caseflow crates.
#[derive(Debug, Error)]
pub enum CaseflowError {
    /// A configuration value is missing, unreadable or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A case snapshot could not be decoded from its serialized form.
    #[error("case snapshot could not be parsed: {reason}")]
    SnapshotParse { reason: String },

    /// The store holds no case with the requested id.
    #[error("case '{case_id}' not found")]
    CaseNotFound { case_id: String },

    /// A write was based on a snapshot that has since been replaced.
    ///
    /// Callers must reload the case and re-run the workflow; applying to a
    /// stale snapshot could emit reminders that already exist.
    #[error("case '{case_id}' changed since it was read (expected {expected}, found {actual})")]
    StaleSnapshot {
        case_id: String,
        expected: String,
        actual: String,
    },

    /// The store's internal lock was poisoned by a panicking writer.
    #[error("case store unavailable: {reason}")]
    StoreUnavailable { reason: String },
}

/// Convenience alias used throughout the caseflow crates.
pub type CaseflowResult<T> = Result<T, CaseflowError>;
