//! Stored case and apply-report types.

use serde::{Deserialize, Serialize};

use caseflow_contracts::case::CaseSnapshot;

/// A case as held by the store, with the version tokens a writer must
/// present to replace it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedCase {
    pub case: CaseSnapshot,

    /// `fingerprint(case)` at the time it was stored.
    pub fingerprint: String,

    /// Number of accepted writes since the case was first inserted (starts at 0).
    pub revision: u64,
}

/// What one serialized workflow application did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub case_id: String,
    /// Tasks appended by this application.
    pub created: usize,
    /// False when the engine returned the case unchanged and nothing was written.
    pub changed: bool,
    pub fingerprint: String,
    pub revision: u64,
}
