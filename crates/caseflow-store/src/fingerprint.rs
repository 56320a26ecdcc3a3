//! Content fingerprints for optimistic concurrency.
//!
//! A fingerprint is the SHA-256 of the case's canonical JSON
//! (`serde_json::to_vec`, no pretty-printing). Any change to any field,
//! including a single task status, yields a different fingerprint.

use sha2::{Digest, Sha256};

use caseflow_contracts::{
    case::CaseSnapshot,
    error::{CaseflowError, CaseflowResult},
};

/// Lowercase 64-character hex SHA-256 over the case's canonical JSON.
pub fn fingerprint(case: &CaseSnapshot) -> CaseflowResult<String> {
    let json = serde_json::to_vec(case).map_err(|e| CaseflowError::SnapshotParse {
        reason: format!("case '{}' could not be serialized: {}", case.id, e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&json);
    Ok(hex::encode(hasher.finalize()))
}
