//! In-memory case store.
//!
//! `InMemoryCaseStore` keeps every case behind one `Mutex`. Workflow
//! application runs entirely under that lock, so two callers can never both
//! decide from the same task list that a reminder is missing. Writers that
//! edit a case outside the engine use `commit` with the fingerprint they read;
//! a mismatch means someone else wrote first.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::{debug, info, warn};

use caseflow_contracts::{
    alert::ReminderAlert,
    case::CaseSnapshot,
    error::{CaseflowError, CaseflowResult},
};
use caseflow_core::WorkflowEngine;

use crate::{
    fingerprint::fingerprint,
    versioned::{ApplyReport, VersionedCase},
};

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct StoreState {
    /// Keyed by case id; ordered so listings are stable.
    pub(crate) cases: BTreeMap<String, VersionedCase>,
}

// ── Public store ──────────────────────────────────────────────────────────────

/// A shareable, in-memory case store. Clones share the same cases.
#[derive(Clone)]
pub struct InMemoryCaseStore {
    pub(crate) state: Arc<Mutex<StoreState>>,
}

impl Default for InMemoryCaseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCaseStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                cases: BTreeMap::new(),
            })),
        }
    }

    fn lock(&self) -> CaseflowResult<MutexGuard<'_, StoreState>> {
        self.state.lock().map_err(|e| CaseflowError::StoreUnavailable {
            reason: format!("case store lock poisoned: {}", e),
        })
    }

    /// Insert or replace a case unconditionally. Returns its fingerprint.
    ///
    /// Meant for seeding; concurrent editors should use `commit`.
    pub fn insert(&self, case: CaseSnapshot) -> CaseflowResult<String> {
        let fp = fingerprint(&case)?;
        let mut state = self.lock()?;
        let revision = state
            .cases
            .get(&case.id)
            .map(|existing| existing.revision + 1)
            .unwrap_or(0);

        debug!(case_id = %case.id, revision, "case inserted");
        state.cases.insert(
            case.id.clone(),
            VersionedCase {
                case,
                fingerprint: fp.clone(),
                revision,
            },
        );
        Ok(fp)
    }

    /// The current version of a case.
    pub fn get(&self, case_id: &str) -> CaseflowResult<VersionedCase> {
        let state = self.lock()?;
        state
            .cases
            .get(case_id)
            .cloned()
            .ok_or_else(|| CaseflowError::CaseNotFound {
                case_id: case_id.to_string(),
            })
    }

    /// Every stored case, ordered by id.
    pub fn cases(&self) -> CaseflowResult<Vec<CaseSnapshot>> {
        let state = self.lock()?;
        Ok(state.cases.values().map(|v| v.case.clone()).collect())
    }

    /// Replace a case only if it still has `expected_fingerprint`.
    ///
    /// Returns the new fingerprint, or `StaleSnapshot` when another writer
    /// got there first.
    pub fn commit(&self, case: CaseSnapshot, expected_fingerprint: &str) -> CaseflowResult<String> {
        let fp = fingerprint(&case)?;
        let mut state = self.lock()?;
        let current = state
            .cases
            .get_mut(&case.id)
            .ok_or_else(|| CaseflowError::CaseNotFound {
                case_id: case.id.clone(),
            })?;

        if current.fingerprint != expected_fingerprint {
            warn!(
                case_id = %case.id,
                expected = %expected_fingerprint,
                actual = %current.fingerprint,
                "rejected write against stale snapshot"
            );
            return Err(CaseflowError::StaleSnapshot {
                case_id: case.id.clone(),
                expected: expected_fingerprint.to_string(),
                actual: current.fingerprint.clone(),
            });
        }

        current.revision += 1;
        current.fingerprint = fp.clone();
        current.case = case;
        debug!(case_id = %current.case.id, revision = current.revision, "case committed");
        Ok(fp)
    }

    /// Run the workflow engine against the stored case and write the result
    /// back, all under the store lock.
    pub fn apply_workflow(&self, case_id: &str, engine: &WorkflowEngine) -> CaseflowResult<ApplyReport> {
        let mut state = self.lock()?;
        let current = state
            .cases
            .get_mut(case_id)
            .ok_or_else(|| CaseflowError::CaseNotFound {
                case_id: case_id.to_string(),
            })?;

        let run = engine.run(&current.case);
        let created = run.created;
        let updated = match run.case {
            std::borrow::Cow::Borrowed(_) => None,
            std::borrow::Cow::Owned(updated) => Some(updated),
        };

        let Some(updated) = updated else {
            debug!(case_id, "workflow produced no change");
            return Ok(ApplyReport {
                case_id: case_id.to_string(),
                created: 0,
                changed: false,
                fingerprint: current.fingerprint.clone(),
                revision: current.revision,
            });
        };

        current.fingerprint = fingerprint(&updated)?;
        current.revision += 1;
        current.case = updated;

        info!(
            case_id,
            created,
            revision = current.revision,
            "workflow applied and stored"
        );

        Ok(ApplyReport {
            case_id: case_id.to_string(),
            created,
            changed: true,
            fingerprint: current.fingerprint.clone(),
            revision: current.revision,
        })
    }

    /// Apply the workflow to every stored case, in id order.
    pub fn apply_all(&self, engine: &WorkflowEngine) -> CaseflowResult<Vec<ApplyReport>> {
        let ids: Vec<String> = {
            let state = self.lock()?;
            state.cases.keys().cloned().collect()
        };
        ids.iter().map(|id| self.apply_workflow(id, engine)).collect()
    }

    /// Dashboard alerts over the current contents of the store.
    pub fn dashboard(&self, engine: &WorkflowEngine) -> CaseflowResult<Vec<ReminderAlert>> {
        let cases = self.cases()?;
        Ok(engine.all_reminders(&cases))
    }
}
