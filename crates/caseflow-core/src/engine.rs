//! The workflow engine: the one entry point callers hold.
//!
//! Per case mutation cycle the caller runs:
//!
//!   Snapshot → Stage evaluation (display) → Initial tasks + Reminders → Merge
//!
//! `apply` never mutates its input. It borrows the input back unchanged when
//! there is nothing to do, so callers can detect "no change" by pointer
//! identity (`Cow::Borrowed`) without a deep comparison.
//!
//! Idempotency is computed against the snapshot's current task list. Two
//! concurrent `apply` calls on the same stale snapshot would each emit the
//! same reminders; callers must serialize application per case (see
//! `caseflow-store`).

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use caseflow_contracts::{
    alert::{CaseAlerts, ReminderAlert},
    case::{ActivityKind, ActivityLog, CaseSnapshot},
    stage::{StageProgress, StageReport},
    task::CaseTask,
};

use crate::{
    alerts,
    clock::{format_instant, SystemClock},
    ids::UuidIds,
    onboarding, reminders, stages,
    traits::{Clock, IdSource},
};

/// Result of one `run`: the (possibly unchanged) case plus its stage report.
#[derive(Debug)]
pub struct WorkflowRun<'a> {
    pub case: Cow<'a, CaseSnapshot>,
    /// Tasks appended by this run.
    pub created: usize,
    pub stages: StageReport,
}

/// Holds the injected capabilities and exposes every engine operation.
pub struct WorkflowEngine {
    clock: Box<dyn Clock>,
    ids: Box<dyn IdSource>,
}

impl WorkflowEngine {
    pub fn new(clock: Box<dyn Clock>, ids: Box<dyn IdSource>) -> Self {
        Self { clock, ids }
    }

    /// Wall clock and random UUIDs.
    pub fn system() -> Self {
        Self::new(Box::new(SystemClock), Box::new(UuidIds))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn evaluate_stages(&self, case: &CaseSnapshot) -> Vec<StageProgress> {
        stages::evaluate(case)
    }

    pub fn stage_report(&self, case: &CaseSnapshot) -> StageReport {
        stages::report(case)
    }

    pub fn generate_initial_tasks(&self, case: &CaseSnapshot) -> Vec<CaseTask> {
        onboarding::generate(case, self.clock.now(), self.ids.as_ref())
    }

    pub fn generate_reminders(&self, case: &CaseSnapshot) -> Vec<CaseTask> {
        reminders::generate(case, self.clock.now(), self.ids.as_ref())
    }

    /// Dashboard alerts across `cases`, most urgent first.
    pub fn all_reminders(&self, cases: &[CaseSnapshot]) -> Vec<ReminderAlert> {
        alerts::collect(cases, self.clock.now())
    }

    /// Dashboard alerts grouped per case.
    pub fn alerts_by_case(&self, cases: &[CaseSnapshot]) -> Vec<CaseAlerts> {
        alerts::group_by_case(&self.all_reminders(cases))
    }

    /// Merge newly generated tasks into `case`.
    ///
    /// - Nothing new on an already-initialized case: borrowed, untouched.
    /// - Otherwise: new tasks appended, one summary log entry prepended when
    ///   any were created, and `workflow_initialized` set.
    ///
    /// Inactive cases get no tasks (both generators return nothing for
    /// them) but follow the same rule for the initialized flag.
    pub fn apply<'a>(&self, case: &'a CaseSnapshot) -> Cow<'a, CaseSnapshot> {
        self.merge(case, self.clock.now()).0
    }

    /// `apply` plus the stage report for display.
    pub fn run<'a>(&self, case: &'a CaseSnapshot) -> WorkflowRun<'a> {
        let (case, created) = self.merge(case, self.clock.now());
        let stages = stages::report(&case);
        debug!(
            case_id = %case.id,
            current_stage = ?stages.current_stage,
            percent_complete = stages.percent_complete,
            "stage report"
        );
        WorkflowRun {
            case,
            created,
            stages,
        }
    }

    fn merge<'a>(&self, case: &'a CaseSnapshot, now: DateTime<Utc>) -> (Cow<'a, CaseSnapshot>, usize) {
        let ids = self.ids.as_ref();
        let mut new_tasks = onboarding::generate(case, now, ids);
        new_tasks.extend(reminders::generate(case, now, ids));

        if new_tasks.is_empty() && case.workflow_initialized {
            debug!(case_id = %case.id, "no new tasks, case unchanged");
            return (Cow::Borrowed(case), 0);
        }

        let created = new_tasks.len();
        let mut updated = case.clone();
        updated.tasks.extend(new_tasks);
        if created > 0 {
            updated.activity_log.insert(
                0,
                ActivityLog {
                    id: ids.next_id("log"),
                    kind: ActivityKind::System,
                    message: summary_message(created),
                    timestamp: format_instant(now),
                    author: None,
                },
            );
        }
        updated.workflow_initialized = true;

        info!(case_id = %updated.id, count = created, "workflow applied");
        (Cow::Owned(updated), created)
    }
}

impl Default for WorkflowEngine {
    fn default() -> Self {
        Self::system()
    }
}

fn summary_message(count: usize) -> String {
    if count == 1 {
        "Workflow engine created 1 task".to_string()
    } else {
        format!("Workflow engine created {count} tasks")
    }
}
