//! Shared builders for the engine's unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};

use caseflow_contracts::{
    case::{CaseSnapshot, CaseStatus},
    insurance::{Insurance, InsuranceParty},
    medical::{MedicalProvider, RequestStatus},
    task::{CaseTask, Recurrence, TaskPriority, TaskStatus, TaskType},
};

use crate::{clock::format_instant, FixedClock, SequentialIds, WorkflowEngine};

pub(crate) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

/// `now()` shifted by `days`, in wire form.
pub(crate) fn days_from_now(days: i64) -> String {
    format_instant(now() + Duration::days(days))
}

pub(crate) fn days_ago(days: i64) -> String {
    days_from_now(-days)
}

pub(crate) fn engine() -> WorkflowEngine {
    WorkflowEngine::new(Box::new(FixedClock(now())), Box::new(SequentialIds::new()))
}

/// An active case opened two days ago with nothing attached.
pub(crate) fn active_case(id: &str) -> CaseSnapshot {
    CaseSnapshot::new(id, "Jordan Alvarez", CaseStatus::IntakeProcessing, days_ago(2))
}

pub(crate) fn defendant() -> Insurance {
    Insurance::new(InsuranceParty::Defendant, "Granite Mutual")
}

/// A provider whose bill request went out `days` ago.
pub(crate) fn provider_with_bill_request(id: &str, days: i64) -> MedicalProvider {
    let mut provider = MedicalProvider::new(id, "Eastside Physical Therapy");
    provider.bill_request_status = Some(RequestStatus::Requested);
    provider.bill_request_date = Some(days_ago(days));
    provider
}

pub(crate) fn task(id: &str, case_id: &str, task_type: TaskType, status: TaskStatus) -> CaseTask {
    CaseTask {
        id: id.to_string(),
        case_id: case_id.to_string(),
        title: format!("{task_type:?}"),
        description: None,
        task_type,
        status,
        due_date: days_from_now(3),
        completed_date: None,
        priority: TaskPriority::Medium,
        recurrence: Recurrence::OneTime,
        created_at: days_ago(1),
        auto_generated: false,
    }
}
