//! Simulated intake caseload for the caseflow reference runtime.
//!
//! All data in this module is hardcoded and fictional. Dates are built
//! relative to the instant passed in, so every scenario reads the same no
//! matter when it runs.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use caseflow_contracts::{
    case::{CaseDocument, CaseSnapshot, CaseStatus, DocumentType, TreatmentStatus},
    error::{CaseflowError, CaseflowResult},
    insurance::{
        CoverageStatus, Insurance, InsuranceParty, LiabilityStatus, PolicyLimitsStatus,
    },
    medical::{ErBillType, ErVisit, MedicalProvider, RequestStatus},
    task::{CaseTask, Recurrence, TaskPriority, TaskStatus, TaskType},
};
use caseflow_core::clock::{add_days, format_instant};

/// The instant every reference scenario is evaluated at.
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

fn days_ago(now: DateTime<Utc>, days: i64) -> String {
    format_instant(add_days(now, -days))
}

/// A task as staff would have left it in the case file.
fn staff_task(
    id: &str,
    case_id: &str,
    task_type: TaskType,
    status: TaskStatus,
    due: String,
    now: DateTime<Utc>,
) -> CaseTask {
    let completed_date = (status == TaskStatus::Completed).then(|| days_ago(now, 30));
    CaseTask {
        id: id.to_string(),
        case_id: case_id.to_string(),
        title: format!("{task_type:?}"),
        description: None,
        task_type,
        status,
        due_date: due,
        completed_date,
        priority: TaskPriority::Medium,
        recurrence: Recurrence::OneTime,
        created_at: days_ago(now, 60),
        auto_generated: false,
    }
}

// ── Whitfield: fresh intake (wire form) ──────────────────────────────────────

/// The Whitfield case exactly as the front end would send it.
///
/// Defendant coverage is pending and nothing has been started yet.
pub fn whitfield_intake_json(now: DateTime<Utc>) -> Value {
    json!({
        "id": "case-whitfield",
        "clientName": "Dana Whitfield",
        "status": "INTAKE_PROCESSING",
        "createdAt": days_ago(now, 1),
        "workflowInitialized": false,
        "insurance": [
            {
                "type": "Defendant",
                "provider": "Granite Mutual",
                "claimNumber": "GM-2026-44817",
                "coverageStatus": "pending"
            }
        ],
        "documents": [
            { "id": "doc-w1", "name": "intake-questionnaire.pdf", "type": "other" }
        ]
    })
}

/// Decode a case snapshot from its JSON wire form.
pub fn decode_case(value: Value) -> CaseflowResult<CaseSnapshot> {
    serde_json::from_value(value).map_err(|e| CaseflowError::SnapshotParse {
        reason: e.to_string(),
    })
}

pub fn whitfield_case(now: DateTime<Utc>) -> CaseflowResult<CaseSnapshot> {
    decode_case(whitfield_intake_json(now))
}

// ── Alvarez: aging requests ───────────────────────────────────────────────────

pub const ALVAREZ_ID: &str = "case-alvarez";

/// Four months in, onboarding done, several requests left unanswered.
///
/// At `now`:
/// - coverage pending 20 days
/// - Eastside bills requested 35 days ago, records 65 days ago
/// - Mercy General facility bill requested 95 days ago, ER records 40 days ago
/// - one staff follow-up task two days overdue
pub fn alvarez_case(now: DateTime<Utc>) -> CaseSnapshot {
    let mut case = CaseSnapshot::new(ALVAREZ_ID, "Jordan Alvarez", CaseStatus::Accepted, days_ago(now, 120));
    case.workflow_initialized = true;

    let mut defendant = Insurance::new(InsuranceParty::Defendant, "Granite Mutual");
    defendant.claim_number = Some("GM-2025-90311".to_string());
    defendant.coverage_status = Some(CoverageStatus::Pending);
    defendant.coverage_status_date = Some(days_ago(now, 20));
    defendant.liability_status = Some(LiabilityStatus::Accepted);
    defendant.liability_status_date = Some(days_ago(now, 45));
    case.insurance.push(defendant);

    let mut provider = MedicalProvider::new("prov-eastside", "Eastside Physical Therapy");
    provider.bill_request_status = Some(RequestStatus::Requested);
    provider.bill_request_date = Some(days_ago(now, 35));
    provider.records_request_status = Some(RequestStatus::Requested);
    provider.records_request_date = Some(days_ago(now, 65));
    case.medical_providers.push(provider);

    let mut visit = ErVisit::new("er-mercy", "Mercy General Hospital");
    visit.visit_date = Some(days_ago(now, 118));
    if let Some(line) = visit.bill_mut(ErBillType::Facility) {
        line.billing_entity = Some("Mercy General Patient Accounts".to_string());
        line.status = Some(RequestStatus::Requested);
        line.request_date = Some(days_ago(now, 95));
    }
    if let Some(line) = visit.bill_mut(ErBillType::Physician) {
        line.status = Some(RequestStatus::Received);
        line.amount = Some(1240.0);
    }
    if let Some(line) = visit.bill_mut(ErBillType::Radiology) {
        line.status = Some(RequestStatus::Na);
    }
    visit.record_status = Some(RequestStatus::Requested);
    visit.record_request_date = Some(days_ago(now, 40));
    case.er_visits.push(visit);

    case.documents.push(CaseDocument::new("doc-a1", "retainer-signed.pdf", DocumentType::Retainer));
    case.documents.push(CaseDocument::new("doc-a2", "hipaa-auth.pdf", DocumentType::Authorization));

    for (n, task_type) in [
        TaskType::Retainer,
        TaskType::Hipaa,
        TaskType::LorDefendant,
        TaskType::CrashReportRequest,
    ]
    .into_iter()
    .enumerate()
    {
        let id = format!("task-a{}", n + 1);
        case.tasks.push(staff_task(&id, ALVAREZ_ID, task_type, TaskStatus::Completed, days_ago(now, 100), now));
    }
    case.tasks.push(staff_task(
        "task-a5",
        ALVAREZ_ID,
        TaskType::CoverageFollowup,
        TaskStatus::Open,
        days_ago(now, 2),
        now,
    ));
    case
}

// ── Nakamura: ready for demand ───────────────────────────────────────────────

/// Every stage through pre-demand complete; the demand itself is outstanding.
pub fn nakamura_case(now: DateTime<Utc>) -> CaseSnapshot {
    let id = "case-nakamura";
    let mut case = CaseSnapshot::new(id, "Aiko Nakamura", CaseStatus::IntakeComplete, days_ago(now, 210));
    case.workflow_initialized = true;
    case.treatment_status = Some(TreatmentStatus::Completed);

    let mut defendant = Insurance::new(InsuranceParty::Defendant, "Cobalt Casualty");
    defendant.coverage_status = Some(CoverageStatus::Accepted);
    defendant.liability_status = Some(LiabilityStatus::Accepted);
    defendant.policy_limits_status = Some(PolicyLimitsStatus::Received);
    case.insurance.push(defendant);

    let mut provider = MedicalProvider::new("prov-lakeside", "Lakeside Orthopedics");
    provider.bill_request_status = Some(RequestStatus::Received);
    provider.records_request_status = Some(RequestStatus::Received);
    provider.total_cost = Some(4820.0);
    case.medical_providers.push(provider);

    for (doc_id, name, doc_type) in [
        ("doc-n1", "retainer-signed.pdf", DocumentType::Retainer),
        ("doc-n2", "hipaa-auth.pdf", DocumentType::Authorization),
        ("doc-n3", "crash-report-2025-0912.pdf", DocumentType::CrashReport),
        ("doc-n4", "scene-photos.zip", DocumentType::Photo),
        ("doc-n5", "lakeside-records.pdf", DocumentType::MedicalRecord),
    ] {
        case.documents.push(CaseDocument::new(doc_id, name, doc_type));
    }

    for (n, task_type) in [
        TaskType::Retainer,
        TaskType::Hipaa,
        TaskType::LorDefendant,
        TaskType::CrashReportRequest,
        TaskType::DemandPrep,
    ]
    .into_iter()
    .enumerate()
    {
        let task_id = format!("task-n{}", n + 1);
        case.tasks.push(staff_task(&task_id, id, task_type, TaskStatus::Completed, days_ago(now, 40), now));
    }
    case.tasks.push(staff_task("task-n6", id, TaskType::DemandSent, TaskStatus::Open, days_ago(now, -5), now));
    case
}

// ── Reyes: paused, never initialized ─────────────────────────────────────────

/// A paused case whose only provider carries a date nobody can parse.
pub fn reyes_case(now: DateTime<Utc>) -> CaseSnapshot {
    let mut case = CaseSnapshot::new("case-reyes", "Marisol Reyes", CaseStatus::IntakePaused, days_ago(now, 9));
    case.insurance.push(Insurance::new(InsuranceParty::Client, "Harbor Auto"));

    let mut provider = MedicalProvider::new("prov-summit", "Summit Chiropractic");
    provider.bill_request_status = Some(RequestStatus::Requested);
    provider.bill_request_date = Some("sometime in January".to_string());
    case.medical_providers.push(provider);
    case
}

// ── Inactive cases ────────────────────────────────────────────────────────────

/// A lead that has not been accepted yet.
pub fn okafor_lead(now: DateTime<Utc>) -> CaseSnapshot {
    let mut case = CaseSnapshot::new("case-okafor", "Chidi Okafor", CaseStatus::New, days_ago(now, 3));
    case.insurance.push(Insurance::new(InsuranceParty::Defendant, "Granite Mutual"));
    case
}

/// A declined case with stale requests that must stay quiet.
pub fn brennan_rejected(now: DateTime<Utc>) -> CaseSnapshot {
    let mut case = CaseSnapshot::new("case-brennan", "Siobhan Brennan", CaseStatus::Rejected, days_ago(now, 200));
    let mut provider = MedicalProvider::new("prov-harbor", "Harborview Clinic");
    provider.bill_request_status = Some(RequestStatus::Requested);
    provider.bill_request_date = Some(days_ago(now, 150));
    case.medical_providers.push(provider);
    case
}

/// The full reference caseload, in display order.
pub fn caseload(now: DateTime<Utc>) -> CaseflowResult<Vec<CaseSnapshot>> {
    Ok(vec![
        whitfield_case(now)?,
        alvarez_case(now),
        nakamura_case(now),
        reyes_case(now),
        okafor_lead(now),
        brennan_rejected(now),
    ])
}
