//! Stage evaluator: checklist completion and gating across the eight
//! pipeline stages.
//!
//! Gating is strictly linear. Walking the stages in order:
//!
//! 1. A stage whose items are all done is `Complete`.
//! 2. Otherwise it is `Blocked` if any earlier stage is incomplete,
//!    else `Active`.
//!
//! A later stage never becomes workable while an earlier one is unfinished,
//! even if its own items happen to be done.

use caseflow_contracts::{
    case::{CaseSnapshot, DocumentType, TreatmentStatus},
    insurance::{CoverageStatus, LiabilityStatus, PolicyLimitsStatus},
    medical::RequestStatus,
    stage::{ChecklistItem, Stage, StageProgress, StageReport, StageStatus},
    task::TaskType,
};

/// Evaluate all eight stages, in pipeline order.
pub fn evaluate(case: &CaseSnapshot) -> Vec<StageProgress> {
    let mut previous_complete = true;

    Stage::ORDERED
        .iter()
        .map(|&stage| {
            let items = checklist(stage, case);
            let total = items.len();
            let completed = items.iter().filter(|item| item.done).count();
            let all_done = completed == total;

            let status = if all_done {
                StageStatus::Complete
            } else if !previous_complete {
                StageStatus::Blocked
            } else {
                StageStatus::Active
            };
            previous_complete &= all_done;

            StageProgress {
                stage,
                items,
                completed,
                total,
                status,
            }
        })
        .collect()
}

/// Evaluate all stages and roll them up for a case header.
pub fn report(case: &CaseSnapshot) -> StageReport {
    let stages = evaluate(case);

    let current_stage = stages
        .iter()
        .find(|progress| progress.status != StageStatus::Complete)
        .map(|progress| progress.stage);

    let total: usize = stages.iter().map(|p| p.total).sum();
    let completed: usize = stages.iter().map(|p| p.completed).sum();
    let percent_complete = if total == 0 {
        100
    } else {
        // completed <= total, so this is at most 100.
        (completed * 100 / total) as u8
    };

    StageReport {
        stages,
        current_stage,
        percent_complete,
    }
}

/// The checklist a stage owns for this case.
pub fn checklist(stage: Stage, case: &CaseSnapshot) -> Vec<ChecklistItem> {
    match stage {
        Stage::Intake => intake_items(case),
        Stage::Investigation => investigation_items(case),
        Stage::Insurance => insurance_items(case),
        Stage::Treatment => treatment_items(case),
        Stage::RecordsRequests => records_items(case, RequestStatus::is_sent, "requested", false),
        Stage::RecordsCollection => {
            records_items(case, RequestStatus::is_settled, "received", true)
        }
        Stage::PreDemand => pre_demand_items(case),
        Stage::Demand => demand_items(case),
    }
}

fn intake_items(case: &CaseSnapshot) -> Vec<ChecklistItem> {
    let mut items = vec![
        ChecklistItem::new(
            "Retainer signed",
            case.has_document(DocumentType::Retainer) || case.has_completed_task(TaskType::Retainer),
        ),
        ChecklistItem::new(
            "HIPAA authorization signed",
            case.has_document(DocumentType::Authorization)
                || case.has_completed_task(TaskType::Hipaa),
        ),
        ChecklistItem::new(
            "LOR sent to defendant insurer",
            case.has_completed_task(TaskType::LorDefendant),
        ),
    ];

    if case.client_insurance().is_some() {
        items.push(ChecklistItem::new(
            "LOR sent to client insurer",
            case.has_completed_task(TaskType::LorClientIns),
        ));
    }
    items
}

fn investigation_items(case: &CaseSnapshot) -> Vec<ChecklistItem> {
    vec![
        ChecklistItem::new("Crash report obtained", case.has_document(DocumentType::CrashReport)),
        ChecklistItem::new("Scene and injury photos collected", case.has_document(DocumentType::Photo)),
        ChecklistItem::new("Defendant insurer identified", case.defendant_insurance().is_some()),
    ]
}

fn insurance_items(case: &CaseSnapshot) -> Vec<ChecklistItem> {
    let defendant = case.defendant_insurance();
    vec![
        ChecklistItem::new(
            "Defendant coverage confirmed",
            defendant.is_some_and(|ins| ins.coverage_status == Some(CoverageStatus::Accepted)),
        ),
        ChecklistItem::new(
            "Defendant liability accepted",
            defendant.is_some_and(|ins| ins.liability_status == Some(LiabilityStatus::Accepted)),
        ),
        ChecklistItem::new(
            "Policy limits received",
            defendant.is_some_and(|ins| {
                matches!(
                    ins.policy_limits_status,
                    Some(PolicyLimitsStatus::Received | PolicyLimitsStatus::Na)
                )
            }),
        ),
    ]
}

fn treatment_items(case: &CaseSnapshot) -> Vec<ChecklistItem> {
    vec![
        ChecklistItem::new(
            "Treatment documented",
            case.has_document(DocumentType::MedicalRecord),
        ),
        ChecklistItem::new(
            "Treatment completed",
            case.treatment_status == Some(TreatmentStatus::Completed),
        ),
    ]
}

/// One item per provider bill, provider records, ER bill line and ER record.
///
/// With no providers or visits on file a single placeholder stands in:
/// not done for requests, done for collection.
fn records_items(
    case: &CaseSnapshot,
    satisfied: fn(Option<RequestStatus>) -> bool,
    verb: &str,
    placeholder_done: bool,
) -> Vec<ChecklistItem> {
    if !case.has_treatment_sources() {
        return vec![ChecklistItem::new("No providers or ER visits added", placeholder_done)];
    }

    let mut items = Vec::new();
    for provider in &case.medical_providers {
        items.push(ChecklistItem::new(
            format!("{}: bills {verb}", provider.name),
            satisfied(provider.bill_request_status),
        ));
        items.push(ChecklistItem::new(
            format!("{}: records {verb}", provider.name),
            satisfied(provider.records_request_status),
        ));
    }
    for visit in &case.er_visits {
        for line in visit.bill_lines() {
            items.push(ChecklistItem::new(
                format!("{}: {} bill {verb}", visit.facility_name, line.bill_type),
                satisfied(line.status),
            ));
        }
        items.push(ChecklistItem::new(
            format!("{}: ER records {verb}", visit.facility_name),
            satisfied(visit.record_status),
        ));
    }
    items
}

fn pre_demand_items(case: &CaseSnapshot) -> Vec<ChecklistItem> {
    let providers_totaled = case
        .medical_providers
        .iter()
        .all(|provider| provider.total_cost.is_some());
    let er_bills_totaled = case.er_visits.iter().flat_map(|visit| visit.bill_lines()).all(|line| {
        line.amount.is_some() || line.status == Some(RequestStatus::Na)
    });

    vec![
        ChecklistItem::new(
            "Medical specials totaled",
            case.has_treatment_sources() && providers_totaled && er_bills_totaled,
        ),
        ChecklistItem::new("Demand package prepared", case.has_completed_task(TaskType::DemandPrep)),
    ]
}

fn demand_items(case: &CaseSnapshot) -> Vec<ChecklistItem> {
    vec![
        ChecklistItem::new("Demand sent to insurer", case.has_completed_task(TaskType::DemandSent)),
        ChecklistItem::new(
            "Insurer response received",
            case.has_completed_task(TaskType::DemandResponse),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use caseflow_contracts::{
        case::CaseDocument,
        insurance::{Insurance, InsuranceParty},
        medical::{ErVisit, MedicalProvider},
        task::TaskStatus,
    };

    use super::*;
    use crate::fixtures::{active_case, defendant, task};

    fn progress(stages: &[StageProgress], stage: Stage) -> &StageProgress {
        stages.iter().find(|p| p.stage == stage).unwrap()
    }

    // ── Gating ───────────────────────────────────────────────────────────────

    /// Intake 3/4 done and nothing done anywhere else: intake is the only
    /// workable stage and everything after it is blocked.
    #[test]
    fn test_incomplete_intake_blocks_every_later_stage() {
        let mut case = active_case("case-gate");
        case.insurance.push(Insurance::new(InsuranceParty::Client, "Harbor Auto"));
        case.documents.push(CaseDocument::new("d1", "retainer.pdf", DocumentType::Retainer));
        case.documents.push(CaseDocument::new("d2", "hipaa.pdf", DocumentType::Authorization));
        case.tasks.push(task("t1", "case-gate", TaskType::LorDefendant, TaskStatus::Completed));
        // A provider with nothing requested keeps both records stages at 0 done.
        case.medical_providers.push(MedicalProvider::new("p1", "Eastside Physical Therapy"));

        let stages = evaluate(&case);
        assert_eq!(stages.len(), 8);

        let intake = progress(&stages, Stage::Intake);
        assert_eq!((intake.completed, intake.total), (3, 4));
        assert_eq!(intake.status, StageStatus::Active);

        for later in &stages[1..] {
            assert_eq!(later.completed, 0, "{} should have nothing done", later.stage);
            assert_eq!(later.status, StageStatus::Blocked, "{} should be blocked", later.stage);
        }
    }

    #[test]
    fn test_stages_come_back_in_pipeline_order() {
        let stages = evaluate(&active_case("case-order"));
        let order: Vec<Stage> = stages.iter().map(|p| p.stage).collect();
        assert_eq!(order, Stage::ORDERED.to_vec());
    }

    #[test]
    fn test_completed_intake_makes_investigation_active() {
        let mut case = active_case("case-next");
        case.documents.push(CaseDocument::new("d1", "retainer.pdf", DocumentType::Retainer));
        case.documents.push(CaseDocument::new("d2", "hipaa.pdf", DocumentType::Authorization));
        case.tasks.push(task("t1", "case-next", TaskType::LorDefendant, TaskStatus::Completed));

        let stages = evaluate(&case);
        assert_eq!(progress(&stages, Stage::Intake).status, StageStatus::Complete);
        assert_eq!(progress(&stages, Stage::Investigation).status, StageStatus::Active);
        assert_eq!(progress(&stages, Stage::Insurance).status, StageStatus::Blocked);
    }

    #[test]
    fn test_open_onboarding_task_does_not_tick_intake_items() {
        let mut case = active_case("case-open");
        case.tasks.push(task("t1", "case-open", TaskType::Retainer, TaskStatus::Open));

        let items = checklist(Stage::Intake, &case);
        assert!(!items[0].done);
    }

    // ── Checklist shape ──────────────────────────────────────────────────────

    #[test]
    fn test_client_insurer_lor_only_listed_when_client_insurance_exists() {
        let case = active_case("case-no-client");
        assert_eq!(checklist(Stage::Intake, &case).len(), 3);

        let mut case = active_case("case-client");
        case.insurance.push(Insurance::new(InsuranceParty::Client, "Harbor Auto"));
        assert_eq!(checklist(Stage::Intake, &case).len(), 4);
    }

    #[test]
    fn test_records_items_cover_providers_and_each_er_bill_line() {
        let mut case = active_case("case-items");
        case.medical_providers.push(MedicalProvider::new("p1", "Eastside Physical Therapy"));
        case.er_visits.push(ErVisit::new("er1", "Mercy General"));

        // Two provider items plus three bill lines and one record per visit.
        assert_eq!(checklist(Stage::RecordsRequests, &case).len(), 6);
        assert_eq!(checklist(Stage::RecordsCollection, &case).len(), 6);
    }

    #[test]
    fn test_requested_counts_for_requests_but_not_collection() {
        let mut case = active_case("case-req");
        let mut provider = MedicalProvider::new("p1", "Eastside Physical Therapy");
        provider.bill_request_status = Some(RequestStatus::Requested);
        provider.records_request_status = Some(RequestStatus::Received);
        case.medical_providers.push(provider);

        let requests = checklist(Stage::RecordsRequests, &case);
        assert!(requests.iter().all(|item| item.done));

        let collection = checklist(Stage::RecordsCollection, &case);
        assert_eq!(collection.iter().filter(|item| item.done).count(), 1);
    }

    /// With no providers the requests placeholder is open and the
    /// collection placeholder is done.
    #[test]
    fn test_placeholder_items_are_asymmetric() {
        let case = active_case("case-placeholder");

        let requests = checklist(Stage::RecordsRequests, &case);
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].done);

        let collection = checklist(Stage::RecordsCollection, &case);
        assert_eq!(collection.len(), 1);
        assert!(collection[0].done);

        // A fully done later stage reports Complete even behind a blocked one.
        let stages = evaluate(&case);
        assert_eq!(progress(&stages, Stage::RecordsRequests).status, StageStatus::Blocked);
        assert_eq!(progress(&stages, Stage::RecordsCollection).status, StageStatus::Complete);
        assert_eq!(progress(&stages, Stage::PreDemand).status, StageStatus::Blocked);
    }

    // ── Report ───────────────────────────────────────────────────────────────

    #[test]
    fn test_report_points_at_first_unfinished_stage() {
        let report = report(&active_case("case-report"));
        assert_eq!(report.current_stage, Some(Stage::Intake));
        assert!(report.percent_complete < 100);
    }

    #[test]
    fn test_fully_worked_case_is_complete() {
        let id = "case-done";
        let mut case = active_case(id);
        case.treatment_status = Some(TreatmentStatus::Completed);
        for (doc_id, doc_type) in [
            ("d1", DocumentType::Retainer),
            ("d2", DocumentType::Authorization),
            ("d3", DocumentType::CrashReport),
            ("d4", DocumentType::Photo),
            ("d5", DocumentType::MedicalRecord),
        ] {
            case.documents.push(CaseDocument::new(doc_id, doc_id, doc_type));
        }
        for (n, task_type) in [
            TaskType::LorDefendant,
            TaskType::DemandPrep,
            TaskType::DemandSent,
            TaskType::DemandResponse,
        ]
        .into_iter()
        .enumerate()
        {
            case.tasks.push(task(&format!("t{n}"), id, task_type, TaskStatus::Completed));
        }

        let mut ins = defendant();
        ins.coverage_status = Some(CoverageStatus::Accepted);
        ins.liability_status = Some(LiabilityStatus::Accepted);
        ins.policy_limits_status = Some(PolicyLimitsStatus::Received);
        case.insurance.push(ins);

        let mut provider = MedicalProvider::new("p1", "Eastside Physical Therapy");
        provider.bill_request_status = Some(RequestStatus::Received);
        provider.records_request_status = Some(RequestStatus::Received);
        provider.total_cost = Some(4_250.0);
        case.medical_providers.push(provider);

        let report = report(&case);
        assert!(report
            .stages
            .iter()
            .all(|p| p.status == StageStatus::Complete));
        assert_eq!(report.current_stage, None);
        assert_eq!(report.percent_complete, 100);
    }
}
