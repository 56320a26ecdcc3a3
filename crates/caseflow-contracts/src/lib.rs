//! # caseflow-contracts
//!
//! Shared types for the caseflow legal-intake workflow engine.
//!
//! All crates in the workspace import from here. The case snapshot shape
//! mirrors what the intake UI persists (camelCase JSON); no rules live in
//! this crate, only data definitions, small accessors and error types.

pub mod alert;
pub mod case;
pub mod error;
pub mod insurance;
pub mod medical;
pub mod stage;
pub mod task;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use alert::AlertPriority;
    use case::{CaseSnapshot, CaseStatus};
    use error::CaseflowError;
    use insurance::{CoverageStatus, Insurance, InsuranceParty};
    use medical::{ErBillType, ErVisit, RequestStatus};
    use stage::{ChecklistItem, Stage, StageProgress, StageReport, StageStatus};
    use task::{Recurrence, TaskType};

    // ── CaseStatus ───────────────────────────────────────────────────────────

    #[test]
    fn test_only_intake_statuses_are_active() {
        assert!(CaseStatus::Accepted.is_active());
        assert!(CaseStatus::IntakeProcessing.is_active());
        assert!(CaseStatus::IntakePaused.is_active());
        assert!(CaseStatus::IntakeComplete.is_active());

        assert!(!CaseStatus::New.is_active());
        assert!(!CaseStatus::UnderReview.is_active());
        assert!(!CaseStatus::Rejected.is_active());
        assert!(!CaseStatus::Closed.is_active());
    }

    // ── Snapshot decoding ────────────────────────────────────────────────────

    #[test]
    fn test_snapshot_lists_default_to_empty() {
        let case: CaseSnapshot = serde_json::from_value(json!({
            "id": "case-1",
            "status": "INTAKE_PROCESSING",
            "createdAt": "2026-01-05T10:00:00Z"
        }))
        .unwrap();

        assert!(case.insurance.is_empty());
        assert!(case.medical_providers.is_empty());
        assert!(case.er_visits.is_empty());
        assert!(case.tasks.is_empty());
        assert!(case.documents.is_empty());
        assert!(case.activity_log.is_empty());
        assert!(!case.workflow_initialized);
    }

    #[test]
    fn test_snapshot_decodes_ui_shape() {
        let case: CaseSnapshot = serde_json::from_value(json!({
            "id": "case-2",
            "clientName": "Dana Whitfield",
            "status": "ACCEPTED",
            "createdAt": "2026-01-05",
            "insurance": [
                { "type": "Defendant", "provider": "Granite Mutual", "coverageStatus": "under_investigation" }
            ],
            "tasks": [{
                "id": "t-1", "caseId": "case-2", "title": "Send retainer",
                "type": "retainer", "status": "completed", "dueDate": "2026-01-08",
                "priority": "high", "recurrence": "one-time", "createdAt": "2026-01-05"
            }]
        }))
        .unwrap();

        let defendant = case.defendant_insurance().unwrap();
        assert_eq!(defendant.coverage_status, Some(CoverageStatus::UnderInvestigation));
        assert!(case.client_insurance().is_none());
        assert!(case.has_task(TaskType::Retainer));
        assert!(!case.has_open_task(TaskType::Retainer));
        assert!(case.has_completed_task(TaskType::Retainer));
        assert_eq!(case.tasks[0].recurrence, Recurrence::OneTime);
    }

    // ── Insurance helpers ────────────────────────────────────────────────────

    #[test]
    fn test_unset_coverage_counts_as_pending() {
        let mut ins = Insurance::new(InsuranceParty::Defendant, "Granite Mutual");
        assert!(ins.coverage_pending());
        assert!(ins.liability_pending());

        ins.coverage_status = Some(CoverageStatus::Accepted);
        assert!(!ins.coverage_pending());
    }

    #[test]
    fn test_followup_date_wins_over_status_date() {
        let mut ins = Insurance::new(InsuranceParty::Defendant, "Granite Mutual");
        ins.coverage_status_date = Some("2026-01-01".to_string());
        assert_eq!(ins.coverage_anchor(), Some("2026-01-01"));

        ins.coverage_followup_date = Some("2026-02-01".to_string());
        assert_eq!(ins.coverage_anchor(), Some("2026-02-01"));
    }

    // ── Medical records ──────────────────────────────────────────────────────

    #[test]
    fn test_er_visit_has_one_line_per_bill_type() {
        let visit = ErVisit::new("er-1", "Mercy General");
        assert_eq!(visit.bills.len(), 3);
        for bill_type in ErBillType::ALL {
            assert!(visit.bill(bill_type).is_some(), "missing {bill_type} line");
        }
    }

    #[test]
    fn test_decoded_er_bills_read_as_one_line_per_type() {
        let visit: ErVisit = serde_json::from_value(json!({
            "id": "er-2",
            "facilityName": "St. Anne's",
            "bills": [
                { "type": "radiology", "status": "received" },
                { "type": "facility", "status": "requested", "requestDate": "2026-01-20" },
                { "type": "facility", "status": "received" }
            ]
        }))
        .unwrap();

        let lines: Vec<_> = visit.bill_lines().collect();
        let types: Vec<_> = lines.iter().map(|line| line.bill_type).collect();
        assert_eq!(types, ErBillType::ALL.to_vec());

        // First facility line wins over the duplicate.
        assert_eq!(lines[0].status, Some(RequestStatus::Requested));
        assert_eq!(lines[0].request_date.as_deref(), Some("2026-01-20"));
        // Physician line is absent and reads as never requested.
        assert_eq!(lines[1].status, None);
        assert_eq!(lines[2].status, Some(RequestStatus::Received));
    }

    #[test]
    fn test_request_status_predicates() {
        assert!(!RequestStatus::is_sent(None));
        assert!(!RequestStatus::is_sent(Some(RequestStatus::NotRequested)));
        assert!(RequestStatus::is_sent(Some(RequestStatus::Requested)));
        assert!(RequestStatus::is_settled(Some(RequestStatus::Na)));
        assert!(!RequestStatus::is_settled(Some(RequestStatus::Requested)));
        assert!(RequestStatus::is_outstanding(Some(RequestStatus::Requested)));
    }

    // ── AlertPriority ordering ───────────────────────────────────────────────

    #[test]
    fn test_critical_sorts_before_high_before_medium() {
        let mut priorities = vec![AlertPriority::Medium, AlertPriority::Critical, AlertPriority::High];
        priorities.sort();
        assert_eq!(
            priorities,
            vec![AlertPriority::Critical, AlertPriority::High, AlertPriority::Medium]
        );
        assert!(AlertPriority::Critical.rank() < AlertPriority::Medium.rank());
    }

    // ── Stage report encoding ────────────────────────────────────────────────

    #[test]
    fn test_stage_report_encodes_camel_case() {
        let report = StageReport {
            stages: vec![StageProgress {
                stage: Stage::Intake,
                items: vec![ChecklistItem::new("Retainer signed", true)],
                completed: 1,
                total: 1,
                status: StageStatus::Complete,
            }],
            current_stage: Some(Stage::Investigation),
            percent_complete: 12,
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["currentStage"], json!("investigation"));
        assert_eq!(value["percentComplete"], json!(12));
        assert!(value.get("current_stage").is_none());
        assert!(value.get("percent_complete").is_none());
        assert_eq!(value["stages"][0]["items"][0]["label"], json!("Retainer signed"));

        let back: StageReport = serde_json::from_value(value).unwrap();
        assert_eq!(back, report);
    }

    // ── CaseflowError display messages ───────────────────────────────────────

    #[test]
    fn test_error_stale_snapshot_display() {
        let err = CaseflowError::StaleSnapshot {
            case_id: "case-9".to_string(),
            expected: "abc".to_string(),
            actual: "def".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("case-9"));
        assert!(msg.contains("abc"));
        assert!(msg.contains("def"));
    }

    #[test]
    fn test_error_config_error_display() {
        let err = CaseflowError::ConfigError {
            reason: "bad as_of".to_string(),
        };
        assert!(err.to_string().contains("configuration error"));
    }
}
