//! Alert aggregator: cross-case dashboard alerts.
//!
//! Alerts are recomputed on every call and never written back to a case.
//! The thresholds here are the dashboard's own and are deliberately looser
//! than the reminder generator's; the two tables are not shared.
//!
//! ER record requests are not surfaced here even though the reminder
//! generator creates tasks for them.

use chrono::{DateTime, Utc};
use tracing::debug;

use caseflow_contracts::{
    alert::{AlertKind, AlertPriority, CaseAlerts, ReminderAlert},
    case::CaseSnapshot,
    medical::RequestStatus,
    stage::Stage,
    task::{CaseTask, TaskStatus},
};

use crate::clock::{days_since, parse_instant};

/// Priority ladder: the highest rung whose `min_days` is reached applies.
///
/// Day counts are whole numbers, so a "more than N days" rule is written
/// with `min_days = N + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertRung {
    pub min_days: i64,
    pub priority: AlertPriority,
}

const fn rung(min_days: i64, priority: AlertPriority) -> AlertRung {
    AlertRung { min_days, priority }
}

/// Coverage pending more than 7 days, critical past 21.
pub const COVERAGE_LADDER: [AlertRung; 2] =
    [rung(8, AlertPriority::High), rung(22, AlertPriority::Critical)];

/// Liability pending more than 14 days, critical past 30.
pub const LIABILITY_LADDER: [AlertRung; 2] =
    [rung(15, AlertPriority::High), rung(31, AlertPriority::Critical)];

/// Provider and ER bills: 30 / 60 / 90 days.
pub const BILL_LADDER: [AlertRung; 3] = [
    rung(30, AlertPriority::Medium),
    rung(60, AlertPriority::High),
    rung(90, AlertPriority::Critical),
];

/// Provider records: 30 / 60 days, never critical.
pub const RECORDS_LADDER: [AlertRung; 2] =
    [rung(30, AlertPriority::Medium), rung(60, AlertPriority::High)];

/// Open tasks past due: critical from this many on.
pub const CRITICAL_OVERDUE_COUNT: usize = 3;

pub fn classify(ladder: &[AlertRung], days: i64) -> Option<AlertPriority> {
    ladder
        .iter()
        .rev()
        .find(|rung| days >= rung.min_days)
        .map(|rung| rung.priority)
}

/// The status a display layer should show for `task` at `now`.
///
/// Open tasks whose due date has passed read as `Overdue`. Unparseable due
/// dates never read as overdue.
pub fn display_status(task: &CaseTask, now: DateTime<Utc>) -> TaskStatus {
    match task.status {
        TaskStatus::Completed => TaskStatus::Completed,
        TaskStatus::Overdue => TaskStatus::Overdue,
        TaskStatus::Open => match parse_instant(&task.due_date) {
            Some(due) if due < now => TaskStatus::Overdue,
            _ => TaskStatus::Open,
        },
    }
}

/// Alerts for every active case, sorted critical-first and then by age,
/// oldest first.
pub fn collect(cases: &[CaseSnapshot], now: DateTime<Utc>) -> Vec<ReminderAlert> {
    let mut alerts: Vec<ReminderAlert> = cases
        .iter()
        .filter(|case| case.is_active())
        .flat_map(|case| case_alerts(case, now))
        .collect();

    sort_alerts(&mut alerts);
    debug!(cases = cases.len(), alerts = alerts.len(), "aggregated dashboard alerts");
    alerts
}

/// Order by priority (critical first), then by `days_pending`, largest first.
/// Ties keep their input order.
pub fn sort_alerts(alerts: &mut [ReminderAlert]) {
    alerts.sort_by(|a, b| {
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then_with(|| b.days_pending.cmp(&a.days_pending))
    });
}

/// Group an already-sorted alert list by case, cases ordered by their first
/// (most urgent) alert.
pub fn group_by_case(alerts: &[ReminderAlert]) -> Vec<CaseAlerts> {
    let mut groups: Vec<CaseAlerts> = Vec::new();
    for alert in alerts {
        match groups.iter_mut().find(|group| group.case_id == alert.case_id) {
            Some(group) => group.alerts.push(alert.clone()),
            None => groups.push(CaseAlerts {
                case_id: alert.case_id.clone(),
                case_name: alert.case_name.clone(),
                alerts: vec![alert.clone()],
            }),
        }
    }
    groups
}

fn case_alerts(case: &CaseSnapshot, now: DateTime<Utc>) -> Vec<ReminderAlert> {
    let alert = |kind: AlertKind,
                 message: String,
                 days: i64,
                 priority: AlertPriority,
                 stage: Option<Stage>| ReminderAlert {
        case_id: case.id.clone(),
        case_name: case.client_name.clone(),
        kind,
        message,
        days_pending: days,
        priority,
        stage,
    };
    let mut alerts = Vec::new();

    let overdue: Vec<&CaseTask> = case
        .tasks
        .iter()
        .filter(|task| display_status(task, now) == TaskStatus::Overdue)
        .collect();
    if !overdue.is_empty() {
        let oldest = overdue
            .iter()
            .filter_map(|task| days_since(now, Some(task.due_date.as_str())))
            .max()
            .unwrap_or(0)
            .max(0);
        let priority = if overdue.len() >= CRITICAL_OVERDUE_COUNT {
            AlertPriority::Critical
        } else {
            AlertPriority::High
        };
        let noun = if overdue.len() == 1 { "task" } else { "tasks" };
        alerts.push(alert(
            AlertKind::OverdueTasks,
            format!("{} overdue {noun}", overdue.len()),
            oldest,
            priority,
            None,
        ));
    }

    if !case.workflow_initialized {
        let age = days_since(now, Some(case.created_at.as_str())).unwrap_or(0).max(0);
        alerts.push(alert(
            AlertKind::WorkflowNotInitialized,
            "Workflow has not been started".to_string(),
            age,
            AlertPriority::Medium,
            Some(Stage::Intake),
        ));
    }

    if let Some(defendant) = case.defendant_insurance() {
        if defendant.coverage_pending() {
            let anchor = defendant.coverage_anchor().or(Some(case.created_at.as_str()));
            if let Some(days) = days_since(now, anchor) {
                if let Some(priority) = classify(&COVERAGE_LADDER, days) {
                    alerts.push(alert(
                        AlertKind::CoveragePending,
                        format!("Coverage decision from {} pending {days} days", defendant.provider),
                        days,
                        priority,
                        Some(Stage::Insurance),
                    ));
                }
            }
        }
        if defendant.liability_pending() {
            let anchor = defendant.liability_anchor().or(Some(case.created_at.as_str()));
            if let Some(days) = days_since(now, anchor) {
                if let Some(priority) = classify(&LIABILITY_LADDER, days) {
                    alerts.push(alert(
                        AlertKind::LiabilityPending,
                        format!("Liability decision from {} pending {days} days", defendant.provider),
                        days,
                        priority,
                        Some(Stage::Insurance),
                    ));
                }
            }
        }
    }

    for provider in &case.medical_providers {
        if RequestStatus::is_outstanding(provider.bill_request_status) {
            if let Some(days) = days_since(now, provider.bill_anchor()) {
                if let Some(priority) = classify(&BILL_LADDER, days) {
                    alerts.push(alert(
                        AlertKind::ProviderBill,
                        format!("{} bills outstanding {days} days", provider.name),
                        days,
                        priority,
                        Some(Stage::RecordsCollection),
                    ));
                }
            }
        }
        if RequestStatus::is_outstanding(provider.records_request_status) {
            if let Some(days) = days_since(now, provider.records_anchor()) {
                if let Some(priority) = classify(&RECORDS_LADDER, days) {
                    alerts.push(alert(
                        AlertKind::ProviderRecords,
                        format!("{} records outstanding {days} days", provider.name),
                        days,
                        priority,
                        Some(Stage::RecordsCollection),
                    ));
                }
            }
        }
    }

    for visit in &case.er_visits {
        for line in visit.bill_lines() {
            if !RequestStatus::is_outstanding(line.status) {
                continue;
            }
            if let Some(days) = days_since(now, line.anchor()) {
                if let Some(priority) = classify(&BILL_LADDER, days) {
                    alerts.push(alert(
                        AlertKind::ErBill,
                        format!(
                            "{} {} bill outstanding {days} days",
                            visit.facility_name, line.bill_type
                        ),
                        days,
                        priority,
                        Some(Stage::RecordsCollection),
                    ));
                }
            }
        }
    }

    alerts
}
