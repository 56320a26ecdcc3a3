//! Scenario 3: Caseload Dashboard
//!
//! Loads the whole reference caseload into one store and shows the alert
//! dashboard twice:
//!
//!   Before: two cases have never been initialized, Alvarez has aging requests
//!   Apply:  the workflow runs over every stored case
//!   After:  only Alvarez still needs attention
//!
//! Inactive cases (a NEW lead and a REJECTED case) never appear, even with
//! requests that would otherwise be critical.

use caseflow_contracts::{alert::CaseAlerts, error::CaseflowResult};
use caseflow_core::alerts::group_by_case;
use caseflow_store::{ApplyReport, InMemoryCaseStore};

use super::{pinned_engine, print_stage_report};
use crate::mock_data::{caseload, reference_now, ALVAREZ_ID};

/// Dashboard snapshots taken around one `apply_all`.
#[derive(Debug)]
pub struct DashboardRun {
    pub before: Vec<CaseAlerts>,
    pub reports: Vec<ApplyReport>,
    pub after: Vec<CaseAlerts>,
}

pub fn load_and_apply(store: &InMemoryCaseStore) -> CaseflowResult<DashboardRun> {
    let now = reference_now();
    for case in caseload(now)? {
        store.insert(case)?;
    }

    let engine = pinned_engine(now);
    let before = group_by_case(&store.dashboard(&engine)?);
    let reports = store.apply_all(&engine)?;
    let after = group_by_case(&store.dashboard(&engine)?);
    Ok(DashboardRun {
        before,
        reports,
        after,
    })
}

fn print_dashboard(groups: &[CaseAlerts]) {
    if groups.is_empty() {
        println!("    (no alerts)");
        return;
    }
    for group in groups {
        println!("    {} ({})", group.case_name, group.case_id);
        for alert in &group.alerts {
            println!(
                "      {:<8} {:>4}d  {}",
                format!("{:?}", alert.priority).to_uppercase(),
                alert.days_pending,
                alert.message
            );
        }
    }
}

/// Run the dashboard demo scenario.
pub fn run_scenario() -> CaseflowResult<()> {
    println!("=== Scenario 3: Caseload Dashboard ===");
    println!();

    let store = InMemoryCaseStore::new();
    let run = load_and_apply(&store)?;

    println!("  Dashboard before workflow:");
    print_dashboard(&run.before);
    println!();

    println!("  Workflow applied to {} case(s):", run.reports.len());
    for report in &run.reports {
        let outcome = match (report.changed, report.created) {
            (false, _) => "unchanged".to_string(),
            (true, 0) => "marked initialized".to_string(),
            (true, n) => format!("{} task(s) created", n),
        };
        println!("    {:<16} rev {}  {}", report.case_id, report.revision, outcome);
    }
    println!();

    println!("  Dashboard after workflow:");
    print_dashboard(&run.after);
    println!();

    let engine = pinned_engine(reference_now());
    let alvarez = store.get(ALVAREZ_ID)?.case;
    println!("  Alvarez stage progress:");
    print_stage_report(&engine.stage_report(&alvarez));
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use caseflow_contracts::alert::{AlertKind, AlertPriority};

    use super::*;

    fn run() -> DashboardRun {
        load_and_apply(&InMemoryCaseStore::new()).unwrap()
    }

    /// Alvarez leads with its critical ER bill; uninitialized cases follow.
    #[test]
    fn test_before_apply_grouping_and_order() {
        let run = run();
        let ids: Vec<&str> = run.before.iter().map(|g| g.case_id.as_str()).collect();
        assert_eq!(ids, vec![ALVAREZ_ID, "case-reyes", "case-whitfield"]);

        let alvarez = &run.before[0].alerts;
        let kinds: Vec<AlertKind> = alvarez.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AlertKind::ErBill,
                AlertKind::ProviderRecords,
                AlertKind::CoveragePending,
                AlertKind::OverdueTasks,
                AlertKind::ProviderBill,
            ]
        );
        assert_eq!(alvarez[0].priority, AlertPriority::Critical);
        assert_eq!(alvarez[0].days_pending, 95);
    }

    /// Inactive cases never appear on the dashboard.
    #[test]
    fn test_inactive_cases_are_silent() {
        let run = run();
        for groups in [&run.before, &run.after] {
            assert!(groups
                .iter()
                .all(|g| g.case_id != "case-okafor" && g.case_id != "case-brennan"));
        }
    }

    /// Reports come back in case-id order with the expected task counts.
    /// Inactive cases gain no tasks; the never-initialized ones are still
    /// written back with the flag set.
    #[test]
    fn test_apply_all_reports() {
        let run = run();
        let summary: Vec<(&str, usize, bool)> = run
            .reports
            .iter()
            .map(|r| (r.case_id.as_str(), r.created, r.changed))
            .collect();
        assert_eq!(
            summary,
            vec![
                (ALVAREZ_ID, 5, true),
                ("case-brennan", 0, true),
                ("case-nakamura", 0, false),
                ("case-okafor", 0, true),
                ("case-reyes", 5, true),
                ("case-whitfield", 6, true),
            ]
        );
    }

    /// After the workflow runs only Alvarez still carries alerts.
    #[test]
    fn test_after_apply_only_alvarez_remains() {
        let run = run();
        assert_eq!(run.after.len(), 1);
        assert_eq!(run.after[0].case_id, ALVAREZ_ID);
        assert!(run.after[0]
            .alerts
            .iter()
            .all(|a| a.kind != AlertKind::WorkflowNotInitialized));
    }

    #[test]
    fn test_run_scenario_succeeds() {
        run_scenario().unwrap();
    }
}
