//! Scenario 2: Reminder Escalation
//!
//! The Alvarez case has onboarding behind it but several requests have gone
//! unanswered. The workflow is replayed at three dates:
//!
//!   Pass 1 (day 0):   five reminders, one per outstanding request
//!   Pass 2 (day +30): three more as requests cross into the next bucket;
//!                     the earlier bucket reminders stay open beside them
//!   Pass 3 (day +30): nothing new
//!
//! Coverage uses a single flat gate, so the open coverage reminder from
//! pass 1 suppresses any further one no matter how long it stays pending.

use chrono::{DateTime, Utc};

use caseflow_contracts::{error::CaseflowResult, task::CaseTask};
use caseflow_core::clock::add_days;
use caseflow_store::{ApplyReport, InMemoryCaseStore};

use super::{print_task, replay_engine};
use crate::mock_data::{alvarez_case, reference_now, ALVAREZ_ID};

/// Days after the reference instant at which each pass runs.
pub const PASS_OFFSETS: [i64; 3] = [0, 30, 30];

/// One replayed pass and the reminders it created.
#[derive(Debug)]
pub struct Pass {
    pub at: DateTime<Utc>,
    pub report: ApplyReport,
    pub created: Vec<CaseTask>,
}

/// Store the Alvarez case and apply the workflow once per offset.
pub fn replay(store: &InMemoryCaseStore, offsets: &[i64]) -> CaseflowResult<Vec<Pass>> {
    let base = reference_now();
    store.insert(alvarez_case(base))?;

    let mut passes = Vec::with_capacity(offsets.len());
    for &offset in offsets {
        let at = add_days(base, offset);
        let before = store.get(ALVAREZ_ID)?.case.tasks.len();
        let report = store.apply_workflow(ALVAREZ_ID, &replay_engine(at))?;
        let created = store.get(ALVAREZ_ID)?.case.tasks[before..].to_vec();
        passes.push(Pass {
            at,
            report,
            created,
        });
    }
    Ok(passes)
}

/// Run the reminder escalation demo scenario.
pub fn run_scenario() -> CaseflowResult<()> {
    println!("=== Scenario 2: Reminder Escalation ===");
    println!();
    println!("  Client:     Jordan Alvarez ({ALVAREZ_ID})");
    println!("  Pending:    coverage 20d, Eastside bills 35d / records 65d,");
    println!("              Mercy General facility bill 95d / ER records 40d");
    println!();

    let store = InMemoryCaseStore::new();
    let passes = replay(&store, &PASS_OFFSETS)?;

    for (n, pass) in passes.iter().enumerate() {
        println!(
            "  Pass {} — as of {}",
            n + 1,
            pass.at.format("%Y-%m-%d")
        );
        if pass.report.changed {
            println!("  Reminders created: {}", pass.report.created);
            for task in &pass.created {
                print_task(task);
            }
        } else {
            println!("  Reminders created: 0 (case unchanged)");
        }
        println!();
    }

    let case = store.get(ALVAREZ_ID)?.case;
    let open_bill_keys: Vec<&str> = case
        .tasks
        .iter()
        .filter(|t| t.is_open() && t.id.starts_with("reminder-bill-"))
        .map(|t| t.id.as_str())
        .collect();
    println!("  Open Eastside bill reminders after pass 3: {}", open_bill_keys.len());
    println!();
    Ok(())
}
