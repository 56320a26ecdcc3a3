//! Scenario 1: Onboarding a New Case
//!
//! The Whitfield case arrives from the front end as JSON: accepted into
//! intake processing, defendant insurer on file with coverage pending, no
//! client insurance and no work started.
//!
//!   Step 1: decode the snapshot and store it
//!   Step 2: apply the workflow → six initial tasks and one activity entry
//!   Step 3: apply again        → nothing new, case left untouched
//!
//! The client-insurer LOR is skipped because no client insurer is on file.

use caseflow_contracts::{error::CaseflowResult, task::TaskType};
use caseflow_store::{ApplyReport, InMemoryCaseStore};

use super::{pinned_engine, print_stage_report, print_task};
use crate::mock_data::{reference_now, whitfield_case};

const CASE_ID: &str = "case-whitfield";

/// Store the Whitfield case and apply the workflow twice.
pub fn onboard(store: &InMemoryCaseStore) -> CaseflowResult<(ApplyReport, ApplyReport)> {
    let now = reference_now();
    store.insert(whitfield_case(now)?)?;

    let engine = pinned_engine(now);
    let first = store.apply_workflow(CASE_ID, &engine)?;
    let second = store.apply_workflow(CASE_ID, &engine)?;
    Ok((first, second))
}

/// Run the onboarding demo scenario.
pub fn run_scenario() -> CaseflowResult<()> {
    println!("=== Scenario 1: Onboarding a New Case ===");
    println!();
    println!("  Client:     Dana Whitfield ({CASE_ID})");
    println!("  Status:     INTAKE_PROCESSING, workflow not started");
    println!("  Insurance:  Granite Mutual (defendant), coverage pending");
    println!();

    let store = InMemoryCaseStore::new();
    let (first, second) = onboard(&store)?;
    let stored = store.get(CASE_ID)?;

    println!("  Step 2 — first workflow pass");
    println!("  Tasks created:  {}", first.created);
    println!("  Revision:       {}", first.revision);
    for task in stored.case.tasks.iter().filter(|t| t.auto_generated) {
        print_task(task);
    }
    if let Some(entry) = stored.case.activity_log.first() {
        println!("  Activity log:   {}", entry.message);
    }
    println!();

    println!("  Step 3 — second workflow pass");
    println!(
        "  Changed:        {}",
        if second.changed { "YES (unexpected)" } else { "NO" }
    );
    println!("  Fingerprint:    {}", second.fingerprint.get(..16).unwrap_or(&second.fingerprint));
    println!();

    println!("  Stage progress:");
    let engine = pinned_engine(reference_now());
    print_stage_report(&engine.stage_report(&stored.case));
    println!();

    let lor_client = stored.case.has_task(TaskType::LorClientIns);
    println!(
        "  Client-insurer LOR: {}",
        if lor_client { "CREATED" } else { "SKIPPED (no client insurer)" }
    );
    println!();
    Ok(())
}
