//! Intake reference scenarios.
//!
//! Each scenario wires the real engine and case store together with mock
//! cases and prints what a paralegal would see.

pub mod dashboard;
pub mod onboarding;
pub mod reminder_escalation;

use chrono::{DateTime, Utc};

use caseflow_contracts::{stage::StageReport, task::CaseTask};
use caseflow_core::{FixedClock, SequentialIds, UuidIds, WorkflowEngine};

/// An engine pinned to `now` with readable sequential ids.
///
/// Sequential ids restart per engine, so use it for a single pass only.
pub(crate) fn pinned_engine(now: DateTime<Utc>) -> WorkflowEngine {
    WorkflowEngine::new(Box::new(FixedClock(now)), Box::new(SequentialIds::new()))
}

/// An engine pinned to `now` with UUID ids, safe to use for repeated passes
/// over the same cases.
pub(crate) fn replay_engine(now: DateTime<Utc>) -> WorkflowEngine {
    WorkflowEngine::new(Box::new(FixedClock(now)), Box::new(UuidIds))
}

/// Print one created task in the scenario listing format.
pub(crate) fn print_task(task: &CaseTask) {
    println!(
        "    [{:<6}] {:<28} due {}  ({})",
        format!("{:?}", task.priority).to_uppercase(),
        format!("{:?}", task.task_type),
        task.due_date.get(..10).unwrap_or(&task.due_date),
        task.title
    );
}

/// Print a compact stage-by-stage progress table.
pub(crate) fn print_stage_report(report: &StageReport) {
    for progress in &report.stages {
        println!(
            "    {:<20} {:>2}/{:<2} {:?}",
            progress.stage.label(),
            progress.completed,
            progress.total,
            progress.status
        );
    }
    match report.current_stage {
        Some(stage) => println!(
            "    Current stage: {} ({}% complete)",
            stage.label(),
            report.percent_complete
        ),
        None => println!("    All stages complete"),
    }
}
