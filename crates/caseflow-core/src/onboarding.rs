//! Initial task generator.
//!
//! Two deduplication regimes apply and must stay distinct:
//!
//! - onboarding tasks are created at most once per case, ever; a completed
//!   retainer task still suppresses a new one
//! - status-driven follow-ups are suppressed only while one is open; once
//!   completed, a still-pending status produces a fresh follow-up

use chrono::{DateTime, Utc};
use tracing::debug;

use caseflow_contracts::{
    case::CaseSnapshot,
    task::{CaseTask, Recurrence, TaskPriority, TaskType},
};

use crate::{draft::TaskDraft, traits::IdSource};

/// How an existing task of the same type suppresses a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dedup {
    /// Any task of the type, in any status.
    ExistsEver,
    /// Any task of the type that is not completed.
    ExistsOpen,
}

impl Dedup {
    pub fn blocks(self, case: &CaseSnapshot, task_type: TaskType) -> bool {
        match self {
            Self::ExistsEver => case.has_task(task_type),
            Self::ExistsOpen => case.has_open_task(task_type),
        }
    }
}

/// Case condition a rule requires before it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Always,
    ClientInsurance,
    DefendantCoveragePending,
    DefendantLiabilityPending,
}

impl Trigger {
    pub fn holds(self, case: &CaseSnapshot) -> bool {
        match self {
            Self::Always => true,
            Self::ClientInsurance => case.client_insurance().is_some(),
            Self::DefendantCoveragePending => case
                .defendant_insurance()
                .is_some_and(|ins| ins.coverage_pending()),
            Self::DefendantLiabilityPending => case
                .defendant_insurance()
                .is_some_and(|ins| ins.liability_pending()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OnboardingRule {
    pub task_type: TaskType,
    pub title: &'static str,
    pub due_in_days: i64,
    pub priority: TaskPriority,
    pub recurrence: Recurrence,
    pub trigger: Trigger,
    pub dedup: Dedup,
}

/// Every initial task the engine knows about, in creation order.
pub const RULES: [OnboardingRule; 7] = [
    OnboardingRule {
        task_type: TaskType::Retainer,
        title: "Send retainer agreement for signature",
        due_in_days: 3,
        priority: TaskPriority::High,
        recurrence: Recurrence::OneTime,
        trigger: Trigger::Always,
        dedup: Dedup::ExistsEver,
    },
    OnboardingRule {
        task_type: TaskType::Hipaa,
        title: "Obtain signed HIPAA authorization",
        due_in_days: 3,
        priority: TaskPriority::High,
        recurrence: Recurrence::OneTime,
        trigger: Trigger::Always,
        dedup: Dedup::ExistsEver,
    },
    OnboardingRule {
        task_type: TaskType::LorDefendant,
        title: "Send letter of representation to defendant insurer",
        due_in_days: 5,
        priority: TaskPriority::High,
        recurrence: Recurrence::OneTime,
        trigger: Trigger::Always,
        dedup: Dedup::ExistsEver,
    },
    OnboardingRule {
        task_type: TaskType::LorClientIns,
        title: "Send letter of representation to client insurer",
        due_in_days: 5,
        priority: TaskPriority::High,
        recurrence: Recurrence::OneTime,
        trigger: Trigger::ClientInsurance,
        dedup: Dedup::ExistsEver,
    },
    OnboardingRule {
        task_type: TaskType::CrashReportRequest,
        title: "Request police crash report",
        due_in_days: 3,
        priority: TaskPriority::Medium,
        recurrence: Recurrence::OneTime,
        trigger: Trigger::Always,
        dedup: Dedup::ExistsEver,
    },
    OnboardingRule {
        task_type: TaskType::CoverageFollowup,
        title: "Follow up on defendant coverage decision",
        due_in_days: 7,
        priority: TaskPriority::High,
        recurrence: Recurrence::Weekly,
        trigger: Trigger::DefendantCoveragePending,
        dedup: Dedup::ExistsOpen,
    },
    OnboardingRule {
        task_type: TaskType::LiabilityFollowup,
        title: "Follow up on defendant liability decision",
        due_in_days: 7,
        priority: TaskPriority::High,
        recurrence: Recurrence::Weekly,
        trigger: Trigger::DefendantLiabilityPending,
        dedup: Dedup::ExistsOpen,
    },
];

/// Generate the initial and status-driven tasks this case is missing.
///
/// Returns nothing for inactive cases.
pub fn generate(case: &CaseSnapshot, now: DateTime<Utc>, ids: &dyn IdSource) -> Vec<CaseTask> {
    if !case.is_active() {
        debug!(case_id = %case.id, status = ?case.status, "case inactive, no initial tasks");
        return Vec::new();
    }

    RULES
        .iter()
        .filter(|rule| rule.trigger.holds(case))
        .filter(|rule| {
            let blocked = rule.dedup.blocks(case, rule.task_type);
            if blocked {
                debug!(case_id = %case.id, task_type = ?rule.task_type, dedup = ?rule.dedup, "initial task already present");
            }
            !blocked
        })
        .map(|rule| {
            let draft = TaskDraft {
                task_type: rule.task_type,
                title: rule.title.to_string(),
                description: None,
                due_in_days: rule.due_in_days,
                priority: rule.priority,
                recurrence: rule.recurrence,
            };
            draft.into_task(&case.id, ids.next_id("task"), now)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use caseflow_contracts::{
        case::CaseStatus,
        insurance::{CoverageStatus, Insurance, InsuranceParty, LiabilityStatus},
        task::TaskStatus,
    };

    use super::*;
    use crate::{
        fixtures::{active_case, days_from_now, defendant, now, task},
        SequentialIds,
    };

    fn run(case: &CaseSnapshot) -> Vec<CaseTask> {
        generate(case, now(), &SequentialIds::new())
    }

    fn types(tasks: &[CaseTask]) -> Vec<TaskType> {
        tasks.iter().map(|t| t.task_type).collect()
    }

    // ── Onboarding scenario ──────────────────────────────────────────────────

    /// Defendant coverage pending, liability unset, no client insurance:
    /// five onboarding tasks minus the client LOR, plus both follow-ups.
    #[test]
    fn test_fresh_case_with_pending_defendant_gets_six_tasks() {
        let mut case = active_case("case-onboard");
        let mut ins = defendant();
        ins.coverage_status = Some(CoverageStatus::Pending);
        case.insurance.push(ins);

        let tasks = run(&case);

        let expected = [
            (TaskType::Retainer, 3, TaskPriority::High, Recurrence::OneTime),
            (TaskType::Hipaa, 3, TaskPriority::High, Recurrence::OneTime),
            (TaskType::LorDefendant, 5, TaskPriority::High, Recurrence::OneTime),
            (TaskType::CrashReportRequest, 3, TaskPriority::Medium, Recurrence::OneTime),
            (TaskType::CoverageFollowup, 7, TaskPriority::High, Recurrence::Weekly),
            (TaskType::LiabilityFollowup, 7, TaskPriority::High, Recurrence::Weekly),
        ];
        assert_eq!(tasks.len(), expected.len());

        for (task, (task_type, due, priority, recurrence)) in tasks.iter().zip(expected) {
            assert_eq!(task.task_type, task_type);
            assert_eq!(task.due_date, days_from_now(due), "{task_type:?} due date");
            assert_eq!(task.priority, priority, "{task_type:?} priority");
            assert_eq!(task.recurrence, recurrence, "{task_type:?} recurrence");
            assert_eq!(task.status, TaskStatus::Open);
            assert_eq!(task.case_id, "case-onboard");
            assert!(task.auto_generated);
        }
        assert!(!types(&tasks).contains(&TaskType::LorClientIns));
    }

    #[test]
    fn test_client_insurance_adds_client_lor() {
        let mut case = active_case("case-client");
        case.insurance.push(Insurance::new(InsuranceParty::Client, "Harbor Auto"));

        let tasks = run(&case);
        assert_eq!(
            types(&tasks),
            vec![
                TaskType::Retainer,
                TaskType::Hipaa,
                TaskType::LorDefendant,
                TaskType::LorClientIns,
                TaskType::CrashReportRequest,
            ]
        );
    }

    #[test]
    fn test_inactive_case_gets_nothing() {
        let mut case = active_case("case-new");
        case.status = CaseStatus::New;
        case.insurance.push(defendant());
        assert!(run(&case).is_empty());
    }

    // ── Dedup regimes ────────────────────────────────────────────────────────

    #[test]
    fn test_completed_onboarding_task_is_never_recreated() {
        let mut case = active_case("case-ever");
        case.tasks.push(task("t1", "case-ever", TaskType::Retainer, TaskStatus::Completed));

        let tasks = run(&case);
        assert!(!types(&tasks).contains(&TaskType::Retainer));
        assert!(types(&tasks).contains(&TaskType::Hipaa));
    }

    #[test]
    fn test_completed_followup_is_regenerated_while_status_pending() {
        let mut case = active_case("case-open");
        case.insurance.push(defendant());
        case.tasks.push(task("t1", "case-open", TaskType::CoverageFollowup, TaskStatus::Completed));
        case.tasks.push(task("t2", "case-open", TaskType::LiabilityFollowup, TaskStatus::Open));

        let tasks = run(&case);
        assert!(types(&tasks).contains(&TaskType::CoverageFollowup));
        assert!(!types(&tasks).contains(&TaskType::LiabilityFollowup));
    }

    #[test]
    fn test_decided_statuses_produce_no_followups() {
        let mut case = active_case("case-decided");
        let mut ins = defendant();
        ins.coverage_status = Some(CoverageStatus::Accepted);
        ins.liability_status = Some(LiabilityStatus::Disputed);
        case.insurance.push(ins);

        let tasks = run(&case);
        assert!(!types(&tasks).contains(&TaskType::CoverageFollowup));
        assert!(!types(&tasks).contains(&TaskType::LiabilityFollowup));
    }

    #[test]
    fn test_no_defendant_insurance_means_no_followups() {
        let tasks = run(&active_case("case-nodef"));
        assert_eq!(tasks.len(), 4);
    }

    #[test]
    fn test_dedup_strategies_disagree_on_completed_tasks() {
        let mut case = active_case("case-dedup");
        case.tasks.push(task("t1", "case-dedup", TaskType::Hipaa, TaskStatus::Completed));

        assert!(Dedup::ExistsEver.blocks(&case, TaskType::Hipaa));
        assert!(!Dedup::ExistsOpen.blocks(&case, TaskType::Hipaa));
    }
}
