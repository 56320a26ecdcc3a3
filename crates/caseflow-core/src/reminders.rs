//! Reminder generator: escalating follow-up tasks for requests that have
//! gone unanswered.
//!
//! Each outstanding request is aged from its follow-up date (or, failing
//! that, its request date) and placed in an age bucket from
//! [`ESCALATION_TABLE`]. The bucket is part of the reminder key, so crossing
//! from 30 to 60 days adds a second reminder next to the first one instead of
//! replacing it. Earlier-bucket reminders are left untouched.
//!
//! Coverage and liability are not bucketed: a single flat gate applies and
//! the key carries no bucket.

use chrono::{DateTime, Utc};
use tracing::debug;

use caseflow_contracts::{
    case::CaseSnapshot,
    medical::RequestStatus,
    task::{CaseTask, Recurrence, TaskPriority, TaskType},
};

use crate::{clock::days_since, draft::TaskDraft, ids::is_minted_suffix, traits::IdSource};

/// The kinds of outstanding request that can produce a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderFamily {
    Coverage,
    Liability,
    ProviderBill,
    ProviderRecords,
    ErBill,
    ErRecords,
}

/// One rung of a bucketed schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketStep {
    /// Inclusive lower bound on request age; also the bucket's name.
    pub min_days: i64,
    pub due_in_days: i64,
    pub priority: TaskPriority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Fires once age is strictly greater than `after_days`.
    Flat {
        after_days: i64,
        due_in_days: i64,
        priority: TaskPriority,
    },
    /// Rungs in ascending `min_days` order; the highest rung reached wins.
    Buckets(&'static [BucketStep]),
}

const fn step(min_days: i64, due_in_days: i64, priority: TaskPriority) -> BucketStep {
    BucketStep {
        min_days,
        due_in_days,
        priority,
    }
}

const DECISION_GATE: Schedule = Schedule::Flat {
    after_days: 14,
    due_in_days: 1,
    priority: TaskPriority::High,
};

const PROVIDER_BILL_STEPS: [BucketStep; 3] = [
    step(30, 5, TaskPriority::Medium),
    step(60, 2, TaskPriority::High),
    step(90, 1, TaskPriority::High),
];

const PROVIDER_RECORDS_STEPS: [BucketStep; 3] = [
    step(30, 5, TaskPriority::Medium),
    step(60, 2, TaskPriority::High),
    step(90, 2, TaskPriority::High),
];

const ER_BILL_STEPS: [BucketStep; 3] = [
    step(30, 5, TaskPriority::Medium),
    step(60, 2, TaskPriority::High),
    step(90, 2, TaskPriority::High),
];

const ER_RECORDS_STEPS: [BucketStep; 2] = [
    step(30, 5, TaskPriority::Medium),
    step(60, 2, TaskPriority::High),
];

/// Thresholds, due offsets and priorities for every reminder family.
pub const ESCALATION_TABLE: [(ReminderFamily, Schedule); 6] = [
    (ReminderFamily::Coverage, DECISION_GATE),
    (ReminderFamily::Liability, DECISION_GATE),
    (ReminderFamily::ProviderBill, Schedule::Buckets(&PROVIDER_BILL_STEPS)),
    (ReminderFamily::ProviderRecords, Schedule::Buckets(&PROVIDER_RECORDS_STEPS)),
    (ReminderFamily::ErBill, Schedule::Buckets(&ER_BILL_STEPS)),
    (ReminderFamily::ErRecords, Schedule::Buckets(&ER_RECORDS_STEPS)),
];

impl ReminderFamily {
    pub fn schedule(self) -> Schedule {
        ESCALATION_TABLE
            .iter()
            .find(|(family, _)| *family == self)
            .map(|(_, schedule)| *schedule)
            .unwrap_or(DECISION_GATE)
    }

    fn task_type(self) -> TaskType {
        match self {
            Self::Coverage => TaskType::CoverageFollowup,
            Self::Liability => TaskType::LiabilityFollowup,
            Self::ProviderBill => TaskType::ProviderBillFollowup,
            Self::ProviderRecords => TaskType::ProviderRecordsFollowup,
            Self::ErBill => TaskType::ErBillFollowup,
            Self::ErRecords => TaskType::ErRecordsFollowup,
        }
    }
}

/// The highest rung of `steps` that `days` has reached.
pub fn bucket_for(steps: &[BucketStep], days: i64) -> Option<BucketStep> {
    steps.iter().rev().find(|step| days >= step.min_days).copied()
}

/// Idempotency key for a reminder: `reminder-<kind>-<entity>[-<bucket>]`.
pub fn reminder_key(kind: &str, entity_id: &str, bucket: Option<i64>) -> String {
    match bucket {
        Some(bucket) => format!("reminder-{kind}-{entity_id}-{bucket}"),
        None => format!("reminder-{kind}-{entity_id}"),
    }
}

/// True when a non-completed task already carries `key` as its id prefix.
///
/// Ids are `<key>-<suffix>` with exactly one minted suffix after the key.
/// Entity ids may contain `-`: provider `p1-30`'s reminder
/// `reminder-bill-p1-30-30-<suffix>` must not match provider `p1`'s key
/// `reminder-bill-p1-30`.
pub fn has_open_reminder(case: &CaseSnapshot, key: &str) -> bool {
    case.tasks.iter().any(|task| {
        task.is_open()
            && (task.id == key
                || task
                    .id
                    .strip_prefix(key)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .is_some_and(is_minted_suffix))
    })
}

/// A request that is still waiting on the other side.
struct Outstanding {
    family: ReminderFamily,
    kind: String,
    entity_id: String,
    subject: String,
    days: i64,
}

/// Generate reminders for every outstanding request that has aged into a
/// bucket without an open reminder for that bucket.
///
/// Returns nothing for inactive cases.
pub fn generate(case: &CaseSnapshot, now: DateTime<Utc>, ids: &dyn IdSource) -> Vec<CaseTask> {
    if !case.is_active() {
        debug!(case_id = %case.id, status = ?case.status, "case inactive, no reminders");
        return Vec::new();
    }

    let mut tasks = Vec::new();
    for outstanding in collect_outstanding(case, now) {
        let Some((key, draft)) = plan(&outstanding) else {
            continue;
        };

        if has_open_reminder(case, &key) {
            debug!(case_id = %case.id, reminder_key = %key, "reminder already open");
            continue;
        }

        debug!(
            case_id = %case.id,
            reminder_key = %key,
            days = outstanding.days,
            "creating reminder"
        );
        tasks.push(draft.into_task(&case.id, ids.next_id(&key), now));
    }
    tasks
}

/// Decide the key and task for one outstanding request, or `None` if it has
/// not aged past its first threshold.
fn plan(outstanding: &Outstanding) -> Option<(String, TaskDraft)> {
    let family = outstanding.family;
    let days = outstanding.days;

    match family.schedule() {
        Schedule::Flat {
            after_days,
            due_in_days,
            priority,
        } => {
            if days <= after_days {
                return None;
            }
            let key = reminder_key(&outstanding.kind, &outstanding.entity_id, None);
            let draft = TaskDraft {
                task_type: family.task_type(),
                title: format!("{} pending {days} days", outstanding.subject),
                description: Some(format!(
                    "No decision after {days} days. Call the adjuster and log the follow-up date."
                )),
                due_in_days,
                priority,
                recurrence: Recurrence::Weekly,
            };
            Some((key, draft))
        }
        Schedule::Buckets(steps) => {
            let bucket = bucket_for(steps, days)?;
            let key = reminder_key(&outstanding.kind, &outstanding.entity_id, Some(bucket.min_days));
            let draft = TaskDraft {
                task_type: family.task_type(),
                title: format!(
                    "{} outstanding {days} days ({}+ day follow-up)",
                    outstanding.subject, bucket.min_days
                ),
                description: Some(format!(
                    "Request sent {days} days ago with no response. Follow up and log the date."
                )),
                due_in_days: bucket.due_in_days,
                priority: bucket.priority,
                recurrence: Recurrence::Weekly,
            };
            Some((key, draft))
        }
    }
}

fn collect_outstanding(case: &CaseSnapshot, now: DateTime<Utc>) -> Vec<Outstanding> {
    let mut found = Vec::new();

    if let Some(defendant) = case.defendant_insurance() {
        if defendant.coverage_pending() {
            let anchor = defendant.coverage_anchor().or(Some(case.created_at.as_str()));
            if let Some(days) = days_since(now, anchor) {
                found.push(Outstanding {
                    family: ReminderFamily::Coverage,
                    kind: "cov".to_string(),
                    entity_id: case.id.clone(),
                    subject: format!("{} coverage decision", defendant.provider),
                    days,
                });
            }
        }
        if defendant.liability_pending() {
            let anchor = defendant.liability_anchor().or(Some(case.created_at.as_str()));
            if let Some(days) = days_since(now, anchor) {
                found.push(Outstanding {
                    family: ReminderFamily::Liability,
                    kind: "liab".to_string(),
                    entity_id: case.id.clone(),
                    subject: format!("{} liability decision", defendant.provider),
                    days,
                });
            }
        }
    }

    for provider in &case.medical_providers {
        if RequestStatus::is_outstanding(provider.bill_request_status) {
            if let Some(days) = days_since(now, provider.bill_anchor()) {
                found.push(Outstanding {
                    family: ReminderFamily::ProviderBill,
                    kind: "bill".to_string(),
                    entity_id: provider.id.clone(),
                    subject: format!("{} bills", provider.name),
                    days,
                });
            }
        }
        if RequestStatus::is_outstanding(provider.records_request_status) {
            if let Some(days) = days_since(now, provider.records_anchor()) {
                found.push(Outstanding {
                    family: ReminderFamily::ProviderRecords,
                    kind: "records".to_string(),
                    entity_id: provider.id.clone(),
                    subject: format!("{} records", provider.name),
                    days,
                });
            }
        }
    }

    for visit in &case.er_visits {
        for line in visit.bill_lines() {
            let bill_type = line.bill_type;
            if !RequestStatus::is_outstanding(line.status) {
                continue;
            }
            if let Some(days) = days_since(now, line.anchor()) {
                found.push(Outstanding {
                    family: ReminderFamily::ErBill,
                    kind: format!("er-{bill_type}"),
                    entity_id: visit.id.clone(),
                    subject: format!("{} {bill_type} bill", visit.facility_name),
                    days,
                });
            }
        }
        if RequestStatus::is_outstanding(visit.record_status) {
            if let Some(days) = days_since(now, visit.record_anchor()) {
                found.push(Outstanding {
                    family: ReminderFamily::ErRecords,
                    kind: "er-records".to_string(),
                    entity_id: visit.id.clone(),
                    subject: format!("{} ER records", visit.facility_name),
                    days,
                });
            }
        }
    }

    found
}
