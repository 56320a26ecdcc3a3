//! Case tasks: the work items the engine appends to a case.
//!
//! Tasks are only ever appended. The engine writes `Open` tasks; staff mark
//! them `Completed`. `Overdue` exists for display layers that derive it from
//! the due date and is never written by the engine.

use serde::{Deserialize, Serialize};

/// The closed set of task kinds a case can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Retainer,
    Hipaa,
    LorDefendant,
    LorClientIns,
    CrashReportRequest,
    CoverageFollowup,
    LiabilityFollowup,
    PolicyLimitsRequest,
    ProviderBillRequest,
    ProviderRecordsRequest,
    ProviderBillFollowup,
    ProviderRecordsFollowup,
    ErBillRequest,
    ErBillFollowup,
    ErRecordsRequest,
    ErRecordsFollowup,
    TreatmentCheckin,
    DemandPrep,
    DemandSent,
    DemandResponse,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Open,
    Completed,
    Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recurrence {
    OneTime,
    Weekly,
    Monthly,
}

/// A single work item on a case.
///
/// `id` is globally unique. Reminder ids begin with their deduplication key
/// (`reminder-<kind>-<entity>-<bucket>`), which is how the reminder
/// generator recognises work it already created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseTask {
    pub id: String,
    pub case_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub status: TaskStatus,
    pub due_date: String,
    #[serde(default)]
    pub completed_date: Option<String>,
    pub priority: TaskPriority,
    pub recurrence: Recurrence,
    pub created_at: String,
    #[serde(default)]
    pub auto_generated: bool,
}

impl CaseTask {
    /// Anything not completed still needs attention, including tasks a
    /// display layer has flagged `Overdue`.
    pub fn is_open(&self) -> bool {
        self.status != TaskStatus::Completed
    }
}
