//! Shared construction of engine-generated tasks.

use chrono::{DateTime, Utc};

use caseflow_contracts::task::{CaseTask, Recurrence, TaskPriority, TaskStatus, TaskType};

use crate::clock::{add_days, format_instant};

/// A task the engine has decided to create, before it gets an id.
#[derive(Debug, Clone)]
pub(crate) struct TaskDraft {
    pub task_type: TaskType,
    pub title: String,
    pub description: Option<String>,
    pub due_in_days: i64,
    pub priority: TaskPriority,
    pub recurrence: Recurrence,
}

impl TaskDraft {
    /// Stamp the draft into an open, auto-generated task on `case_id`.
    pub fn into_task(self, case_id: &str, id: String, now: DateTime<Utc>) -> CaseTask {
        CaseTask {
            id,
            case_id: case_id.to_string(),
            title: self.title,
            description: self.description,
            task_type: self.task_type,
            status: TaskStatus::Open,
            due_date: format_instant(add_days(now, self.due_in_days)),
            completed_date: None,
            priority: self.priority,
            recurrence: self.recurrence,
            created_at: format_instant(now),
            auto_generated: true,
        }
    }
}
