//! Dashboard alerts. These are derived on every render and never persisted.

use serde::{Deserialize, Serialize};

use crate::stage::Stage;

/// Alert urgency. Declaration order is display order: critical first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertPriority {
    Critical,
    High,
    Medium,
}

impl AlertPriority {
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    OverdueTasks,
    WorkflowNotInitialized,
    CoveragePending,
    LiabilityPending,
    ProviderBill,
    ProviderRecords,
    ErBill,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderAlert {
    pub case_id: String,
    pub case_name: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub days_pending: i64,
    pub priority: AlertPriority,
    /// The stage the condition blocks; `None` for case-wide conditions.
    pub stage: Option<Stage>,
}

/// Alerts for one case, in dashboard order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseAlerts {
    pub case_id: String,
    pub case_name: String,
    pub alerts: Vec<ReminderAlert>,
}
