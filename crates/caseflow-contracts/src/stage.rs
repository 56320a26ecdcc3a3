//! Pipeline stages and the progress report the stage evaluator produces.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The eight fixed phases a case moves through, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Intake,
    Investigation,
    Insurance,
    Treatment,
    RecordsRequests,
    RecordsCollection,
    PreDemand,
    Demand,
}

impl Stage {
    pub const ORDERED: [Stage; 8] = [
        Self::Intake,
        Self::Investigation,
        Self::Insurance,
        Self::Treatment,
        Self::RecordsRequests,
        Self::RecordsCollection,
        Self::PreDemand,
        Self::Demand,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intake => "intake",
            Self::Investigation => "investigation",
            Self::Insurance => "insurance",
            Self::Treatment => "treatment",
            Self::RecordsRequests => "records_requests",
            Self::RecordsCollection => "records_collection",
            Self::PreDemand => "pre_demand",
            Self::Demand => "demand",
        }
    }

    /// Heading shown to staff.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Intake => "Intake",
            Self::Investigation => "Investigation",
            Self::Insurance => "Insurance",
            Self::Treatment => "Treatment",
            Self::RecordsRequests => "Records Requests",
            Self::RecordsCollection => "Records Collection",
            Self::PreDemand => "Pre-Demand",
            Self::Demand => "Demand",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workability of a stage.
///
/// A stage is `Active` only when every earlier stage is `Complete`; any
/// unfinished earlier stage leaves it `Blocked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Complete,
    Active,
    Blocked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub label: String,
    pub done: bool,
}

impl ChecklistItem {
    pub fn new(label: impl Into<String>, done: bool) -> Self {
        Self {
            label: label.into(),
            done,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageProgress {
    pub stage: Stage,
    pub items: Vec<ChecklistItem>,
    pub completed: usize,
    pub total: usize,
    pub status: StageStatus,
}

/// All eight stages plus roll-ups for a case header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageReport {
    pub stages: Vec<StageProgress>,
    /// First stage that is not yet complete; `None` once everything is done.
    pub current_stage: Option<Stage>,
    /// Done items over all items, rounded down, 0..=100.
    pub percent_complete: u8,
}
