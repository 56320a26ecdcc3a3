//! The case snapshot: the read-only record the engine evaluates.
//!
//! Snapshots are owned by the persistence/UI layer. Every list-valued field
//! defaults to empty so partially populated records from older clients still
//! decode.

use serde::{Deserialize, Serialize};

use crate::{
    insurance::{Insurance, InsuranceParty},
    medical::{ErVisit, MedicalProvider},
    task::{CaseTask, TaskStatus, TaskType},
};

/// Where a case sits in the firm's intake funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    New,
    UnderReview,
    Accepted,
    Rejected,
    IntakeProcessing,
    IntakePaused,
    IntakeComplete,
    Closed,
}

impl CaseStatus {
    /// The statuses for which the engine produces tasks and alerts.
    pub const ACTIVE: [CaseStatus; 4] = [
        Self::Accepted,
        Self::IntakeProcessing,
        Self::IntakePaused,
        Self::IntakeComplete,
    ];

    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }
}

/// Document categories, as resolved by the upstream classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Retainer,
    CrashReport,
    MedicalRecord,
    Authorization,
    InsuranceCard,
    Photo,
    Email,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDocument {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
}

impl CaseDocument {
    pub fn new(id: impl Into<String>, name: impl Into<String>, doc_type: DocumentType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            doc_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    System,
    User,
    Note,
}

/// One entry of the append-only, newest-first activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub message: String,
    pub timestamp: String,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentStatus {
    Ongoing,
    Completed,
}

/// Everything the engine knows about one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseSnapshot {
    pub id: String,
    /// Client-facing case name, shown on dashboard alerts.
    #[serde(default)]
    pub client_name: String,
    pub status: CaseStatus,
    pub created_at: String,
    #[serde(default)]
    pub workflow_initialized: bool,
    #[serde(default)]
    pub treatment_status: Option<TreatmentStatus>,
    #[serde(default)]
    pub insurance: Vec<Insurance>,
    #[serde(default)]
    pub medical_providers: Vec<MedicalProvider>,
    #[serde(default)]
    pub er_visits: Vec<ErVisit>,
    #[serde(default)]
    pub tasks: Vec<CaseTask>,
    #[serde(default)]
    pub documents: Vec<CaseDocument>,
    #[serde(default)]
    pub activity_log: Vec<ActivityLog>,
}

impl CaseSnapshot {
    /// A freshly created case with no attached records.
    pub fn new(
        id: impl Into<String>,
        client_name: impl Into<String>,
        status: CaseStatus,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            client_name: client_name.into(),
            status,
            created_at: created_at.into(),
            workflow_initialized: false,
            treatment_status: None,
            insurance: Vec::new(),
            medical_providers: Vec::new(),
            er_visits: Vec::new(),
            tasks: Vec::new(),
            documents: Vec::new(),
            activity_log: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// The insurance entry for `party`, if one was recorded.
    pub fn insurance_for(&self, party: InsuranceParty) -> Option<&Insurance> {
        self.insurance.iter().find(|ins| ins.party == party)
    }

    pub fn defendant_insurance(&self) -> Option<&Insurance> {
        self.insurance_for(InsuranceParty::Defendant)
    }

    pub fn client_insurance(&self) -> Option<&Insurance> {
        self.insurance_for(InsuranceParty::Client)
    }

    pub fn has_document(&self, doc_type: DocumentType) -> bool {
        self.documents.iter().any(|doc| doc.doc_type == doc_type)
    }

    /// A task of this type exists in any status.
    pub fn has_task(&self, task_type: TaskType) -> bool {
        self.tasks.iter().any(|task| task.task_type == task_type)
    }

    /// A task of this type exists and has not been completed.
    pub fn has_open_task(&self, task_type: TaskType) -> bool {
        self.tasks
            .iter()
            .any(|task| task.task_type == task_type && task.is_open())
    }

    pub fn has_completed_task(&self, task_type: TaskType) -> bool {
        self.tasks
            .iter()
            .any(|task| task.task_type == task_type && task.status == TaskStatus::Completed)
    }

    /// True when the case has at least one provider or ER visit on file.
    pub fn has_treatment_sources(&self) -> bool {
        !self.medical_providers.is_empty() || !self.er_visits.is_empty()
    }
}
