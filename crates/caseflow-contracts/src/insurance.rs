//! Insurance records attached to a case.

use serde::{Deserialize, Serialize};

/// Which party an insurance entry covers. A case holds at most one entry
/// per party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsuranceParty {
    Client,
    Defendant,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    Pending,
    Accepted,
    Denied,
    UnderInvestigation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiabilityStatus {
    Pending,
    Accepted,
    Denied,
    Disputed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyLimitsStatus {
    NotRequested,
    Requested,
    Received,
    Na,
}

/// One insurance policy involved in the claim.
///
/// Date stamps are ISO-8601 strings as supplied by the intake layer. They
/// anchor the age computations for follow-ups; when absent the case's own
/// creation time is used instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insurance {
    #[serde(rename = "type")]
    pub party: InsuranceParty,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub claim_number: Option<String>,
    #[serde(default)]
    pub coverage_status: Option<CoverageStatus>,
    #[serde(default)]
    pub coverage_status_date: Option<String>,
    #[serde(default)]
    pub coverage_followup_date: Option<String>,
    #[serde(default)]
    pub liability_status: Option<LiabilityStatus>,
    #[serde(default)]
    pub liability_status_date: Option<String>,
    #[serde(default)]
    pub liability_followup_date: Option<String>,
    #[serde(default)]
    pub policy_limits_status: Option<PolicyLimitsStatus>,
    #[serde(default)]
    pub policy_limits_request_date: Option<String>,
}

impl Insurance {
    /// An entry for `party` with every status unset.
    pub fn new(party: InsuranceParty, provider: impl Into<String>) -> Self {
        Self {
            party,
            provider: provider.into(),
            claim_number: None,
            coverage_status: None,
            coverage_status_date: None,
            coverage_followup_date: None,
            liability_status: None,
            liability_status_date: None,
            liability_followup_date: None,
            policy_limits_status: None,
            policy_limits_request_date: None,
        }
    }

    /// Coverage is still undecided: unset or explicitly pending.
    pub fn coverage_pending(&self) -> bool {
        matches!(self.coverage_status, None | Some(CoverageStatus::Pending))
    }

    /// Liability is still undecided: unset or explicitly pending.
    pub fn liability_pending(&self) -> bool {
        matches!(self.liability_status, None | Some(LiabilityStatus::Pending))
    }

    /// The most recent date stamp relevant to the coverage decision.
    ///
    /// A follow-up resets the clock, so it takes precedence over the status date.
    pub fn coverage_anchor(&self) -> Option<&str> {
        self.coverage_followup_date
            .as_deref()
            .or(self.coverage_status_date.as_deref())
    }

    /// The most recent date stamp relevant to the liability decision.
    pub fn liability_anchor(&self) -> Option<&str> {
        self.liability_followup_date
            .as_deref()
            .or(self.liability_status_date.as_deref())
    }
}
