//! Medical providers and emergency-room visits, with the bill and record
//! requests the firm tracks for each.

use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};

/// Lifecycle of a bill or record request. An unset status (`None` on the
/// owning record) means the same as `NotRequested`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    NotRequested,
    Requested,
    Received,
    Na,
}

impl RequestStatus {
    /// True once a request has gone out (or was never needed).
    pub fn is_sent(status: Option<Self>) -> bool {
        matches!(status, Some(Self::Requested | Self::Received | Self::Na))
    }

    /// True once the document arrived (or was never needed).
    pub fn is_settled(status: Option<Self>) -> bool {
        matches!(status, Some(Self::Received | Self::Na))
    }

    /// True while the firm is waiting on the other side.
    pub fn is_outstanding(status: Option<Self>) -> bool {
        status == Some(Self::Requested)
    }
}

/// A treating provider (clinic, physical therapist, specialist).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalProvider {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bill_request_status: Option<RequestStatus>,
    #[serde(default)]
    pub bill_request_date: Option<String>,
    #[serde(default)]
    pub bill_followup_date: Option<String>,
    #[serde(default)]
    pub records_request_status: Option<RequestStatus>,
    #[serde(default)]
    pub records_request_date: Option<String>,
    #[serde(default)]
    pub records_followup_date: Option<String>,
    #[serde(default)]
    pub total_cost: Option<f64>,
}

impl MedicalProvider {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bill_request_status: None,
            bill_request_date: None,
            bill_followup_date: None,
            records_request_status: None,
            records_request_date: None,
            records_followup_date: None,
            total_cost: None,
        }
    }

    /// Follow-up date if one was logged, otherwise the original request date.
    pub fn bill_anchor(&self) -> Option<&str> {
        self.bill_followup_date
            .as_deref()
            .or(self.bill_request_date.as_deref())
    }

    pub fn records_anchor(&self) -> Option<&str> {
        self.records_followup_date
            .as_deref()
            .or(self.records_request_date.as_deref())
    }
}

/// The three separately billed components of an ER visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErBillType {
    Facility,
    Physician,
    Radiology,
}

impl ErBillType {
    pub const ALL: [ErBillType; 3] = [Self::Facility, Self::Physician, Self::Radiology];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Facility => "facility",
            Self::Physician => "physician",
            Self::Radiology => "radiology",
        }
    }
}

impl fmt::Display for ErBillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bill line of an ER visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErBillLine {
    #[serde(rename = "type")]
    pub bill_type: ErBillType,
    #[serde(default)]
    pub billing_entity: Option<String>,
    #[serde(default)]
    pub status: Option<RequestStatus>,
    #[serde(default)]
    pub request_date: Option<String>,
    #[serde(default)]
    pub followup_date: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
}

impl ErBillLine {
    pub fn new(bill_type: ErBillType) -> Self {
        Self {
            bill_type,
            billing_entity: None,
            status: None,
            request_date: None,
            followup_date: None,
            amount: None,
        }
    }

    pub fn anchor(&self) -> Option<&str> {
        self.followup_date.as_deref().or(self.request_date.as_deref())
    }
}

/// An emergency-room visit. Carries exactly one bill line per
/// [`ErBillType`] when built through [`ErVisit::new`]; decoded visits may
/// not, so rules read lines through [`ErVisit::bill_lines`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErVisit {
    pub id: String,
    pub facility_name: String,
    #[serde(default)]
    pub visit_date: Option<String>,
    #[serde(default)]
    pub bills: Vec<ErBillLine>,
    #[serde(default)]
    pub record_status: Option<RequestStatus>,
    #[serde(default)]
    pub record_request_date: Option<String>,
    #[serde(default)]
    pub record_followup_date: Option<String>,
}

impl ErVisit {
    pub fn new(id: impl Into<String>, facility_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            facility_name: facility_name.into(),
            visit_date: None,
            bills: ErBillType::ALL.into_iter().map(ErBillLine::new).collect(),
            record_status: None,
            record_request_date: None,
            record_followup_date: None,
        }
    }

    pub fn bill(&self, bill_type: ErBillType) -> Option<&ErBillLine> {
        self.bills.iter().find(|line| line.bill_type == bill_type)
    }

    /// Exactly one line per bill type, in [`ErBillType::ALL`] order.
    ///
    /// The first stored line of a type wins; later duplicates are ignored.
    /// A type with no stored line reads as a fresh, unrequested line.
    pub fn bill_lines(&self) -> impl Iterator<Item = Cow<'_, ErBillLine>> + '_ {
        ErBillType::ALL
            .into_iter()
            .map(move |bill_type| match self.bill(bill_type) {
                Some(line) => Cow::Borrowed(line),
                None => Cow::Owned(ErBillLine::new(bill_type)),
            })
    }

    pub fn bill_mut(&mut self, bill_type: ErBillType) -> Option<&mut ErBillLine> {
        self.bills.iter_mut().find(|line| line.bill_type == bill_type)
    }

    pub fn record_anchor(&self) -> Option<&str> {
        self.record_followup_date
            .as_deref()
            .or(self.record_request_date.as_deref())
    }
}
