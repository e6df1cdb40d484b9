use crate::domain::status::CoarseStatus;
use crate::foundation::{ReferenceNumber, TrackerError, DEFAULT_DETAILED_STATUS};
use serde::{Deserialize, Serialize};

/// One entry in a request's append-only status audit trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryEntry {
    pub status: String,
    #[serde(default)]
    pub remarks: String,
    pub timestamp: u64,
    pub actor: String,
}

/// Client evaluation request. Wire format is camelCase JSON, matching what
/// the frontend already sends and stores.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    /// Storage identity (UUID), distinct from the human-facing reference.
    pub id: String,
    pub reference_number: ReferenceNumber,
    /// Creation time in epoch millis; never changes after creation and is
    /// the sort key for renumbering.
    pub timestamp: u64,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_of_client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub philgeps_reference_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_needed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub status: CoarseStatus,
    #[serde(default = "default_detailed_status")]
    pub detailed_status: String,
    #[serde(default)]
    pub status_history: Vec<StatusHistoryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled_at: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    pub last_updated: u64,
}

fn default_detailed_status() -> String {
    DEFAULT_DETAILED_STATUS.to_string()
}

/// Client-supplied fields of a new request. Reference number and timestamps
/// are assigned server-side and deliberately absent here.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestDraft {
    pub email: String,
    pub name: String,
    pub type_of_client: Option<String>,
    pub classification: Option<String>,
    pub project_title: Option<String>,
    pub philgeps_reference_number: Option<String>,
    pub product_type: Option<String>,
    pub request_type: Option<String>,
    pub date_needed: Option<String>,
    pub special_instructions: Option<String>,
    pub assigned_to: Option<String>,
}

impl RequestDraft {
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.email.trim().is_empty() {
            return Err(TrackerError::validation("email is required"));
        }
        if self.name.trim().is_empty() {
            return Err(TrackerError::validation("name is required"));
        }
        Ok(())
    }
}

impl EvaluationRequest {
    /// Builds a persisted record from a validated draft. The caller supplies
    /// the allocated reference number and the creation timestamp so that a
    /// failed allocation never produces a partial record.
    pub fn from_draft(id: String, reference_number: ReferenceNumber, timestamp: u64, draft: RequestDraft) -> Self {
        Self {
            id,
            reference_number,
            timestamp,
            email: draft.email,
            name: draft.name,
            type_of_client: draft.type_of_client,
            classification: draft.classification,
            project_title: draft.project_title,
            philgeps_reference_number: draft.philgeps_reference_number,
            product_type: draft.product_type,
            request_type: draft.request_type,
            date_needed: draft.date_needed,
            special_instructions: draft.special_instructions,
            assigned_to: draft.assigned_to,
            status: CoarseStatus::Pending,
            detailed_status: DEFAULT_DETAILED_STATUS.to_string(),
            status_history: Vec::new(),
            remarks: None,
            file_url: None,
            file_name: None,
            requester_file_url: None,
            requester_file_name: None,
            completed_at: None,
            canceled_at: None,
            cancellation_reason: None,
            last_updated: timestamp,
        }
    }
}

/// Accredited supplier directory entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub email: String,
    pub category: String,
    pub classification: String,
    pub company_name: String,
    pub address: String,
    pub location: String,
    pub account: String,
    pub contact_number: String,
    pub contact_email: String,
    #[serde(default)]
    pub website: String,
    pub contact_person: String,
    pub timestamp: u64,
}

/// Team member profile plus the task tallies the dashboard displays.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub name: String,
    #[serde(default)]
    pub open_tasks: u64,
    #[serde(default)]
    pub closed_tasks: u64,
    #[serde(default)]
    pub completion_rate: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// Purchase-invoice monitoring record.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PiRecord {
    pub id: String,
    pub supplier: String,
    pub pi_number: String,
    pub amount: f64,
    #[serde(default)]
    pub status: String,
    pub timestamp: u64,
}
