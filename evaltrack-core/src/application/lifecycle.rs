use crate::application::ReferenceAllocator;
use crate::domain::{is_valid_detailed_status, CoarseStatus, EvaluationRequest, RequestDraft, StatusHistoryEntry};
use crate::foundation::{now_millis, TrackerError, DEFAULT_ACTOR};
use crate::infrastructure::storage::Storage;
use log::info;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Payload of a fine-grained status transition.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailedStatusUpdate {
    pub detailed_status: String,
    pub status_remarks: Option<String>,
    pub timestamp: Option<u64>,
    pub actor: Option<String>,
}

/// Payload of a coarse status update. `status` is the numeric wire code.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoarseStatusUpdate {
    pub status: CoarseStatus,
    #[serde(default)]
    pub completed_at: Option<u64>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
}

/// Which of a request's two attachment slots an upload targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileSlot {
    Evaluator,
    Requester,
}

/// Validates and records request mutations, maintaining the append-only
/// status history. Coarse `status` and fine `detailedStatus` are independent
/// fields by design; no linkage between the two is enforced here.
#[derive(Clone)]
pub struct LifecycleTracker {
    storage: Arc<dyn Storage>,
}

impl LifecycleTracker {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Creates a request: validate the draft, allocate a reference number,
    /// then persist. Allocation failure aborts before anything is written,
    /// so no record ever exists without a reference number.
    pub fn create_request(&self, allocator: &ReferenceAllocator, draft: RequestDraft) -> Result<EvaluationRequest, TrackerError> {
        draft.validate()?;
        let reference = allocator.allocate()?;
        let record = EvaluationRequest::from_draft(Uuid::new_v4().to_string(), reference, now_millis(), draft);
        self.storage.put_request(record.clone())?;
        info!("created request id={} reference={}", record.id, record.reference_number);
        Ok(record)
    }

    pub fn get_request(&self, id: &str) -> Result<EvaluationRequest, TrackerError> {
        self.storage.get_request(id)?.ok_or_else(|| TrackerError::not_found(format!("request {id}")))
    }

    /// Lists requests, optionally filtered by assignee, newest first.
    pub fn list_requests(&self, assigned_to: Option<&str>) -> Result<Vec<EvaluationRequest>, TrackerError> {
        let mut records = self.storage.list_requests()?;
        if let Some(assignee) = assigned_to {
            records.retain(|record| record.assigned_to.as_deref() == Some(assignee));
        }
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }

    /// Applies a fine-grained status transition.
    ///
    /// Rejections leave the record untouched: an unknown id fails before any
    /// read-modify-write, and a value outside the closed enumeration fails
    /// before the history is appended to.
    pub fn set_detailed_status(&self, id: &str, update: DetailedStatusUpdate) -> Result<EvaluationRequest, TrackerError> {
        let mut record = self.get_request(id)?;
        if !is_valid_detailed_status(&update.detailed_status) {
            return Err(TrackerError::invalid_status(update.detailed_status));
        }

        let now = now_millis();
        let entry = StatusHistoryEntry {
            status: update.detailed_status.clone(),
            remarks: update.status_remarks.unwrap_or_default(),
            timestamp: update.timestamp.unwrap_or(now),
            actor: update.actor.unwrap_or_else(|| DEFAULT_ACTOR.to_string()),
        };
        info!(
            "detailed status transition id={} from={} to={} actor={}",
            record.id, record.detailed_status, entry.status, entry.actor
        );
        record.status_history.push(entry);
        record.detailed_status = update.detailed_status;
        record.last_updated = now;
        self.storage.put_request(record.clone())?;
        Ok(record)
    }

    /// Applies a coarse status update. Completion timestamps are taken from
    /// the caller; cancellation is stamped server-side.
    pub fn set_coarse_status(&self, id: &str, update: CoarseStatusUpdate) -> Result<EvaluationRequest, TrackerError> {
        let mut record = self.get_request(id)?;
        let now = now_millis();

        record.status = update.status;
        if update.assigned_to.is_some() {
            record.assigned_to = update.assigned_to;
        }
        if update.status == CoarseStatus::Completed {
            if let Some(completed_at) = update.completed_at {
                record.completed_at = Some(completed_at);
            }
        }
        if update.status == CoarseStatus::Canceled {
            record.canceled_at = Some(now);
            record.cancellation_reason = Some(update.cancellation_reason.unwrap_or_default());
        }
        record.last_updated = now;
        self.storage.put_request(record.clone())?;
        info!("coarse status update id={} status={}", record.id, record.status);
        Ok(record)
    }

    /// Replaces the free-form remarks. `None` means the caller omitted the
    /// field entirely, which is a validation error; an empty string is a
    /// legitimate "clear the remarks".
    pub fn set_remarks(&self, id: &str, remarks: Option<String>) -> Result<EvaluationRequest, TrackerError> {
        let remarks = remarks.ok_or_else(|| TrackerError::validation("remarks is required"))?;
        let mut record = self.get_request(id)?;
        record.remarks = Some(remarks.trim().to_string());
        record.last_updated = now_millis();
        self.storage.put_request(record.clone())?;
        Ok(record)
    }

    /// Records an attachment against one of the request's two file slots.
    pub fn attach_file(&self, id: &str, slot: FileSlot, file_name: &str, url_path: &str) -> Result<EvaluationRequest, TrackerError> {
        let mut record = self.get_request(id)?;
        match slot {
            FileSlot::Evaluator => {
                record.file_url = Some(url_path.to_string());
                record.file_name = Some(file_name.to_string());
            }
            FileSlot::Requester => {
                record.requester_file_url = Some(url_path.to_string());
                record.requester_file_name = Some(file_name.to_string());
            }
        }
        record.last_updated = now_millis();
        self.storage.put_request(record.clone())?;
        Ok(record)
    }

    /// Deletes one request and renumbers the survivors densely.
    pub fn delete_request(&self, id: &str, allocator: &ReferenceAllocator) -> Result<(), TrackerError> {
        if !self.storage.delete_request(id)? {
            return Err(TrackerError::not_found(format!("request {id}")));
        }
        allocator.renumber_survivors()?;
        info!("deleted request id={}", id);
        Ok(())
    }
}
