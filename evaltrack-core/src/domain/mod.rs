mod model;
mod status;

pub use model::{EvaluationRequest, PiRecord, RequestDraft, StatusHistoryEntry, Supplier, TeamMember};
pub use status::{is_valid_detailed_status, CoarseStatus, DETAILED_STATUSES};
