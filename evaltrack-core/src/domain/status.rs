use crate::foundation::TrackerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse request status. The numeric codes are the wire format and must not
/// be reordered; clients store and filter on them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CoarseStatus {
    #[default]
    Pending,
    Ongoing,
    Completed,
    Canceled,
}

impl CoarseStatus {
    pub fn code(self) -> u8 {
        match self {
            CoarseStatus::Pending => 0,
            CoarseStatus::Ongoing => 1,
            CoarseStatus::Completed => 2,
            CoarseStatus::Canceled => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CoarseStatus::Pending => "pending",
            CoarseStatus::Ongoing => "ongoing",
            CoarseStatus::Completed => "completed",
            CoarseStatus::Canceled => "canceled",
        }
    }
}

impl TryFrom<u8> for CoarseStatus {
    type Error = TrackerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CoarseStatus::Pending),
            1 => Ok(CoarseStatus::Ongoing),
            2 => Ok(CoarseStatus::Completed),
            3 => Ok(CoarseStatus::Canceled),
            other => Err(TrackerError::validation(format!("status code out of range: {other}"))),
        }
    }
}

impl From<CoarseStatus> for u8 {
    fn from(value: CoarseStatus) -> Self {
        value.code()
    }
}

impl fmt::Display for CoarseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Closed set of fine-grained disposition codes.
///
/// This is the single source of truth for `detailedStatus` validation; the
/// listing endpoint exposes the same constant so clients never learn codes
/// the tracker would reject. No transition graph is enforced among these
/// values, only membership.
pub const DETAILED_STATUSES: &[&str] = &[
    "pending",
    "ongoing-clarification",
    "on-hold-awaiting-client",
    "done-system-sizing",
    "done-quotation",
    "done-proposal",
    "done-technical-evaluation",
    "done-site-inspection",
    "done-product-presentation",
    "done-supplier-accreditation",
    "done-costing",
    "done-canvassing",
    "done-bidding-documents",
    "done-compliance-review",
    "done-demo-unit",
    "done-after-sales-support",
    "cancelled-double-entry",
    "cancelled-by-client",
    "cancelled-no-stock",
    "cancelled-no-supplier-response",
    "cancelled-project-deferred",
    "cancelled-lost-bid",
    "cancelled-duplicate-request",
    "cancelled-insufficient-details",
    "cancelled-budget-constraints",
    "cancelled-superseded",
];

pub fn is_valid_detailed_status(value: &str) -> bool {
    DETAILED_STATUSES.contains(&value)
}
