use crate::foundation::constants::REFERENCE_NUMBER_WIDTH;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-facing 4-digit zero-padded identifier, distinct from the storage id.
///
/// Reference numbers are issued sequentially by the allocator and kept dense
/// after deletions, so the numeric value of a given reference can change over
/// a record's lifetime.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceNumber(String);

impl ReferenceNumber {
    pub fn from_seq(seq: u64) -> Self {
        Self(format!("{seq:0width$}", width = REFERENCE_NUMBER_WIDTH))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the reference, or `None` for manually seeded
    /// non-numeric data.
    pub fn numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for ReferenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ReferenceNumber {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_padding() {
        assert_eq!(ReferenceNumber::from_seq(1).as_str(), "0001");
        assert_eq!(ReferenceNumber::from_seq(42).as_str(), "0042");
        assert_eq!(ReferenceNumber::from_seq(9999).as_str(), "9999");
        // Width grows past the padded range rather than truncating.
        assert_eq!(ReferenceNumber::from_seq(10000).as_str(), "10000");
    }

    #[test]
    fn test_numeric_round_trip() {
        assert_eq!(ReferenceNumber::from_seq(7).numeric(), Some(7));
        assert_eq!(ReferenceNumber::from("seeded".to_string()).numeric(), None);
    }
}
