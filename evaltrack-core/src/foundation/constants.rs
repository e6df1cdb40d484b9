/// Named counter series backing request reference allocation.
pub const REQUEST_COUNTER_SERIES: &str = "requestCounter";

/// Width of the zero-padded human-facing reference number.
pub const REFERENCE_NUMBER_WIDTH: usize = 4;

/// Default fine-grained disposition for a freshly created request.
pub const DEFAULT_DETAILED_STATUS: &str = "pending";

/// Actor recorded in the status history when the caller supplies none.
pub const DEFAULT_ACTOR: &str = "system";

/// Env var used by tests to pin the wall clock.
pub const TEST_NOW_MILLIS_ENV_VAR: &str = "EVALTRACK_TEST_NOW_MILLIS";

/// Upload cap carried over from the original deployment (50 MB).
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// File types the blob store accepts for attachments.
pub const ALLOWED_UPLOAD_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif", "pdf"];
