use crate::foundation::TrackerError;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn current_timestamp_millis_env(env_var: Option<&str>) -> Result<u64, TrackerError> {
    if let Some(var) = env_var {
        if let Ok(value) = std::env::var(var) {
            return value.parse::<u64>().map_err(|err| TrackerError::Message(err.to_string()));
        }
    }
    let now = SystemTime::now().duration_since(UNIX_EPOCH).map_err(|err| TrackerError::Message(err.to_string()))?;
    Ok(now.as_millis() as u64)
}

/// Returns the current wall-clock timestamp in milliseconds.
///
/// For test determinism, this respects `TEST_NOW_MILLIS_ENV_VAR` when set.
pub fn now_millis() -> u64 {
    current_timestamp_millis_env(Some(crate::foundation::constants::TEST_NOW_MILLIS_ENV_VAR))
        .or_else(|_| current_timestamp_millis_env(None))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_is_nonzero() {
        assert!(now_millis() > 0);
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("EVALTRACK_TIME_TEST_VAR", "1700000000000");
        assert_eq!(current_timestamp_millis_env(Some("EVALTRACK_TIME_TEST_VAR")).unwrap(), 1_700_000_000_000);
        std::env::remove_var("EVALTRACK_TIME_TEST_VAR");
    }
}
