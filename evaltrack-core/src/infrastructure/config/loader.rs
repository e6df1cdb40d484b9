//! Configuration loader using Figment for layered config management.
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. TOML config file
//! 3. Environment variables (EVALTRACK_* prefix)

use crate::foundation::TrackerError;
use crate::infrastructure::config::types::AppConfig;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use log::info;
use std::path::Path;

/// Environment variable prefix for config overrides.
///
/// Example: `EVALTRACK_SERVICE__LISTEN_ADDR` -> `service.listen_addr`
const ENV_PREFIX: &str = "EVALTRACK_";

const CONFIG_FILE_NAME: &str = "evaltrack.toml";

/// Load configuration from the default file in `data_dir` (`evaltrack.toml`).
/// A missing file is fine; defaults plus env overrides apply.
pub fn load_config(data_dir: &Path) -> Result<AppConfig, TrackerError> {
    load_config_from_file(&data_dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from a specific file path.
pub fn load_config_from_file(path: &Path) -> Result<AppConfig, TrackerError> {
    info!("loading configuration path={}", path.display());
    let figment = Figment::from(Serialized::defaults(AppConfig::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));
    figment.extract().map_err(|err| TrackerError::ConfigError(format!("config extraction failed: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.service.listen_addr, "127.0.0.1:5000");
        assert_eq!(config.service.log_filters, "info");
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("evaltrack.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[service]\nlisten_addr = \"0.0.0.0:8080\"\nlog_filters = \"debug\"").unwrap();

        let config = load_config_from_file(&path).unwrap();
        assert_eq!(config.service.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.service.log_filters, "debug");
        // Untouched keys keep their defaults.
        assert_eq!(config.service.upload_dir, "./uploads");
    }
}
