use serde::{Deserialize, Serialize};

/// Base configuration for the application.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to.
    pub listen_addr: String,
    /// Directory holding the JSON database file.
    pub data_dir: String,
    /// Directory holding uploaded attachments.
    pub upload_dir: String,
    /// Optional directory for rolling log files. Console-only when unset.
    pub log_dir: Option<String>,
    /// Log filter expression, e.g. `"info"` or `"evaltrack_core=debug"`.
    pub log_filters: String,
    /// Maximum accepted HTTP body size in bytes. Needs headroom above the
    /// raw upload cap because attachments arrive base64-encoded.
    pub max_body_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:5000".to_string(),
            data_dir: "./data".to_string(),
            upload_dir: "./uploads".to_string(),
            log_dir: None,
            log_filters: "info".to_string(),
            max_body_bytes: 80 * 1024 * 1024,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceConfig,
}
