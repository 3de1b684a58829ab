use serde::{Deserialize, Serialize};

use crate::registry::DEFAULT_MAX_LISTS;
use crate::store::{StoreLimits, DEFAULT_MAX_ITEMS, DEFAULT_MAX_TEXT_LENGTH};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub http_server: HttpServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "listkeeper_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_file() -> bool {
    false
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "default_http_host")]
    pub host: String,

    #[serde(default = "default_http_port")]
    pub port: u16,
}

fn default_http_host() -> String {
    "127.0.0.1".to_string()
}

fn default_http_port() -> u16 {
    8080
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_http_host(),
            port: default_http_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Snapshot file, overwritten wholesale on every save.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    /// Seconds between save attempts. Values below 1 are treated as 1.
    #[serde(default = "default_save_interval_secs")]
    pub save_interval_secs: u64,

    #[serde(default = "default_max_lists")]
    pub max_lists: usize,

    #[serde(default = "default_max_items_per_list")]
    pub max_items_per_list: usize,

    /// Maximum item text length in bytes.
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
}

fn default_snapshot_path() -> String {
    "data.json".to_string()
}

fn default_save_interval_secs() -> u64 {
    5
}

fn default_max_lists() -> usize {
    DEFAULT_MAX_LISTS
}

fn default_max_items_per_list() -> usize {
    DEFAULT_MAX_ITEMS
}

fn default_max_text_length() -> usize {
    DEFAULT_MAX_TEXT_LENGTH
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            save_interval_secs: default_save_interval_secs(),
            max_lists: default_max_lists(),
            max_items_per_list: default_max_items_per_list(),
            max_text_length: default_max_text_length(),
        }
    }
}

impl StorageConfig {
    pub fn list_limits(&self) -> StoreLimits {
        StoreLimits {
            max_items: self.max_items_per_list,
            max_text_length: self.max_text_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert!(cfg.logging.enabled);
        assert_eq!(cfg.http_server.port, 8080);
        assert_eq!(cfg.storage.snapshot_path, "data.json");
        assert_eq!(cfg.storage.save_interval_secs, 5);
        assert_eq!(cfg.storage.list_limits(), StoreLimits::default());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [storage]
            max_lists = 10
            snapshot_path = "/var/lib/listkeeper/data.json"

            [http_server]
            port = 9000
            "#,
        )
        .unwrap();
        assert_eq!(cfg.storage.max_lists, 10);
        assert_eq!(cfg.storage.max_items_per_list, DEFAULT_MAX_ITEMS);
        assert_eq!(cfg.storage.snapshot_path, "/var/lib/listkeeper/data.json");
        assert_eq!(cfg.http_server.port, 9000);
        assert_eq!(cfg.http_server.host, "127.0.0.1");
    }
}
