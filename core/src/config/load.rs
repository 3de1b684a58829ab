use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default listkeeper data directory: ~/.listkeeper
pub fn get_listkeeper_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".listkeeper"))
}

/// Reads one config file and applies environment overrides.
pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    let mut cfg = toml::from_str::<AppConfig>(&s)?;
    apply_env_overrides(&mut cfg)?;
    Ok(cfg)
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.listkeeper/config.toml (highest)
    let user_config = get_listkeeper_data_dir()?.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg: AppConfig = if user_config.exists() {
        let s = std::fs::read_to_string(&user_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg)?;
    Ok(cfg)
}

// Environment variable overrides (Priority 0: highest)
fn apply_env_overrides(cfg: &mut AppConfig) -> anyhow::Result<()> {
    if let Some(v) = non_empty_env("LISTKEEPER_DATA_FILE") {
        cfg.storage.snapshot_path = v;
    }
    if let Some(v) = non_empty_env("LISTKEEPER_HOST") {
        cfg.http_server.host = v;
    }
    if let Some(v) = non_empty_env("LISTKEEPER_PORT") {
        cfg.http_server.port = v
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid LISTKEEPER_PORT '{v}': {e}"))?;
    }
    Ok(())
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
