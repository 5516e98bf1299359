use crate::error::{PosError, PosResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE: &str = "config.toml";
pub const API_URL_ENV: &str = "VENTAS_POS_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the login/register backend, without trailing slash
    pub api_base_url: String,
    pub database_file: String,
    pub backup_file: String,
    pub session_file: String,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_base_url: "http://127.0.0.1:8000/api".to_string(),
            database_file: "ventas_pos.db".to_string(),
            backup_file: "ventas_backup.json".to_string(),
            session_file: "session.json".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load `config.toml` from `dir`, falling back to defaults when it is absent.
    pub fn load(dir: &Path) -> PosResult<Self> {
        let path = dir.join(CONFIG_FILE);
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            Self::parse(&raw)?
        } else {
            AppConfig::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_base_url = url;
            }
        }
        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();

        Ok(config)
    }

    pub fn parse(raw: &str) -> PosResult<Self> {
        toml::from_str(raw).map_err(|e| PosError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::parse("backup_file = \"otro.json\"").unwrap();
        assert_eq!(config.backup_file, "otro.json");
        assert_eq!(config.database_file, "ventas_pos.db");
    }

    #[test]
    fn malformed_file_is_config_error() {
        let err = AppConfig::parse("api_base_url = [").unwrap_err();
        assert!(matches!(err, PosError::Config(_)));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config.session_file, "session.json");
    }
}
