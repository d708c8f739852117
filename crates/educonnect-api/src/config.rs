use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub db_path: PathBuf,
    pub uploads_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = value_or_default(&lookup, "EDUCONNECT_BIND_ADDR", "127.0.0.1:5000");

        let db_path =
            PathBuf::from(value_or_default(&lookup, "EDUCONNECT_DB_PATH", "educonnect.db"));
        let uploads_dir =
            PathBuf::from(value_or_default(&lookup, "EDUCONNECT_UPLOADS_DIR", "uploads"));

        let max_upload_bytes = value_or_default(&lookup, "EDUCONNECT_MAX_UPLOAD_BYTES", "10485760")
            .parse::<usize>()
            .map_err(|_| {
                ConfigError::Invalid(
                    "EDUCONNECT_MAX_UPLOAD_BYTES must be an integer in [1024, 104857600]"
                        .to_string(),
                )
            })?;
        if !(1_024..=104_857_600).contains(&max_upload_bytes) {
            return Err(ConfigError::Invalid(
                "EDUCONNECT_MAX_UPLOAD_BYTES must be in [1024, 104857600]".to_string(),
            ));
        }

        Ok(Self {
            bind_addr,
            db_path,
            uploads_dir,
            max_upload_bytes,
        })
    }
}

fn value_or_default(lookup: impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    optional_trimmed(lookup, name).unwrap_or_else(|| default.to_string())
}

fn optional_trimmed(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
