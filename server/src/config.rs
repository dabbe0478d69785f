use std::path::PathBuf;

use dotenvy::dotenv;
use notes_core::DbConfig;

use crate::errors::ApplicationError;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_DB_FILENAME: &str = "notes.db";

/// Everything the server needs to know at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
}

impl ServerConfig {
    /// Read `.env` (if present) and then the process environment
    pub fn from_env() -> Result<Self, ApplicationError> {
        dotenv().ok();

        let host = required("NOTES_HOST")?;
        let port = required("NOTES_PORT")?;
        let data_dir =
            std::env::var("NOTES_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());

        Self::from_parts(&host, &port, &data_dir)
    }

    fn from_parts(host: &str, port: &str, data_dir: &str) -> Result<Self, ApplicationError> {
        let port = port.parse::<u16>().map_err(|e| {
            ApplicationError::InvalidEnv("NOTES_PORT".to_string(), e.to_string())
        })?;

        Ok(ServerConfig {
            host: host.to_string(),
            port,
            data_dir: PathBuf::from(data_dir),
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.data_dir.join(DEFAULT_DB_FILENAME))
    }
}

fn required(name: &str) -> Result<String, ApplicationError> {
    std::env::var(name).map_err(|e| ApplicationError::EnvError(e, name.to_string()))
}
