use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::constants::{DEF_HOST, DEF_MAX_CONNECTIONS, DEF_PORT, DEF_SQLITE_DB_URL, DEF_UPLOAD_DIR};

/// Runtime settings, read from the process environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub upload_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(port) => port.parse().with_context(|| format!("PORT must be a port number, got {:?}", port))?,
            None => DEF_PORT,
        };
        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(n) => n
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS must be a positive integer, got {:?}", n))?,
            None => DEF_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url: lookup("SQLITE_DB_URL").unwrap_or_else(|| DEF_SQLITE_DB_URL.to_string()),
            upload_dir: lookup("UPLOAD_DIR").unwrap_or_else(|| DEF_UPLOAD_DIR.to_string()).into(),
            host: lookup("HOST").unwrap_or_else(|| DEF_HOST.to_string()),
            port,
            max_connections,
        })
    }
}
