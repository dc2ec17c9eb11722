use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Reads `FORO_DB_PATH`, `FORO_HOST` and `FORO_PORT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = lookup("FORO_DB_PATH").unwrap_or_else(|| "foro.db".into());
        let host = lookup("FORO_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match lookup("FORO_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("FORO_PORT is not a valid port: {}", raw))?,
            None => 3000,
        };

        Ok(Self {
            db_path: db_path.into(),
            host,
            port,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
