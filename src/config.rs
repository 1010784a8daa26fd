use std::path::PathBuf;

use crate::errors::HostError;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DIST: &str = "frontend/dist";

/// Where to listen and which built SPA to serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub dist_dir: PathBuf,
}

impl ServerConfig {
    /// Reads `PORT` and `DOCUGENIE_DIST` from the process environment.
    pub fn from_env() -> Result<Self, HostError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HostError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| HostError::InvalidSetting { name: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };
        let dist_dir = lookup("DOCUGENIE_DIST")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST));

        Ok(Self { port, dist_dir })
    }

    pub fn index_path(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }
}
