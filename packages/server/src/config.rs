//! Server configuration read from the environment.

use std::path::{Path, PathBuf};

use vleague_dataset::MATCHES_FILE;

/// Default bind address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Default port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default directory holding the CSV data files.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default directory of the production frontend build.
pub const DEFAULT_DIST_DIR: &str = "frontend/dist";

/// Runtime configuration for the dashboard server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind to (`BIND_ADDR`).
    pub bind_addr: String,
    /// Port to listen on (`PORT`).
    pub port: u16,
    /// Directory holding the match dataset and widget CSVs (`DATA_DIR`).
    pub data_dir: PathBuf,
    /// Frontend build served at `/` when it exists (`DIST_DIR`).
    pub dist_dir: PathBuf,
    /// Directory overriding the embedded lookup tables
    /// (`VLEAGUE_LOOKUP_DIR`).
    pub lookup_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
            lookup_dir: None,
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from environment variables, falling back
    /// to defaults for anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(p) => p.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid PORT {p:?}, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        Self {
            bind_addr: var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port,
            data_dir: var("DATA_DIR").map_or(defaults.data_dir, PathBuf::from),
            dist_dir: var("DIST_DIR").map_or(defaults.dist_dir, PathBuf::from),
            lookup_dir: var("VLEAGUE_LOOKUP_DIR")
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Path of the match dataset.
    #[must_use]
    pub fn matches_path(&self) -> PathBuf {
        self.data_dir.join(MATCHES_FILE)
    }

    /// The frontend build directory, if it exists on disk.
    #[must_use]
    pub fn dist(&self) -> Option<&Path> {
        self.dist_dir.is_dir().then_some(self.dist_dir.as_path())
    }
}
