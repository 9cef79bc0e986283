//! Configuration types.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::store::DataPaths;

/// Default port, matching the frontend's development proxy.
pub const DEFAULT_PORT: u16 = 8000;

/// Service configuration, read from `TAGGER_*` environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory holding `mock_data.json` and `customer_config.json`.
    pub data_dir: PathBuf,
    /// Email file override.
    pub emails_path: Option<PathBuf>,
    /// Customer tag file override.
    pub customers_path: Option<PathBuf>,
    pub host: String,
    pub port: u16,
    /// Seed for the fallback chooser. `None` means non-deterministic.
    pub seed: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            emails_path: None,
            customers_path: None,
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            seed: None,
        }
    }
}

impl ServiceConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("TAGGER_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "TAGGER_PORT".to_string(),
                message: format!("'{raw}' is not a valid port"),
            })?,
            None => defaults.port,
        };

        let seed = match lookup("TAGGER_SEED") {
            Some(raw) => Some(raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "TAGGER_SEED".to_string(),
                message: format!("'{raw}' is not an unsigned integer"),
            })?),
            None => None,
        };

        Ok(Self {
            data_dir: lookup("TAGGER_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            emails_path: lookup("TAGGER_MOCK_DATA").map(PathBuf::from),
            customers_path: lookup("TAGGER_CUSTOMER_CONFIG").map(PathBuf::from),
            host: lookup("TAGGER_HOST").unwrap_or(defaults.host),
            port,
            seed,
        })
    }

    /// Resolved data file locations.
    pub fn data_paths(&self) -> DataPaths {
        let mut paths = DataPaths::in_dir(&self.data_dir);
        if let Some(ref p) = self.emails_path {
            paths.emails = p.clone();
        }
        if let Some(ref p) = self.customers_path {
            paths.customers = p.clone();
        }
        paths
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
