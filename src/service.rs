//! Startup wiring shared by the server and the evaluation binary.

use std::sync::Arc;

use tracing::info;

use crate::config::ServiceConfig;
use crate::error::Result;
use crate::store::DataStore;
use crate::tagging::ClassificationEngine;

/// Everything a binary needs after startup.
pub struct Service {
    pub config: ServiceConfig,
    pub store: Arc<DataStore>,
    pub engine: Arc<ClassificationEngine>,
}

impl Service {
    /// Load configuration from the environment, then data and engine.
    pub fn from_env() -> Result<Self> {
        Self::load(ServiceConfig::from_env()?)
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Self::load(ServiceConfig::from_lookup(lookup)?)
    }

    /// Load data files and build the engine for `config`.
    pub fn load(config: ServiceConfig) -> Result<Self> {
        let store = DataStore::load(&config.data_paths())?;
        let engine = ClassificationEngine::with_seed(config.seed);
        info!(
            customers = store.customers().len(),
            emails = store.emails(None).len(),
            model = engine.model_name(),
            "Service loaded"
        );

        Ok(Self {
            config,
            store: Arc::new(store),
            engine: Arc::new(engine),
        })
    }
}
