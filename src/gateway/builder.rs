//! Builder for configuring gateway instances

use std::sync::Arc;

use rayon::ThreadPoolBuilder;
use serde::Deserialize;
use tracing::info;

use super::Gateway;
use crate::registry::{ModelsConfig, RegistryBuilder};
use crate::resolve::LanguageResolver;
use crate::{MimirError, Result};

/// Text comparison tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct CompareConfig {
    /// Size of the comparison worker pool (default: 4).
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Candidates per unit of parallel work (default: 64).
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            chunk_size: default_chunk_size(),
        }
    }
}

fn default_workers() -> usize {
    4
}

fn default_chunk_size() -> usize {
    64
}

/// Main entry point for creating gateway instances.
pub struct Mimir;

impl Mimir {
    /// Create a new builder for configuring the gateway.
    pub fn builder() -> MimirBuilder {
        MimirBuilder::new()
    }
}

/// Builder for configuring gateway instances.
#[derive(Default)]
pub struct MimirBuilder {
    models: ModelsConfig,
    registry: Option<RegistryBuilder>,
    compare: CompareConfig,
}

impl MimirBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load models from these paths at build time.
    pub fn models(mut self, models: ModelsConfig) -> Self {
        self.models = models;
        self
    }

    /// Use an already assembled registry instead of loading from paths.
    ///
    /// Takes precedence over [`MimirBuilder::models`].
    pub fn registry(mut self, registry: RegistryBuilder) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn compare(mut self, compare: CompareConfig) -> Self {
        self.compare = compare;
        self
    }

    /// Set the comparison worker pool size.
    pub fn compare_workers(mut self, workers: usize) -> Self {
        self.compare.workers = workers;
        self
    }

    /// Set how many candidates one comparison task scores.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.compare.chunk_size = chunk_size;
        self
    }

    /// Load the models and build the gateway.
    ///
    /// Any model loading error is fatal: the gateway is never built with a
    /// partially loaded capability.
    pub fn build(self) -> Result<Gateway> {
        if self.compare.workers == 0 {
            return Err(MimirError::Configuration(
                "compare.workers must be at least 1".to_string(),
            ));
        }
        if self.compare.chunk_size == 0 {
            return Err(MimirError::Configuration(
                "compare.chunk_size must be at least 1".to_string(),
            ));
        }

        let registry = match self.registry {
            Some(builder) => builder,
            None => RegistryBuilder::from_config(&self.models)?,
        }
        .build();

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.compare.workers)
            .thread_name(|i| format!("mimir-compare-{i}"))
            .build()
            .map_err(|e| {
                MimirError::Configuration(format!("Failed to start comparison workers: {e}"))
            })?;

        let resolver = LanguageResolver::new(registry.language_detector().present().cloned());
        info!(
            workers = self.compare.workers,
            chunk_size = self.compare.chunk_size,
            "gateway ready"
        );

        Ok(Gateway {
            registry: Arc::new(registry),
            resolver,
            pool: Arc::new(pool),
            chunk_size: self.compare.chunk_size,
        })
    }
}
