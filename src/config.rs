use crate::store::{HttpStore, InMemoryStore, PropertyStore};
use anyhow::{bail, Context, Result};
use std::time::Duration;
use tracing::info;

/// Where listings live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Memory,
    Http,
}

/// Catalog settings, read from `CATALOG_*` environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Backend used for this process
    pub backend: Backend,
    /// Base URL of the JSON collection server (http backend only)
    pub api_url: String,
    /// Per-request timeout (http backend only)
    pub http_timeout: Duration,
    /// Load the starter listings into a fresh in-memory store
    pub seed: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Memory,
            api_url: "http://localhost:8000".to_string(),
            http_timeout: Duration::from_secs(30),
            seed: true,
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(backend) = lookup("CATALOG_BACKEND") {
            config.backend = match backend.trim().to_ascii_lowercase().as_str() {
                "memory" => Backend::Memory,
                "http" => Backend::Http,
                other => bail!("CATALOG_BACKEND must be `memory` or `http`, got {other:?}"),
            };
        }

        if let Some(url) = lookup("CATALOG_API_URL") {
            if url.trim().is_empty() {
                bail!("CATALOG_API_URL must not be empty");
            }
            config.api_url = url.trim().to_string();
        }

        if let Some(secs) = lookup("CATALOG_HTTP_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("CATALOG_HTTP_TIMEOUT_SECS is not a number: {secs:?}"))?;
            config.http_timeout = Duration::from_secs(secs);
        }

        if let Some(seed) = lookup("CATALOG_SEED") {
            config.seed = seed
                .trim()
                .parse()
                .with_context(|| format!("CATALOG_SEED must be `true` or `false`, got {seed:?}"))?;
        }

        Ok(config)
    }
}

/// Open the store selected by `config`
pub fn open_store(config: &CatalogConfig) -> Result<Box<dyn PropertyStore>> {
    let store: Box<dyn PropertyStore> = match config.backend {
        Backend::Memory if config.seed => Box::new(InMemoryStore::with_seed_data()),
        Backend::Memory => Box::new(InMemoryStore::new()),
        Backend::Http => Box::new(
            HttpStore::with_timeout(&config.api_url, config.http_timeout)
                .context("Failed to create HTTP client")?,
        ),
    };

    info!("Opened {} property store", store.backend_name());
    Ok(store)
}
