//! Shared application state for the OKAPI gateway.
//!
//! Builds the registry, stats backend, user directory and dispatcher once at
//! start-up. Start-up errors are returned, never panicked on.

use std::collections::HashMap;
use std::sync::Arc;

use okapi_core::error::{OkapiError, Result};
use okapi_core::request::{Consumer, Token};

use crate::config::{GatewayConfig, StatsBackend};
use crate::dispatch::{Dispatcher, DocsStore, MethodRegistry};
use crate::obs::metrics::GatewayMetrics;
use crate::services;
use crate::stats::{JsonLinesStatsStore, MemoryStatsStore, StatsRecorder, StatsStore};
use crate::users::{MemoryUserDirectory, UserDirectory};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    dispatcher: Arc<Dispatcher>,
    metrics: Arc<GatewayMetrics>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    consumers: HashMap<String, Consumer>,
    tokens: HashMap<String, Token>,
    token_consumers: HashMap<String, String>,
}

impl AppState {
    /// Build application state with the backends named in `cfg`.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let store: Arc<dyn StatsStore> = match cfg.stats.backend {
            StatsBackend::Memory => Arc::new(MemoryStatsStore::new()),
            StatsBackend::Jsonl => {
                let path = cfg.stats.path.clone().ok_or_else(|| {
                    OkapiError::BadRequest("stats.path is required for the jsonl backend".into())
                })?;
                Arc::new(JsonLinesStatsStore::open(path)?)
            }
        };
        Self::with_backends(cfg, store, Arc::new(MemoryUserDirectory::new()))
    }

    /// Build application state around caller-supplied backends (built-in methods only).
    pub fn with_backends(
        cfg: GatewayConfig,
        store: Arc<dyn StatsStore>,
        users: Arc<dyn UserDirectory>,
    ) -> Result<Self> {
        let docs = Arc::new(DocsStore::new(cfg.gateway.docs_dir.clone()));
        let mut registry = MethodRegistry::new(Arc::clone(&docs));
        services::register_builtin(&mut registry, &cfg, docs)?;
        Self::from_parts(cfg, registry, store, users)
    }

    /// Build application state around an already populated registry.
    pub fn from_parts(
        cfg: GatewayConfig,
        registry: MethodRegistry,
        store: Arc<dyn StatsStore>,
        users: Arc<dyn UserDirectory>,
    ) -> Result<Self> {
        let metrics = Arc::new(GatewayMetrics::default());

        let consumers: HashMap<String, Consumer> = cfg
            .consumers
            .iter()
            .map(|c| (c.key.clone(), Consumer::new(c.key.clone())))
            .collect();

        let mut tokens = HashMap::new();
        let mut token_consumers = HashMap::new();
        for t in &cfg.tokens {
            tokens.insert(
                t.key.clone(),
                Token {
                    key: t.key.clone(),
                    token_type: t.token_type,
                    user_id: t.user_id,
                },
            );
            token_consumers.insert(t.key.clone(), t.consumer_key.clone());
        }

        let bound = registry.bound_names();
        tracing::info!(bound = bound.len(), catalogue = registry.names().len(), "method registry ready");

        let stats = Arc::new(StatsRecorder::new(
            store,
            Arc::clone(&metrics),
            cfg.stats.anonymize_user_ids,
        ));
        let dispatcher = Dispatcher::new(
            Arc::new(registry),
            stats,
            users,
            Arc::clone(&metrics),
            cfg.gateway.default_language.clone(),
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                consumers,
                tokens,
                token_consumers,
            }),
            dispatcher: Arc::new(dispatcher),
            metrics,
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn resolve_consumer(&self, key: &str) -> Result<Consumer> {
        self.inner
            .consumers
            .get(key)
            .cloned()
            .ok_or_else(|| OkapiError::BadRequest(format!("unknown consumer key: {key}")))
    }

    /// Resolve a token key into the token and the consumer it was issued to.
    pub fn resolve_token(&self, key: &str) -> Result<(Consumer, Token)> {
        let token = self
            .inner
            .tokens
            .get(key)
            .cloned()
            .ok_or_else(|| OkapiError::BadRequest("unknown token".into()))?;
        let consumer_key = self
            .inner
            .token_consumers
            .get(key)
            .ok_or_else(|| OkapiError::Internal("token without consumer".into()))?;
        Ok((self.resolve_consumer(consumer_key)?, token))
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.metrics
    }
}
