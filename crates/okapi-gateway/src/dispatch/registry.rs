//! Method catalogue and handler bindings.
//!
//! The catalogue is closed: every public method is listed in [`CATALOGUE`] and
//! must be documented. Handlers are bound at start-up; after that the registry
//! is shared read-only.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use okapi_core::error::{OkapiError, Result};
use okapi_core::method::MethodOptions;
use okapi_core::request::Request;
use okapi_core::response::Response;

use super::context::CallContext;
use super::docs::DocsStore;

/// Every method exposed by the gateway. Valid format: `^services/[a-z0-9_/]*$`.
pub const CATALOGUE: &[&str] = &[
    "services/apiref/method",
    "services/apiref/method_index",
    "services/apiref/issue",
    "services/apisrv/installation",
    "services/apisrv/installations",
    "services/apisrv/stats",
    "services/attrs/attribute_index",
    "services/attrs/attribute",
    "services/attrs/attributes",
    "services/caches/search/all",
    "services/caches/search/bbox",
    "services/caches/search/nearest",
    "services/caches/search/by_urls",
    "services/caches/search/save",
    "services/caches/shortcuts/search_and_retrieve",
    "services/caches/edit",
    "services/caches/geocache",
    "services/caches/geocaches",
    "services/caches/mark",
    "services/caches/save_personal_notes",
    "services/caches/save_user_coords",
    "services/caches/formatters/gpx",
    "services/caches/formatters/garmin",
    "services/caches/formatters/ggz",
    "services/caches/map/tile",
    "services/logs/capabilities",
    "services/logs/delete",
    "services/logs/edit",
    "services/logs/entries",
    "services/logs/entry",
    "services/logs/logs",
    "services/logs/userlogs",
    "services/logs/submit",
    "services/logs/images/add",
    "services/logs/images/edit",
    "services/logs/images/delete",
    "services/oauth/request_token",
    "services/oauth/authorize",
    "services/oauth/access_token",
    "services/replicate/changelog",
    "services/replicate/fulldump",
    "services/replicate/info",
    "services/users/user",
    "services/users/users",
    "services/users/by_usernames",
    "services/users/by_username",
    "services/users/by_internal_id",
    "services/users/by_internal_ids",
];

/// Contract every method handler implements.
#[async_trait]
pub trait WebService: Send + Sync {
    /// Self-description (minimum auth level etc.).
    fn options(&self) -> Result<MethodOptions>;

    async fn call(&self, ctx: &CallContext, req: &Request) -> Result<Response>;
}

/// Catalogue lookup plus name -> handler bindings.
pub struct MethodRegistry {
    handlers: HashMap<&'static str, Arc<dyn WebService>>,
    docs: Arc<DocsStore>,
}

impl MethodRegistry {
    pub fn new(docs: Arc<DocsStore>) -> Self {
        Self {
            handlers: HashMap::new(),
            docs,
        }
    }

    /// Bind a handler to a catalogue name. Names outside the catalogue are rejected.
    pub fn register(&mut self, name: &str, svc: Arc<dyn WebService>) -> Result<()> {
        let key = catalogue_entry(name).ok_or_else(|| OkapiError::UnknownMethod(name.to_string()))?;
        if self.handlers.insert(key, svc).is_some() {
            tracing::warn!(method = %key, "handler rebound");
        }
        Ok(())
    }

    pub fn exists(&self, name: &str) -> bool {
        is_catalogued(name)
    }

    /// Catalogue names in declaration order.
    pub fn names(&self) -> &'static [&'static str] {
        CATALOGUE
    }

    /// Names that currently have a handler bound.
    pub fn bound_names(&self) -> Vec<&'static str> {
        CATALOGUE
            .iter()
            .copied()
            .filter(|n| self.handlers.contains_key(n))
            .collect()
    }

    /// Ask the bound handler for its options.
    pub fn options(&self, name: &str) -> Result<MethodOptions> {
        let svc = self.handler(name)?;
        svc.options().map_err(|e| OkapiError::MisconfiguredHandler {
            method: name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Raw contents of the method's `docs.xml`.
    pub async fn docs(&self, name: &str) -> Result<Vec<u8>> {
        self.docs.read(name).await
    }

    pub(crate) fn handler(&self, name: &str) -> Result<Arc<dyn WebService>> {
        if !self.exists(name) {
            return Err(OkapiError::UnknownMethod(name.to_string()));
        }
        self.handlers
            .get(name)
            .cloned()
            .ok_or_else(|| OkapiError::MisconfiguredHandler {
                method: name.to_string(),
                reason: "no handler bound to this method".into(),
            })
    }
}

fn catalogue_entry(name: &str) -> Option<&'static str> {
    CATALOGUE.iter().copied().find(|n| *n == name)
}

pub(crate) fn is_catalogued(name: &str) -> bool {
    catalogue_entry(name).is_some()
}
