//! Shared fixtures: scripted handlers with observable side effects.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use okapi_core::error::{OkapiError, Result};
use okapi_core::method::{AuthLevel, MethodOptions};
use okapi_core::request::Request;
use okapi_core::response::Response;
use okapi_gateway::dispatch::{CallContext, DocsStore, MethodRegistry, WebService};
use okapi_gateway::stats::{StatsRecord, StatsStore};

/// Handler with a fixed auth level that counts its invocations.
pub struct CountingService {
    level: AuthLevel,
    fail: bool,
    pub calls: AtomicUsize,
    pub languages: Mutex<Vec<String>>,
}

impl CountingService {
    pub fn new(level: AuthLevel) -> Arc<Self> {
        Arc::new(Self {
            level,
            fail: false,
            calls: AtomicUsize::new(0),
            languages: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(level: AuthLevel) -> Arc<Self> {
        Arc::new(Self {
            level,
            fail: true,
            calls: AtomicUsize::new(0),
            languages: Mutex::new(Vec::new()),
        })
    }

    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WebService for CountingService {
    fn options(&self) -> Result<MethodOptions> {
        Ok(MethodOptions::level(self.level))
    }

    async fn call(&self, ctx: &CallContext, _req: &Request) -> Result<Response> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.languages.lock().unwrap().push(ctx.language().to_string());
        if self.fail {
            return Err(OkapiError::BadRequest("handler refused".into()));
        }
        Ok(Response::new(200, "text/plain", format!("hello from {}", ctx.method())))
    }
}

/// Handler whose options accessor is broken.
pub struct BrokenOptionsService;

#[async_trait]
impl WebService for BrokenOptionsService {
    fn options(&self) -> Result<MethodOptions> {
        Err(OkapiError::Internal("options not declared".into()))
    }

    async fn call(&self, _ctx: &CallContext, _req: &Request) -> Result<Response> {
        Ok(Response::new(200, "text/plain", "unreachable"))
    }
}

/// Store that rejects every write.
pub struct FailingStore;

#[async_trait]
impl StatsStore for FailingStore {
    async fn insert(&self, _rec: &StatsRecord) -> Result<()> {
        Err(OkapiError::Storage("backend down".into()))
    }
}

pub fn empty_registry() -> MethodRegistry {
    MethodRegistry::new(Arc::new(DocsStore::new("/nonexistent-okapi-docs")))
}
