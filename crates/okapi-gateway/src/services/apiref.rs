use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use okapi_core::error::{OkapiError, Result};
use okapi_core::method::{AuthLevel, MethodOptions};
use okapi_core::request::Request;
use okapi_core::response::{Response, CONTENT_TYPE_XML};

use crate::dispatch::{CallContext, DocsStore, WebService, CATALOGUE};

/// `services/apiref/method_index`: names of all catalogue methods.
#[derive(Default)]
pub struct MethodIndexService;

impl MethodIndexService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WebService for MethodIndexService {
    fn options(&self) -> Result<MethodOptions> {
        Ok(MethodOptions::level(AuthLevel::None))
    }

    async fn call(&self, _ctx: &CallContext, _req: &Request) -> Result<Response> {
        let index: Vec<_> = CATALOGUE.iter().map(|n| json!({ "name": n })).collect();
        Response::json(&index)
    }
}

/// `services/apiref/method`: raw documentation of the method given in `name`.
pub struct MethodDocService {
    docs: Arc<DocsStore>,
}

impl MethodDocService {
    pub fn new(docs: Arc<DocsStore>) -> Self {
        Self { docs }
    }
}

#[async_trait]
impl WebService for MethodDocService {
    fn options(&self) -> Result<MethodOptions> {
        Ok(MethodOptions::level(AuthLevel::None))
    }

    async fn call(&self, _ctx: &CallContext, req: &Request) -> Result<Response> {
        let name = req
            .param("name")
            .ok_or_else(|| OkapiError::BadRequest("missing required parameter: name".into()))?;
        let body = self.docs.read(name).await?;
        Ok(Response::new(200, CONTENT_TYPE_XML, body))
    }
}
