use async_trait::async_trait;
use serde::Serialize;

use okapi_core::error::Result;
use okapi_core::method::{AuthLevel, MethodOptions};
use okapi_core::request::Request;
use okapi_core::response::Response;

use crate::config::GatewaySection;
use crate::dispatch::{CallContext, WebService};

/// `services/apisrv/installation`: basic facts about this installation.
pub struct InstallationService {
    site_url: String,
    okapi_base_url: String,
}

impl InstallationService {
    pub fn new(gw: &GatewaySection) -> Self {
        Self {
            site_url: gw.site_url.clone(),
            okapi_base_url: gw.okapi_base_url(),
        }
    }
}

#[derive(Debug, Serialize)]
struct InstallationInfo<'a> {
    site_url: &'a str,
    okapi_base_url: &'a str,
    okapi_version: &'static str,
    language: &'a str,
}

#[async_trait]
impl WebService for InstallationService {
    fn options(&self) -> Result<MethodOptions> {
        Ok(MethodOptions::level(AuthLevel::None))
    }

    async fn call(&self, ctx: &CallContext, _req: &Request) -> Result<Response> {
        Response::json(&InstallationInfo {
            site_url: &self.site_url,
            okapi_base_url: &self.okapi_base_url,
            okapi_version: env!("CARGO_PKG_VERSION"),
            language: ctx.language(),
        })
    }
}
