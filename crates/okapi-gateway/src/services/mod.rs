//! Built-in methods that need nothing but the gateway itself.
//!
//! Every other catalogue name is served by an external handler bound at
//! start-up; unbound names fail at options resolution.

pub mod apiref;
pub mod apisrv;

use std::sync::Arc;

use okapi_core::error::Result;

use crate::config::GatewayConfig;
use crate::dispatch::{DocsStore, MethodRegistry};

pub use apiref::{MethodDocService, MethodIndexService};
pub use apisrv::InstallationService;

/// Bind the built-in handlers.
pub fn register_builtin(
    registry: &mut MethodRegistry,
    cfg: &GatewayConfig,
    docs: Arc<DocsStore>,
) -> Result<()> {
    registry.register(
        "services/apisrv/installation",
        Arc::new(InstallationService::new(&cfg.gateway)),
    )?;
    registry.register("services/apiref/method_index", Arc::new(MethodIndexService::new()))?;
    registry.register("services/apiref/method", Arc::new(MethodDocService::new(docs)))?;
    Ok(())
}
