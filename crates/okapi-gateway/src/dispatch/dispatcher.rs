use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;

use okapi_core::error::{OkapiError, Result};
use okapi_core::request::Request;
use okapi_core::response::Response;

use crate::obs::metrics::GatewayMetrics;
use crate::stats::StatsRecorder;
use crate::users::UserDirectory;

use super::context::CallContext;
use super::registry::MethodRegistry;

/// `method` label value for calls to names outside the catalogue.
pub const UNKNOWN_METHOD_LABEL: &str = "unknown";

/// Validates, invokes, and records method calls. Holds no per-call state.
pub struct Dispatcher {
    registry: Arc<MethodRegistry>,
    stats: Arc<StatsRecorder>,
    users: Arc<dyn UserDirectory>,
    metrics: Arc<GatewayMetrics>,
    default_language: String,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<MethodRegistry>,
        stats: Arc<StatsRecorder>,
        users: Arc<dyn UserDirectory>,
        metrics: Arc<GatewayMetrics>,
        default_language: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            stats,
            users,
            metrics,
            default_language: default_language.into(),
        }
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    pub fn stats(&self) -> &StatsRecorder {
        &self.stats
    }

    /// Execute a method and return its response unchanged.
    ///
    /// `req` must be consistent with the method's options: level 2 and 3
    /// methods need a consumer, level 3 methods also need a token. Only calls
    /// that succeed are recorded in the stats table.
    pub async fn call(&self, name: &str, req: &Request) -> Result<Response> {
        let span = tracing::info_span!("okapi_call", method = %name);
        let res = self.call_inner(name, req).instrument(span).await;
        if let Err(e) = &res {
            self.metrics
                .call_errors
                .inc(&[("method", self.method_label(name)), ("code", e.client_code().as_str())]);
        }
        res
    }

    /// Metric label for `name`; names outside the catalogue share one series.
    fn method_label<'a>(&self, name: &'a str) -> &'a str {
        if self.registry.exists(name) {
            name
        } else {
            UNKNOWN_METHOD_LABEL
        }
    }

    async fn call_inner(&self, name: &str, req: &Request) -> Result<Response> {
        if !self.registry.exists(name) {
            return Err(OkapiError::UnknownMethod(name.to_string()));
        }

        let options = self.registry.options(name)?;
        let level = options.min_auth_level;

        if level.requires_consumer() && req.consumer().is_none() {
            return Err(self.reject(name, "consumer required"));
        }
        if level.requires_token() && req.token().is_none() {
            return Err(self.reject(name, "token required"));
        }

        let handler = self.registry.handler(name)?;
        let started = Instant::now();

        let response = {
            let ctx = CallContext::new(name, req.preferred_languages(), &self.default_language);
            let response = handler.call(&ctx, req).await?;

            if level.requires_token() {
                if let Some(user_id) = req.access_user_id() {
                    self.users.mark_last_login(user_id).await?;
                }
            }
            response
        };

        let runtime = started.elapsed();
        self.stats.record(name, Some(req), runtime).await;
        tracing::debug!(runtime_ms = runtime.as_millis() as u64, "call completed");

        Ok(response)
    }

    fn reject(&self, name: &str, reason: &'static str) -> OkapiError {
        tracing::debug!(reason, "auth precondition failed");
        self.metrics
            .auth_rejections
            .inc(&[("method", name), ("reason", reason)]);
        OkapiError::AuthPrecondition {
            method: name.to_string(),
            reason: reason.to_string(),
        }
    }
}
