use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use okapi_core::method::{EXTRA_PREFIX, SERVICES_PREFIX};
use okapi_core::request::Request;

use crate::obs::metrics::GatewayMetrics;

use super::record::{
    CallType, StatsRecord, CONSUMER_ANONYMOUS, CONSUMER_INTERNAL, USER_ANONYMIZED, USER_NONE,
};
use super::store::StatsStore;

/// Turns completed calls into stats rows. Writes are best-effort.
pub struct StatsRecorder {
    store: Arc<dyn StatsStore>,
    metrics: Arc<GatewayMetrics>,
    anonymize_user_ids: bool,
}

impl StatsRecorder {
    pub fn new(store: Arc<dyn StatsStore>, metrics: Arc<GatewayMetrics>, anonymize_user_ids: bool) -> Self {
        Self {
            store,
            metrics,
            anonymize_user_ids,
        }
    }

    /// Record a completed method call. `req` is `None` for calls with no request at all.
    pub async fn record(&self, name: &str, req: Option<&Request>, runtime: Duration) {
        let rec = self.build(name, req, runtime);

        self.metrics
            .calls
            .inc(&[("method", name), ("calltype", rec.calltype.as_str())]);
        self.metrics.call_duration.observe(&[("method", name)], runtime);

        self.persist(name, &rec).await;
    }

    /// Record runtime of a non-method operation under `extra/<extra_name>`.
    ///
    /// Only the stats row is written; the call counters stay method-only.
    pub async fn record_extra(&self, extra_name: &str, req: Option<&Request>, runtime: Duration) {
        let name = format!("{EXTRA_PREFIX}{extra_name}");
        let rec = self.build(&name, req, runtime);
        self.persist(&name, &rec).await;
    }

    async fn persist(&self, name: &str, rec: &StatsRecord) {
        if let Err(e) = self.store.insert(rec).await {
            tracing::warn!(method = %name, error = %e, "stats write failed; row dropped");
            self.metrics.stats_write_failures.inc(&[("method", name)]);
        }
    }

    /// Build the row without persisting it.
    pub fn build(&self, name: &str, req: Option<&Request>, runtime: Duration) -> StatsRecord {
        let (consumer_key, user_id, calltype) = match req {
            Some(r) => {
                let consumer_key = r
                    .consumer()
                    .map(|c| c.key.clone())
                    .unwrap_or_else(|| CONSUMER_ANONYMOUS.to_string());
                let user_id = r.access_user_id().unwrap_or(USER_NONE);
                let calltype = if r.is_http_request() && name.starts_with(SERVICES_PREFIX) {
                    CallType::Http
                } else {
                    CallType::Internal
                };
                (consumer_key, user_id, calltype)
            }
            None => (CONSUMER_INTERNAL.to_string(), USER_NONE, CallType::Internal),
        };

        let user_id = if self.anonymize_user_ids && user_id != USER_NONE {
            USER_ANONYMIZED
        } else {
            user_id
        };

        StatsRecord {
            datetime: Utc::now(),
            consumer_key,
            user_id,
            service_name: name.to_string(),
            calltype,
            runtime: runtime.as_secs_f64(),
        }
    }
}
