use chrono::{DateTime, Utc};
use serde::Serialize;

/// Consumer key stored when there is no request at all.
pub const CONSUMER_INTERNAL: &str = "internal";
/// Consumer key stored when a request carries no consumer.
pub const CONSUMER_ANONYMOUS: &str = "anonymous";
/// User id stored when no access token is present.
pub const USER_NONE: i64 = -1;
/// User id stored in place of real ids when anonymization is on.
pub const USER_ANONYMIZED: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallType {
    Http,
    Internal,
}

impl CallType {
    pub fn as_str(self) -> &'static str {
        match self {
            CallType::Http => "http",
            CallType::Internal => "internal",
        }
    }
}

/// One row of the stats table. Identity columns are never null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsRecord {
    pub datetime: DateTime<Utc>,
    pub consumer_key: String,
    pub user_id: i64,
    pub service_name: String,
    pub calltype: CallType,
    /// Seconds.
    pub runtime: f64,
}
