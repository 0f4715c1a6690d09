//! User directory collaborator.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use okapi_core::error::Result;

/// External user store. The dispatcher only ever touches `last_login`.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn mark_last_login(&self, user_id: i64) -> Result<()>;
}

/// In-memory directory keyed by user id.
#[derive(Default)]
pub struct MemoryUserDirectory {
    last_login: DashMap<i64, DateTime<Utc>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_login(&self, user_id: i64) -> Option<DateTime<Utc>> {
        self.last_login.get(&user_id).map(|e| *e.value())
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn mark_last_login(&self, user_id: i64) -> Result<()> {
        self.last_login.insert(user_id, Utc::now());
        Ok(())
    }
}
