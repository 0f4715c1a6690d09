//! Insert-only stats backends.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use okapi_core::error::{OkapiError, Result};

use super::record::StatsRecord;

/// Persistence backend for stats rows. Write concurrency is the backend's concern.
#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn insert(&self, rec: &StatsRecord) -> Result<()>;
}

/// In-process store, used by default and in tests.
#[derive(Default)]
pub struct MemoryStatsStore {
    rows: Mutex<Vec<StatsRecord>>,
}

impl MemoryStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all rows in insertion order.
    pub fn records(&self) -> Vec<StatsRecord> {
        match self.rows.lock() {
            Ok(g) => g.clone(),
            Err(_) => Vec::new(),
        }
    }
}

#[async_trait]
impl StatsStore for MemoryStatsStore {
    async fn insert(&self, rec: &StatsRecord) -> Result<()> {
        self.rows
            .lock()
            .map_err(|_| OkapiError::Storage("stats store lock poisoned".into()))?
            .push(rec.clone());
        Ok(())
    }
}

/// Append-only file, one JSON object per line.
pub struct JsonLinesStatsStore {
    file: tokio::sync::Mutex<File>,
}

impl JsonLinesStatsStore {
    /// Opens at start-up; writes after that go through tokio's blocking pool.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| OkapiError::Storage(format!("open {} failed: {e}", path.display())))?;
        Ok(Self {
            file: tokio::sync::Mutex::new(File::from_std(file)),
        })
    }
}

#[async_trait]
impl StatsStore for JsonLinesStatsStore {
    async fn insert(&self, rec: &StatsRecord) -> Result<()> {
        let mut line = serde_json::to_vec(rec)
            .map_err(|e| OkapiError::Storage(format!("encode stats row failed: {e}")))?;
        line.push(b'\n');

        let mut f = self.file.lock().await;
        f.write_all(&line)
            .await
            .map_err(|e| OkapiError::Storage(format!("write stats row failed: {e}")))?;
        f.flush()
            .await
            .map_err(|e| OkapiError::Storage(format!("flush stats row failed: {e}")))
    }
}
