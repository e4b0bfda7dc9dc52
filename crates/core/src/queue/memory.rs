//! In-process pending queue.
//!
//! Holds the same JSON blob the SQLite repository persists, so both
//! implementations share one set of semantics. Nothing survives a restart.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::codec::{append_to_blob, decode_queue};
use super::PendingQueueRepositoryTrait;
use crate::constants::EMPTY_QUEUE_JSON;
use crate::errors::Result;
use crate::sms::SmsEvent;

pub struct InMemoryPendingQueue {
    blob: Mutex<String>,
}

impl InMemoryPendingQueue {
    pub fn new() -> Self {
        Self::with_blob(EMPTY_QUEUE_JSON)
    }

    /// Starts from an existing persisted blob.
    pub fn with_blob(blob: &str) -> Self {
        Self {
            blob: Mutex::new(blob.to_string()),
        }
    }
}

impl Default for InMemoryPendingQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PendingQueueRepositoryTrait for InMemoryPendingQueue {
    async fn append(&self, event: SmsEvent) -> Result<()> {
        let mut blob = self.blob.lock().await;
        *blob = append_to_blob(&blob, event)?;
        Ok(())
    }

    async fn drain_all(&self) -> Result<Vec<SmsEvent>> {
        let mut blob = self.blob.lock().await;
        let entries = decode_queue(&blob)?;
        *blob = EMPTY_QUEUE_JSON.to_string();
        Ok(entries)
    }

    async fn drain_raw(&self) -> Result<String> {
        let mut blob = self.blob.lock().await;
        Ok(std::mem::replace(&mut *blob, EMPTY_QUEUE_JSON.to_string()))
    }

    async fn pending_len(&self) -> Result<usize> {
        let blob = self.blob.lock().await;
        Ok(decode_queue(&blob)?.len())
    }
}
