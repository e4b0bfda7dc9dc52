//! Repository trait for the durable pending queue.

use async_trait::async_trait;

use crate::errors::Result;
use crate::sms::SmsEvent;

/// Durable, ordered store of accepted events awaiting a consumer pull.
///
/// # Contract
///
/// - `append` and the drain operations are mutually exclusive: no append is
///   lost between a drain's read and its reset.
/// - Entries are returned in arrival order.
/// - A corrupt persisted blob is reported as `QueueError::CorruptState`, never
///   silently discarded. Storage failures are `QueueError::PersistenceFailure`.
#[async_trait]
pub trait PendingQueueRepositoryTrait: Send + Sync {
    /// Appends an event to the end of the queue.
    async fn append(&self, event: SmsEvent) -> Result<()>;

    /// Returns every pending event and resets the queue to empty.
    async fn drain_all(&self) -> Result<Vec<SmsEvent>>;

    /// Returns the persisted JSON array verbatim and resets the queue to `[]`.
    ///
    /// Unlike `drain_all` this does not decode the blob, so a corrupt blob is
    /// still handed to the caller.
    async fn drain_raw(&self) -> Result<String>;

    /// Number of pending events, without draining.
    async fn pending_len(&self) -> Result<usize>;
}
