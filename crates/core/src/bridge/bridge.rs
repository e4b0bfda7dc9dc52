//! Delivery coordinator.
//!
//! Every accepted event is written to the durable queue, announced through the
//! notifier, and, when a consumer is attached, pushed to it live. The durable
//! write happens regardless of the live push, so delivery is at-least-once:
//! an event received live is returned again by the next drain. Consumers
//! dedupe with `SmsEvent::idempotency_key` if they need to.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, error, info, warn};
use uuid::Uuid;

use super::consumer::{ConsumerHandle, LiveSubscription};
use crate::errors::Result;
use crate::notifier::SmsNotifier;
use crate::queue::PendingQueueRepositoryTrait;
use crate::sms::SmsEvent;

/// Whether a live consumer is listening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Detached,
    Attached,
}

pub struct DeliveryBridge {
    queue: Arc<dyn PendingQueueRepositoryTrait>,
    notifier: Arc<dyn SmsNotifier>,
    consumer: RwLock<Option<ConsumerHandle>>,
}

impl DeliveryBridge {
    pub fn new(
        queue: Arc<dyn PendingQueueRepositoryTrait>,
        notifier: Arc<dyn SmsNotifier>,
    ) -> Self {
        Self {
            queue,
            notifier,
            consumer: RwLock::new(None),
        }
    }

    fn consumer_read(&self) -> RwLockReadGuard<'_, Option<ConsumerHandle>> {
        self.consumer.read().unwrap_or_else(|e| e.into_inner())
    }

    fn consumer_write(&self) -> RwLockWriteGuard<'_, Option<ConsumerHandle>> {
        self.consumer.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Attaches a live consumer, replacing any previous one.
    ///
    /// The previous subscriber's stream ends when its handle is dropped here.
    pub fn attach(&self) -> LiveSubscription {
        let (handle, subscription) = ConsumerHandle::channel();
        let previous = self.consumer_write().replace(handle);
        match previous {
            Some(old) => info!(
                "Live consumer {} replaced by {}",
                old.id(),
                subscription.id()
            ),
            None => info!("Live consumer {} attached", subscription.id()),
        }
        subscription
    }

    /// Detaches the consumer if `subscriber_id` is still the attached one.
    ///
    /// Returns false when a newer subscriber has taken over.
    pub fn detach(&self, subscriber_id: Uuid) -> bool {
        let mut consumer = self.consumer_write();
        match consumer.as_ref() {
            Some(handle) if handle.id() == subscriber_id => {
                *consumer = None;
                info!("Live consumer {} detached", subscriber_id);
                true
            }
            _ => {
                debug!("Ignoring detach for stale consumer {}", subscriber_id);
                false
            }
        }
    }

    /// Detaches whatever consumer is attached (shutdown path).
    pub fn detach_any(&self) {
        if let Some(handle) = self.consumer_write().take() {
            info!("Live consumer {} detached", handle.id());
        }
    }

    pub fn state(&self) -> BridgeState {
        if self.consumer_read().is_some() {
            BridgeState::Attached
        } else {
            BridgeState::Detached
        }
    }

    pub fn is_attached(&self) -> bool {
        self.state() == BridgeState::Attached
    }

    /// Delivers an accepted event.
    ///
    /// 1. Appends it to the durable queue.
    /// 2. Invokes the notifier.
    /// 3. Pushes it to the attached consumer, if any.
    ///
    /// Steps 2 and 3 run even if the append fails; the append error is then
    /// returned. Push failures are logged and never retried.
    pub async fn handle_accepted(&self, event: SmsEvent) -> Result<()> {
        let persisted = self.queue.append(event.clone()).await;
        if let Err(e) = &persisted {
            error!(
                "Failed to queue SMS from {:?} at {}: {}",
                event.sender(),
                event.timestamp(),
                e
            );
        }

        self.notifier.notify(&event);
        self.try_push(&event);

        persisted
    }

    /// Best-effort live push. Returns true if the consumer accepted the payload.
    pub fn try_push(&self, event: &SmsEvent) -> bool {
        let failed_id = {
            let consumer = self.consumer_read();
            let Some(handle) = consumer.as_ref() else {
                debug!("No live consumer attached, event left in pending queue");
                return false;
            };
            match handle.push(event.to_live()) {
                Ok(()) => return true,
                Err(_) => handle.id(),
            }
        };

        warn!(
            "Live consumer {} is gone, event left in pending queue",
            failed_id
        );
        self.detach(failed_id);
        false
    }

    /// Pull side: every pending event, queue reset to empty.
    pub async fn drain_pending(&self) -> Result<Vec<SmsEvent>> {
        self.queue.drain_all().await
    }

    /// Pull side: the persisted JSON array as stored, queue reset to `[]`.
    pub async fn drain_pending_raw(&self) -> Result<String> {
        self.queue.drain_raw().await
    }

    pub async fn pending_len(&self) -> Result<usize> {
        self.queue.pending_len().await
    }
}
