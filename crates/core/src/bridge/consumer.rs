//! Live consumer handle and subscription.

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::sms::LiveSms;

/// Sending half of the live channel, owned by the bridge while a consumer is
/// attached. Never persisted.
#[derive(Debug)]
pub(crate) struct ConsumerHandle {
    id: Uuid,
    sender: mpsc::UnboundedSender<LiveSms>,
}

impl ConsumerHandle {
    pub(crate) fn channel() -> (Self, LiveSubscription) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        (Self { id, sender }, LiveSubscription { id, receiver })
    }

    pub(crate) fn id(&self) -> Uuid {
        self.id
    }

    /// Hands the payload to the consumer's context. Fails only when the
    /// receiving side has been dropped.
    pub(crate) fn push(&self, payload: LiveSms) -> Result<(), LiveSms> {
        self.sender.send(payload).map_err(|e| e.0)
    }
}

/// Receiving half of the live channel, held by the attached consumer.
///
/// The stream ends when the consumer is detached or replaced by a newer
/// subscriber.
#[derive(Debug)]
pub struct LiveSubscription {
    id: Uuid,
    receiver: mpsc::UnboundedReceiver<LiveSms>,
}

impl LiveSubscription {
    /// Identifier to pass back to `DeliveryBridge::detach`.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Waits for the next pushed event. Returns `None` once detached.
    pub async fn recv(&mut self) -> Option<LiveSms> {
        self.receiver.recv().await
    }

    /// Returns a pushed event if one is ready.
    pub fn try_recv(&mut self) -> Option<LiveSms> {
        self.receiver.try_recv().ok()
    }

    pub fn into_receiver(self) -> mpsc::UnboundedReceiver<LiveSms> {
        self.receiver
    }
}
