use serde_json::Value;
use tokio::sync::broadcast;

/// Event name for expense alerts on the alert feed.
pub const SMS_ALERT: &str = "sms:alert";

/// Event name for live SMS pushed to the attached consumer.
pub const SMS_RECEIVED: &str = "sms";

/// Envelope that carries an event name and its JSON payload.
#[derive(Clone, Debug)]
pub struct ServerEvent {
    pub name: &'static str,
    pub payload: Value,
}

impl ServerEvent {
    pub fn with_payload(name: &'static str, payload: Value) -> Self {
        Self {
            name,
            payload,
        }
    }
}

/// Lightweight broadcast bus that fans out alerts to any connected clients.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ServerEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: ServerEvent) {
        // No listeners or lagging listeners are ignored to avoid blocking producers.
        let _ = self.sender.send(event);
    }
}
