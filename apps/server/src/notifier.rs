//! Server implementation of the SMS notifier.
//!
//! Renders the expense alert, logs it, and fans it out on the alert feed.
//! Nothing here can fail the ingest path: serialization problems are logged
//! and the alert is dropped.

use spendsync_core::constants::{ALERT_CHANNEL_ID, ALERT_CHANNEL_NAME};
use spendsync_core::notifier::{Alert, SmsNotifier};
use spendsync_core::sms::SmsEvent;

use crate::events::{EventBus, ServerEvent, SMS_ALERT};

pub struct TracingSmsNotifier {
    event_bus: EventBus,
}

impl TracingSmsNotifier {
    pub fn new(event_bus: EventBus) -> Self {
        tracing::info!(
            "Alert channel '{}' ({}) ready",
            ALERT_CHANNEL_NAME,
            ALERT_CHANNEL_ID
        );
        Self { event_bus }
    }
}

impl SmsNotifier for TracingSmsNotifier {
    fn notify(&self, event: &SmsEvent) {
        let alert = Alert::for_event(event);
        tracing::info!(channel = %alert.channel_id, "{}: {}", alert.title, alert.body);

        match serde_json::to_value(&alert) {
            Ok(payload) => self
                .event_bus
                .publish(ServerEvent::with_payload(SMS_ALERT, payload)),
            Err(e) => tracing::warn!("Dropping alert, failed to serialize: {}", e),
        }
    }
}
