//! SMS domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// An incoming message as delivered by the device's message source.
///
/// Every field except the timestamp may be missing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSms {
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    pub timestamp: i64,
}

impl RawSms {
    pub fn new(sender: Option<&str>, body: Option<&str>, timestamp: i64) -> Self {
        Self {
            sender: sender.map(str::to_string),
            body: body.map(str::to_string),
            timestamp,
        }
    }

    /// Builds the event for this message. Returns `None` when there is no body.
    pub fn into_event(self) -> Option<SmsEvent> {
        let body = self.body?;
        Some(SmsEvent::new(self.sender, body, self.timestamp))
    }
}

/// An accepted transaction message.
///
/// This is also the persisted queue entry: `{"sender", "body", "timestamp"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsEvent {
    sender: Option<String>,
    body: String,
    timestamp: i64,
}

impl SmsEvent {
    pub fn new(sender: Option<String>, body: String, timestamp: i64) -> Self {
        Self {
            sender,
            body,
            timestamp,
        }
    }

    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Epoch milliseconds reported by the message source.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Timestamp as a UTC datetime, if it is in chrono's representable range.
    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Stable fingerprint of `(sender, timestamp)`.
    ///
    /// Delivery is at-least-once: an event pushed live is drained again on the
    /// next pull. Consumers that need exactly-once processing dedupe on this key.
    pub fn idempotency_key(&self) -> String {
        let mut hasher = Sha256::new();
        // Presence marker keeps an absent sender distinct from an empty one.
        match &self.sender {
            Some(sender) => {
                hasher.update(b"S");
                hasher.update(sender.as_bytes());
            }
            None => hasher.update(b"N"),
        }
        hasher.update(b"|");
        hasher.update(self.timestamp.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Payload pushed over the live channel.
    pub fn to_live(&self) -> LiveSms {
        LiveSms {
            sender: self.sender.clone(),
            body: self.body.clone(),
        }
    }
}

/// Map sent to an attached consumer for each accepted event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveSms {
    pub sender: Option<String>,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_queue_field_names() {
        let event = SmsEvent::new(
            Some("VM-HDFCBK".to_string()),
            "a/c X1234 debited".to_string(),
            1_700_000_000_000,
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["sender"], "VM-HDFCBK");
        assert_eq!(json["body"], "a/c X1234 debited");
        assert_eq!(json["timestamp"], 1_700_000_000_000i64);
    }

    #[test]
    fn test_missing_sender_serializes_as_null() {
        let event = SmsEvent::new(None, "X1234".to_string(), 1);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"sender":null,"body":"X1234","timestamp":1}"#);
    }

    #[test]
    fn test_raw_sms_without_body_has_no_event() {
        let raw = RawSms::new(Some("AX-SBI"), None, 5);
        assert!(raw.into_event().is_none());
    }

    #[test]
    fn test_raw_sms_decodes_with_missing_optional_fields() {
        let raw: RawSms = serde_json::from_str(r#"{"timestamp": 42}"#).unwrap();
        assert_eq!(raw, RawSms::new(None, None, 42));
    }

    #[test]
    fn test_idempotency_key_depends_on_sender_and_timestamp_only() {
        let a = SmsEvent::new(Some("BANK".to_string()), "one".to_string(), 10);
        let b = SmsEvent::new(Some("BANK".to_string()), "two".to_string(), 10);
        let c = SmsEvent::new(Some("BANK".to_string()), "one".to_string(), 11);
        assert_eq!(a.idempotency_key(), b.idempotency_key());
        assert_ne!(a.idempotency_key(), c.idempotency_key());
        assert_eq!(a.idempotency_key().len(), 64);
    }

    #[test]
    fn test_idempotency_key_separates_missing_and_empty_sender() {
        let missing = SmsEvent::new(None, "X1234".to_string(), 10);
        let empty = SmsEvent::new(Some(String::new()), "X1234".to_string(), 10);
        assert_ne!(missing.idempotency_key(), empty.idempotency_key());
    }

    #[test]
    fn test_received_at_converts_epoch_millis() {
        let event = SmsEvent::new(None, "X1234".to_string(), 1_700_000_000_123);
        let at = event.received_at().unwrap();
        assert_eq!(at.timestamp_millis(), 1_700_000_000_123);
    }
}
