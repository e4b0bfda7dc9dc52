//! Encoding of the persisted queue blob.
//!
//! The queue is stored as a single JSON array of `{sender, body, timestamp}`
//! objects under one storage key.

use crate::errors::QueueError;
use crate::sms::SmsEvent;

/// Decodes a persisted queue blob.
///
/// Blank text is an empty queue. Anything else that is not a JSON array of
/// events is `CorruptState`.
pub fn decode_queue(raw: &str) -> Result<Vec<SmsEvent>, QueueError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|e| QueueError::CorruptState(e.to_string()))
}

/// Encodes the full queue as a JSON array.
pub fn encode_queue(entries: &[SmsEvent]) -> Result<String, QueueError> {
    serde_json::to_string(entries).map_err(|e| QueueError::PersistenceFailure(e.to_string()))
}

/// Appends one event to a persisted blob and returns the new blob.
pub fn append_to_blob(raw: &str, event: SmsEvent) -> Result<String, QueueError> {
    let mut entries = decode_queue(raw)?;
    entries.push(event);
    encode_queue(&entries)
}
