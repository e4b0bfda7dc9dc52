//! Batch ingest from the device's message source.

use std::sync::Arc;

use log::{debug, error, info, warn};
use serde_json::Value;

use super::IngestReport;
use crate::bridge::DeliveryBridge;
use crate::errors::{Error, Result};
use crate::sms::{is_expense_sms, RawSms};

/// Entry point invoked with each batch of incoming messages.
///
/// Items are processed in the order received. A failure on one item is
/// logged and counted; it never aborts the rest of the batch.
pub struct SmsIngestService {
    bridge: Arc<DeliveryBridge>,
}

impl SmsIngestService {
    pub fn new(bridge: Arc<DeliveryBridge>) -> Self {
        Self { bridge }
    }

    pub fn bridge(&self) -> &Arc<DeliveryBridge> {
        &self.bridge
    }

    pub async fn on_batch(&self, messages: Vec<RawSms>) -> IngestReport {
        let mut report = IngestReport {
            received: messages.len(),
            ..Default::default()
        };

        for message in messages {
            self.process(message, &mut report).await;
        }

        log_report(&report);
        report
    }

    /// Ingests a loosely-typed batch, e.g. straight from a JSON request body.
    ///
    /// Items that do not decode as a message are counted as failed. Errors
    /// only if `batch` is not an array.
    pub async fn on_json_batch(&self, batch: Value) -> Result<IngestReport> {
        let Value::Array(items) = batch else {
            return Err(Error::Validation(
                "SMS batch must be a JSON array".to_string(),
            ));
        };

        let mut report = IngestReport {
            received: items.len(),
            ..Default::default()
        };

        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<RawSms>(item) {
                Ok(message) => self.process(message, &mut report).await,
                Err(e) => {
                    warn!("Skipping malformed SMS at index {}: {}", index, e);
                    report.failed += 1;
                }
            }
        }

        log_report(&report);
        Ok(report)
    }

    async fn process(&self, message: RawSms, report: &mut IngestReport) {
        if !is_expense_sms(message.body.as_deref()) {
            report.rejected += 1;
            return;
        }

        // Classification guarantees a body
        let Some(event) = message.into_event() else {
            report.rejected += 1;
            return;
        };

        debug!(
            "Accepted transaction SMS from {:?} at {}",
            event.sender(),
            event.timestamp()
        );
        match self.bridge.handle_accepted(event).await {
            Ok(()) => report.accepted += 1,
            Err(e) => {
                error!("Failed to deliver accepted SMS: {}", e);
                report.failed += 1;
            }
        }
    }
}

fn log_report(report: &IngestReport) {
    info!(
        "SMS batch processed: {} received, {} accepted, {} rejected, {} failed",
        report.received, report.accepted, report.rejected, report.failed
    );
}
