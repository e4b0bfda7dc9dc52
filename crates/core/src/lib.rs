//! SpendSync Core - SMS classification, durable queueing, and delivery.
//!
//! This crate contains the business logic for turning incoming SMS messages
//! into transaction events for the host application. It is database-agnostic
//! and defines the queue trait that is implemented by the `storage-sqlite`
//! crate.
//!
//! ```text
//! batch ──► ingest ──► classifier ──► bridge ──┬──► pending queue (durable)
//!                                              ├──► notifier (best-effort)
//!                                              └──► live consumer (if attached)
//! ```

pub mod bridge;
pub mod constants;
pub mod errors;
pub mod ingest;
pub mod notifier;
pub mod queue;
pub mod sms;

// Re-export the types most callers need
pub use bridge::{DeliveryBridge, LiveSubscription};
pub use ingest::{IngestReport, SmsIngestService};
pub use sms::{is_expense_sms, RawSms, SmsEvent};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
