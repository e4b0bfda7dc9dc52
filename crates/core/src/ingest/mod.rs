//! Ingest module - batch entry point for incoming messages.

mod ingest_model;
mod ingest_service;

pub use ingest_model::IngestReport;
pub use ingest_service::SmsIngestService;
