use std::sync::Arc;

use crate::{config::Config, events::EventBus, notifier::TracingSmsNotifier};
use spendsync_core::{
    bridge::DeliveryBridge, ingest::SmsIngestService, notifier::SmsNotifier,
    queue::PendingQueueRepositoryTrait,
};
use spendsync_storage_sqlite::{
    db::{self, write_actor},
    queue::SqlitePendingQueueRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub bridge: Arc<DeliveryBridge>,
    pub ingest_service: Arc<SmsIngestService>,
    pub pending_queue: Arc<SqlitePendingQueueRepository>,
    pub event_bus: EventBus,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("SPENDSYNC_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let result = if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()
    };
    if let Err(e) = result {
        eprintln!("Tracing already initialised: {}", e);
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let event_bus = EventBus::new(256);
    let pending_queue = Arc::new(SqlitePendingQueueRepository::new(pool.clone(), writer));
    let notifier: Arc<dyn SmsNotifier> = Arc::new(TracingSmsNotifier::new(event_bus.clone()));
    let bridge = Arc::new(DeliveryBridge::new(
        pending_queue.clone() as Arc<dyn PendingQueueRepositoryTrait>,
        notifier,
    ));
    let ingest_service = Arc::new(SmsIngestService::new(bridge.clone()));

    match pending_queue.pending_len().await {
        Ok(0) => tracing::info!("No pending SMS in queue"),
        Ok(n) => tracing::info!("{} pending SMS waiting for the consumer", n),
        Err(e) => tracing::warn!("Pending SMS queue needs attention: {}", e),
    }

    Ok(Arc::new(AppState {
        bridge,
        ingest_service,
        pending_queue,
        event_bus,
        db_path,
    }))
}
