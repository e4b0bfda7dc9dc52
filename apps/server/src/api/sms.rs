use std::{convert::Infallible, sync::Arc, time::Duration};

use axum::{
    extract::State,
    response::sse::{Event as SseEvent, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::stream::Stream;
use serde::Serialize;
use serde_json::Value;
use spendsync_core::{bridge::DeliveryBridge, ingest::IngestReport};
use tokio_stream::{wrappers::UnboundedReceiverStream, StreamExt};
use uuid::Uuid;

use crate::{error::ApiResult, events::SMS_RECEIVED, main_lib::AppState};

/// Ingest a batch of raw messages from the device's message source.
async fn ingest_batch(
    State(state): State<Arc<AppState>>,
    Json(batch): Json<Value>,
) -> ApiResult<Json<IngestReport>> {
    let report = state.ingest_service.on_json_batch(batch).await?;
    Ok(Json(report))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PendingCount {
    pending: usize,
}

/// Number of queued events, without draining them.
async fn pending_count(State(state): State<Arc<AppState>>) -> ApiResult<Json<PendingCount>> {
    let pending = state.bridge.pending_len().await?;
    Ok(Json(PendingCount { pending }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecoverResponse {
    backup_key: Option<String>,
}

/// Moves a corrupt queue blob aside so ingest can resume.
async fn recover_pending(State(state): State<Arc<AppState>>) -> ApiResult<Json<RecoverResponse>> {
    let backup_key = state.pending_queue.recover_corrupt().await?;
    Ok(Json(RecoverResponse { backup_key }))
}

/// Detaches the live consumer when its stream is dropped (client disconnected).
struct DetachOnDrop {
    bridge: Arc<DeliveryBridge>,
    subscriber_id: Uuid,
}

impl Drop for DetachOnDrop {
    fn drop(&mut self) {
        self.bridge.detach(self.subscriber_id);
    }
}

/// Live channel. Connecting attaches this client as the single consumer,
/// replacing any earlier one.
async fn sms_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let subscription = state.bridge.attach();
    let guard = DetachOnDrop {
        bridge: state.bridge.clone(),
        subscriber_id: subscription.id(),
    };

    let receiver = UnboundedReceiverStream::new(subscription.into_receiver());
    let stream = receiver.filter_map(move |payload| {
        let _attached = &guard;
        match SseEvent::default().event(SMS_RECEIVED).json_data(&payload) {
            Ok(event) => Some(Ok(event)),
            Err(err) => {
                tracing::error!("Failed to serialize live SMS payload: {}", err);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sms/batch", post(ingest_batch))
        .route("/sms/pending/count", get(pending_count))
        .route("/sms/pending/recover", post(recover_pending))
}

pub fn stream_router() -> Router<Arc<AppState>> {
    Router::new().route("/sms/stream", get(sms_stream))
}
