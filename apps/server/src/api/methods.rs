//! Method channel for the consumer's pull requests.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use spendsync_core::constants::GET_PENDING_SMS_METHOD;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// Dispatches a named method call.
///
/// `getPendingSms` returns the persisted JSON array as a string and resets the
/// queue to `[]` in the same step. Events already pushed live are included:
/// the consumer is responsible for dropping duplicates.
async fn invoke_method(
    Path(method): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    match method.as_str() {
        GET_PENDING_SMS_METHOD => {
            let pending = state.bridge.drain_pending_raw().await?;
            Ok(Json(Value::String(pending)))
        }
        other => Err(ApiError::NotImplemented(format!(
            "Method '{}' is not implemented",
            other
        ))),
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/methods/{method}", post(invoke_method))
}
