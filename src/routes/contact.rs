use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::json;

use crate::error::RelayError;
use crate::state::SharedState;

/// `POST /api/send-email`
pub async fn send_email(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, RelayError> {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok());

    let outcome = state.relay.submit(content_type, &body).await?;

    Ok(Json(json!({ "ok": true, "result": outcome.body })))
}
