//! Confirmation webhook callback

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use slotbroker_domain::ConfirmationOutcome;

use crate::state::AppState;

/// Header the provider carries the HMAC hex digest in.
pub const SIGNATURE_HEADER: &str = "x-calendly-webhook-signature";

pub fn router() -> Router<AppState> {
    Router::new().route("/webhooks/confirmations", post(confirm))
}

/// POST /webhooks/confirmations - Verify and process a provider callback
///
/// Verification runs over the raw body bytes, before any JSON parsing.
async fn confirm(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    match state.scheduler.handle_confirmation(&body, signature) {
        ConfirmationOutcome::Accepted { processed } => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "accepted", "processed": processed })),
        )
            .into_response(),
        ConfirmationOutcome::Rejected => (
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({ "error": "invalid signature" })),
        )
            .into_response(),
    }
}
