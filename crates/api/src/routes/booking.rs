//! Booking endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use slotbroker_domain::{BookingOutcome, BookingRequest, Requester};

use crate::routes::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/book", post(book))
}

/// Wire shape of a booking request
#[derive(Deserialize)]
struct BookRequest {
    event_type_uri: String,
    user: Requester,
    timezone: String,
    #[serde(default)]
    preferred_time: Option<String>,
}

/// POST /api/book - Run the booking flow for one requester
///
/// An unavailable preferred time is a client error; the response body
/// still carries the alternative slots.
async fn book(
    State(state): State<AppState>,
    Json(body): Json<BookRequest>,
) -> Result<Response, ApiError> {
    let request = BookingRequest {
        event_type: body.event_type_uri,
        requester: body.user,
        timezone: body.timezone,
        preferred_time: body.preferred_time,
    };
    info!(event_type = %request.event_type, preferred = request.preferred_time.is_some(), "booking requested");

    let outcome = state.scheduler.request_booking(&request).await?;
    let status = match outcome {
        BookingOutcome::TimeUnavailable { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::OK,
    };
    Ok((status, Json(outcome)).into_response())
}
