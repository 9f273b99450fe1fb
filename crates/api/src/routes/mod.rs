pub mod auth;
pub mod booking;
pub mod templates;
pub mod webhooks;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};

use slotbroker_domain::SchedulerError;
use tracing::{debug, error};

use crate::state::AppState;

/// The full route table over shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(auth::router())
        .merge(booking::router())
        .merge(webhooks::router())
        .merge(templates::router())
        .with_state(state)
}

/// Convert scheduler errors to HTTP responses
pub struct ApiError(SchedulerError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            SchedulerError::InvalidExpression(_)
            | SchedulerError::PastDate(_)
            | SchedulerError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SchedulerError::SignatureInvalid => StatusCode::FORBIDDEN,
            SchedulerError::Auth(_) => StatusCode::UNAUTHORIZED,
            SchedulerError::Provider(_) => StatusCode::BAD_GATEWAY,
            SchedulerError::Config(_) | SchedulerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(kind = self.0.label(), error = %self.0, "request failed");
        } else {
            debug!(kind = self.0.label(), error = %self.0, "request rejected");
        }
        let body = Json(serde_json::json!({ "error": self.0 }));
        (status, body).into_response()
    }
}

impl From<SchedulerError> for ApiError {
    fn from(err: SchedulerError) -> Self {
        Self(err)
    }
}
