//! Email template admin endpoint

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::routes::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/email-templates", post(update_template))
}

#[derive(Deserialize)]
struct TemplateRequest {
    event_type_uri: String,
    subject: String,
    template: String,
}

#[derive(Serialize)]
struct TemplateResponse {
    status: &'static str,
}

/// POST /api/email-templates - Push a confirmation email template
async fn update_template(
    State(state): State<AppState>,
    Json(body): Json<TemplateRequest>,
) -> Result<Json<TemplateResponse>, ApiError> {
    state
        .scheduler
        .update_email_template(&body.event_type_uri, &body.subject, &body.template)
        .await?;

    Ok(Json(TemplateResponse { status: "updated" }))
}
