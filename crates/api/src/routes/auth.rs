//! OAuth handshake endpoints

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::routes::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/calendly", get(authorize))
        .route("/auth/callback", get(callback))
}

/// GET /auth/calendly - Redirect the user agent to the provider
async fn authorize(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    let url = state.oauth.authorization_url()?;
    Ok(Redirect::temporary(url.as_str()))
}

#[derive(Deserialize)]
struct CallbackParams {
    code: String,
}

#[derive(Serialize)]
struct AuthResponse {
    status: &'static str,
    expires_in: u64,
}

/// GET /auth/callback - Trade the authorization code for a token
async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Json<AuthResponse>, ApiError> {
    let token = state.oauth.exchange_authorization_code(&params.code).await?;
    state.tokens.set(token.access_token);
    info!(expires_in = token.expires_in, "provider token stored");

    Ok(Json(AuthResponse { status: "authenticated", expires_in: token.expires_in }))
}
