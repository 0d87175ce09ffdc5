//! Telegram webhook handler

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use super::ApiState;
use crate::telegram::types::Update;
use crate::Error;

/// Header Telegram uses to echo the webhook secret
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Handle one webhook delivery
///
/// 403 on a secret mismatch, 500 when the body is not an update, 200
/// otherwise (including ignored updates and failed sends).
pub async fn handle_update(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let provided = headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());

    if !state.telegram.verify_secret(provided) {
        tracing::warn!("Telegram webhook secret mismatch");
        return StatusCode::FORBIDDEN.into_response();
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => return internal_error(&Error::from(e), state.dev_mode),
    };

    tracing::debug!(update_id = update.update_id, "received Telegram update");

    let action = state.dispatcher.dispatch(&update).await;
    if let Err(e) = action.execute(state.messenger.as_ref()).await {
        tracing::error!(error = %e, update_id = update.update_id, "failed to send Telegram reply");
    }

    StatusCode::OK.into_response()
}

fn internal_error(error: &Error, dev_mode: bool) -> Response {
    tracing::error!(error = %error, "webhook handling failed");

    let body = if dev_mode {
        format!("Error: {error}")
    } else {
        "Internal server error".to_string()
    };

    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
