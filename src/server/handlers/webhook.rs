use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use chrono::Utc;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::error::{GatewayError, Result as AppResult};
use crate::server::AppState;
use crate::server::request_logging::log_simple_request;
use crate::server::util::header_str;
use crate::webhook::{EventKind, SIGNATURE_HEADER, WebhookEvent, handle_event, verify_signature};

fn process(app_state: &AppState, headers: &HeaderMap, body: &[u8]) -> AppResult<EventKind> {
    let secret = app_state
        .config
        .creem
        .webhook_secret
        .as_deref()
        .ok_or_else(|| GatewayError::Config("webhook secret not configured".into()))?;

    verify_signature(secret, body, header_str(headers, SIGNATURE_HEADER))?;

    let event = WebhookEvent::from_json(body)?;
    Ok(handle_event(&event))
}

pub async fn receive_webhook(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, GatewayError> {
    let start_time = Utc::now();
    let outcome = process(&app_state, &headers, &body);

    match &outcome {
        Ok(_) => log_simple_request(start_time, "POST", "/api/creem-webhook", 200, None),
        Err(e) => log_simple_request(
            start_time,
            "POST",
            "/api/creem-webhook",
            e.status_code().as_u16(),
            Some(&e.to_string()),
        ),
    }

    outcome.map(|_| Json(json!({ "received": true })))
}
