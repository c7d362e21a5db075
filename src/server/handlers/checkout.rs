use axum::{Json, body::Bytes, extract::{MatchedPath, State}};
use chrono::Utc;
use std::sync::Arc;

use crate::checkout::{CheckoutResult, create_checkout_session};
use crate::error::GatewayError;
use crate::server::AppState;
use crate::server::request_logging::log_checkout_request;

// Body is taken raw so that malformed JSON still yields the `{ error }` envelope.
pub async fn create_checkout(
    State(app_state): State<Arc<AppState>>,
    matched: MatchedPath,
    body: Bytes,
) -> Result<Json<CheckoutResult>, GatewayError> {
    let start_time = Utc::now();
    let provider = app_state.provider.as_ref();

    let response =
        create_checkout_session(provider, &app_state.config.creem.app_url, &body).await;

    log_checkout_request(start_time, matched.as_str(), provider.name(), &response);

    response.map(Json)
}
