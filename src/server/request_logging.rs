use chrono::{DateTime, Utc};

use crate::checkout::CheckoutResult;
use crate::error::GatewayError;

// 记录结账请求结果（耗时、状态码、会话 ID）
pub fn log_checkout_request(
    start_time: DateTime<Utc>,
    path: &str,
    provider: &str,
    response: &Result<CheckoutResult, GatewayError>,
) {
    let response_time_ms = (Utc::now() - start_time).num_milliseconds();

    match response {
        Ok(r) => tracing::info!(
            path,
            provider,
            status_code = 200,
            response_time_ms,
            session_id = ?r.session_id,
            "checkout session created"
        ),
        Err(e) => tracing::warn!(
            path,
            provider,
            status_code = e.status_code().as_u16(),
            response_time_ms,
            error = %e,
            "checkout session failed"
        ),
    }
}

pub fn log_simple_request(
    start_time: DateTime<Utc>,
    method: &str,
    path: &str,
    status_code: u16,
    error_message: Option<&str>,
) {
    let response_time_ms = (Utc::now() - start_time).num_milliseconds();
    match error_message {
        None => tracing::info!(method, path, status_code, response_time_ms, "request handled"),
        Some(err) => tracing::warn!(method, path, status_code, response_time_ms, error = err, "request failed"),
    }
}
