use axum::{Json, http::Method};
use chrono::Utc;
use serde_json::{Value, json};

use crate::logging::time::to_iso8601_utc_string;

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn diagnostic(method: Method) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "gateway is up",
        "timestamp": to_iso8601_utc_string(&Utc::now()),
        "method": method.as_str(),
    }))
}
