use serde::Serialize;
use serde_json::Value;

use crate::checkout::CheckoutResult;
use crate::error::{GatewayError, Result as AppResult};

/// Body of `POST /v1/checkouts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutPayload {
    pub product_id: String,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: CheckoutMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutMetadata {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    pub amount: String,
    pub email: String,
}

fn str_field<'a>(v: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| v.get(*k).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

// 兼容 Creem 不同 API 版本的字段名
pub fn checkout_result_from_value(v: &Value) -> AppResult<CheckoutResult> {
    let checkout_url = str_field(v, &["checkout_url", "url"]).ok_or(GatewayError::MissingCheckoutUrl)?;
    Ok(CheckoutResult {
        checkout_url: checkout_url.to_string(),
        session_id: str_field(v, &["id", "checkout_id"]).map(ToString::to_string),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutStatus {
    pub checkout_id: String,
    pub status: String,
}

impl CheckoutStatus {
    pub fn from_value(checkout_id: &str, v: &Value) -> Self {
        Self {
            checkout_id: str_field(v, &["id", "checkout_id"])
                .unwrap_or(checkout_id)
                .to_string(),
            status: str_field(v, &["status"]).unwrap_or("unknown").to_string(),
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self.status.as_str(), "completed" | "paid")
    }
}
