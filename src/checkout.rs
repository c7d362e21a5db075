//! Checkout session core: request validation, payload building and the
//! runtime-agnostic entry point shared by every checkout route.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GatewayError, Result as AppResult};
use crate::providers::CheckoutProvider;
use crate::providers::creem::types::{CheckoutMetadata, CheckoutPayload};

pub const MISSING_FIELDS_MESSAGE: &str = "missing required fields: productId/userId/email";

/// Browser-side request body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub product_id: Option<String>,
    pub plan_name: Option<String>,
    /// 数字或字符串均可，透传为字符串
    pub amount: Option<Value>,
    pub user_id: Option<String>,
    pub email: Option<String>,
}

/// Fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCheckout<'a> {
    pub product_id: &'a str,
    pub plan_name: Option<&'a str>,
    pub amount: String,
    pub user_id: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResult {
    pub checkout_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

impl CheckoutRequest {
    pub fn from_json(body: &[u8]) -> AppResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| GatewayError::Validation(format!("invalid request body: {}", e)))
    }

    /// Presence check only: no format, type or catalog validation.
    pub fn validate(&self) -> AppResult<ValidCheckout<'_>> {
        match (
            non_empty(&self.product_id),
            non_empty(&self.user_id),
            non_empty(&self.email),
        ) {
            (Some(product_id), Some(user_id), Some(email)) => Ok(ValidCheckout {
                product_id,
                plan_name: self.plan_name.as_deref(),
                amount: amount_to_string(self.amount.as_ref()),
                user_id,
                email,
            }),
            _ => Err(GatewayError::Validation(MISSING_FIELDS_MESSAGE.into())),
        }
    }
}

/// `String(amount ?? '')`: only a missing or null amount becomes empty, `0` stays `"0"`.
pub fn amount_to_string(amount: Option<&Value>) -> String {
    match amount {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

pub fn build_payload(checkout: &ValidCheckout<'_>, app_url: &str) -> CheckoutPayload {
    let app_url = app_url.trim_end_matches('/');
    CheckoutPayload {
        product_id: checkout.product_id.to_string(),
        success_url: format!("{}/payment/success", app_url),
        cancel_url: format!("{}/payment/cancel", app_url),
        metadata: CheckoutMetadata {
            user_id: checkout.user_id.to_string(),
            plan_name: checkout.plan_name.map(ToString::to_string),
            amount: checkout.amount.clone(),
            email: checkout.email.to_string(),
        },
    }
}

/// Parse, validate, build and hand off to whichever provider is active.
pub async fn create_checkout_session(
    provider: &dyn CheckoutProvider,
    app_url: &str,
    body: &[u8],
) -> AppResult<CheckoutResult> {
    let request = CheckoutRequest::from_json(body)?;
    let checkout = request.validate()?;
    let payload = build_payload(&checkout, app_url);
    provider.create_checkout(&payload).await
}
