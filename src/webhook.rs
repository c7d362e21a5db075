//! Creem webhook deliveries: signature check and event classification.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::Value;
use sha2::Sha256;

use crate::error::{GatewayError, Result as AppResult};

type HmacSha256 = Hmac<Sha256>;

/// Hex HMAC-SHA256 of the raw body, keyed with the webhook secret.
pub const SIGNATURE_HEADER: &str = "creem-signature";

pub const INVALID_SIGNATURE_MESSAGE: &str = "invalid webhook signature";

pub fn sign(secret: &str, body: &[u8]) -> AppResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| GatewayError::Config("invalid webhook secret".into()))?;
    mac.update(body);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

pub fn verify_signature(secret: &str, body: &[u8], signature: Option<&str>) -> AppResult<()> {
    let invalid = || GatewayError::Unauthorized(INVALID_SIGNATURE_MESSAGE.into());

    let provided = signature.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(invalid)?;
    let provided = hex::decode(provided).map_err(|_| invalid())?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| GatewayError::Config("invalid webhook secret".into()))?;
    mac.update(body);
    // verify_slice 为常量时间比较
    mac.verify_slice(&provided).map_err(|_| invalid())
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", alias = "eventType")]
    pub event_type: String,
    #[serde(default, alias = "object")]
    pub data: Value,
    #[serde(default)]
    pub created_at: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    CheckoutCompleted,
    CheckoutFailed,
    SubscriptionActive,
    SubscriptionPaid,
    SubscriptionCanceled,
    RefundCreated,
    Unknown(String),
}

impl EventKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "checkout.completed" => Self::CheckoutCompleted,
            "checkout.failed" => Self::CheckoutFailed,
            "subscription.active" => Self::SubscriptionActive,
            "subscription.paid" => Self::SubscriptionPaid,
            "subscription.canceled" => Self::SubscriptionCanceled,
            "refund.created" => Self::RefundCreated,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::CheckoutCompleted => "checkout.completed",
            Self::CheckoutFailed => "checkout.failed",
            Self::SubscriptionActive => "subscription.active",
            Self::SubscriptionPaid => "subscription.paid",
            Self::SubscriptionCanceled => "subscription.canceled",
            Self::RefundCreated => "refund.created",
            Self::Unknown(raw) => raw,
        }
    }
}

impl WebhookEvent {
    pub fn from_json(body: &[u8]) -> AppResult<Self> {
        serde_json::from_slice(body)
            .map_err(|e| GatewayError::Validation(format!("invalid webhook payload: {}", e)))
    }

    pub fn kind(&self) -> EventKind {
        EventKind::parse(&self.event_type)
    }

    /// `metadata.userId` attached at checkout creation, if the provider echoed it back.
    pub fn user_id(&self) -> Option<&str> {
        self.data
            .get("metadata")
            .and_then(|m| m.get("userId"))
            .and_then(Value::as_str)
    }
}

/// Credits and subscriptions live in the hosted store; here the event is only classified and logged.
pub fn handle_event(event: &WebhookEvent) -> EventKind {
    let kind = event.kind();
    let user_id = event.user_id().unwrap_or("-");
    match &kind {
        EventKind::CheckoutCompleted | EventKind::SubscriptionPaid => {
            tracing::info!(event = kind.as_str(), user_id, id = ?event.id, "payment completed");
        }
        EventKind::CheckoutFailed => {
            tracing::warn!(event = kind.as_str(), user_id, id = ?event.id, "payment failed");
        }
        EventKind::SubscriptionActive
        | EventKind::SubscriptionCanceled
        | EventKind::RefundCreated => {
            tracing::info!(event = kind.as_str(), user_id, id = ?event.id, "subscription event");
        }
        EventKind::Unknown(raw) => {
            tracing::warn!(event = %raw, id = ?event.id, "unknown Creem webhook type");
        }
    }
    kind
}
