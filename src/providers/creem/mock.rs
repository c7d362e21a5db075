use async_trait::async_trait;
use chrono::Utc;

use crate::checkout::CheckoutResult;
use crate::error::Result as AppResult;
use crate::providers::CheckoutProvider;

use super::types::{CheckoutPayload, CheckoutStatus};

pub const MOCK_CHECKOUT_URL: &str = "https://example.com/mock-checkout";
pub const MOCK_SESSION_PREFIX: &str = "mock-session-";

/// Stand-in used when `CREEM_MOCK_MODE=true`; performs no I/O.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockCreemProvider;

#[async_trait]
impl CheckoutProvider for MockCreemProvider {
    fn name(&self) -> &'static str {
        "creem-mock"
    }

    async fn create_checkout(&self, payload: &CheckoutPayload) -> AppResult<CheckoutResult> {
        tracing::info!(product_id = %payload.product_id, "mock mode: skipping Creem API call");
        Ok(CheckoutResult {
            checkout_url: MOCK_CHECKOUT_URL.to_string(),
            session_id: Some(format!(
                "{}{}",
                MOCK_SESSION_PREFIX,
                Utc::now().timestamp_millis()
            )),
        })
    }

    async fn checkout_status(&self, checkout_id: &str) -> AppResult<CheckoutStatus> {
        Ok(CheckoutStatus {
            checkout_id: checkout_id.to_string(),
            status: "completed".to_string(),
        })
    }
}
