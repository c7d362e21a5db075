use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::checkout::CheckoutResult;
use crate::config::settings::CreemConfig;
use crate::error::{GatewayError, Result as AppResult};
use crate::providers::CheckoutProvider;
use crate::server::util::mask_key;

use super::types::{CheckoutPayload, CheckoutStatus, checkout_result_from_value};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Live Creem client. Never retries; timeouts come from the shared `reqwest::Client`.
pub struct CreemProvider {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl CreemProvider {
    pub fn new(config: &CreemConfig, client: reqwest::Client) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            client,
        }
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| GatewayError::Config("CREEM_API_KEY is not configured".into()))
    }

    fn checkouts_url(&self) -> String {
        format!("{}/v1/checkouts", self.base_url)
    }

    // 非 2xx 或 2xx 但 JSON 无法解析：统一按上游错误处理，原文作为 detail
    async fn read_json(resp: reqwest::Response) -> AppResult<Value> {
        let status = resp.status();
        let body = resp.text().await?;
        tracing::debug!(status = status.as_u16(), "Creem API responded");

        if !status.is_success() {
            return Err(upstream_error(status, body));
        }
        serde_json::from_str::<Value>(&body).map_err(|e| {
            tracing::warn!("Creem API returned non-JSON body: {}", e);
            upstream_error(status, body)
        })
    }
}

fn upstream_error(status: StatusCode, body: String) -> GatewayError {
    GatewayError::Upstream {
        status: status.as_u16(),
        body,
    }
}

#[async_trait]
impl CheckoutProvider for CreemProvider {
    fn name(&self) -> &'static str {
        "creem"
    }

    async fn create_checkout(&self, payload: &CheckoutPayload) -> AppResult<CheckoutResult> {
        let api_key = self.api_key()?;
        let url = self.checkouts_url();

        tracing::info!(
            url = %url,
            product_id = %payload.product_id,
            api_key = %mask_key(api_key),
            "creating Creem checkout"
        );

        let resp = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(payload)
            .send()
            .await?;

        let v = Self::read_json(resp).await?;
        let result = checkout_result_from_value(&v)?;
        tracing::info!(session_id = ?result.session_id, "Creem checkout created");
        Ok(result)
    }

    async fn checkout_status(&self, checkout_id: &str) -> AppResult<CheckoutStatus> {
        let api_key = self.api_key()?;

        let resp = self
            .client
            .get(self.checkouts_url())
            .header(API_KEY_HEADER, api_key)
            .query(&[("checkout_id", checkout_id)])
            .send()
            .await?;

        let v = Self::read_json(resp).await?;
        Ok(CheckoutStatus::from_value(checkout_id, &v))
    }
}
