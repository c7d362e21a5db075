pub mod cors;
pub mod handlers;
pub(crate) mod request_logging;
pub mod util;

use crate::config::Settings;
use crate::error::Result as AppResult;
use crate::http_client::client_for_url_with_timeout;
use crate::providers::{CheckoutProvider, CreemProvider, MockCreemProvider};
use axum::{Router, middleware};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Settings,
    pub provider: Arc<dyn CheckoutProvider>,
}

impl AppState {
    /// LIVE or MOCK is fixed here for the lifetime of the process.
    pub fn new(config: Settings) -> AppResult<Self> {
        let provider: Arc<dyn CheckoutProvider> = if config.creem.mock_mode {
            tracing::warn!("CREEM_MOCK_MODE=true: checkout sessions are synthetic");
            Arc::new(MockCreemProvider)
        } else {
            if config.creem.api_key.is_none() {
                tracing::warn!("CREEM_API_KEY is not set; checkout requests will fail with 500");
            }
            let client = client_for_url_with_timeout(
                &config.creem.base_url,
                Duration::from_millis(config.creem.timeout_ms),
            )?;
            Arc::new(CreemProvider::new(&config.creem, client))
        };

        if config.creem.webhook_secret.is_none() {
            tracing::warn!("CREEM_WEBHOOK_SECRET is not set; webhook deliveries will be rejected");
        }

        Ok(Self { config, provider })
    }
}

pub fn create_app(config: Settings) -> AppResult<Router> {
    tracing::info!(
        base_url = %config.creem.base_url,
        app_url = %config.creem.app_url,
        timeout_ms = config.creem.timeout_ms,
        "Creem checkout gateway configured"
    );
    let state = AppState::new(config)?;
    Ok(build_router(Arc::new(state)))
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors::cors_layer(&state.config.cors);
    let allow_list = !state.config.cors.is_wildcard();

    let router = handlers::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    if allow_list {
        router.layer(middleware::from_fn(cors::fill_missing_origin))
    } else {
        router
    }
}
