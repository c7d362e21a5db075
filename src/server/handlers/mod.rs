use axum::{
    Router,
    routing::{MethodRouter, any, get, post},
};
use std::sync::Arc;

use crate::error::GatewayError;
use crate::server::AppState;

mod checkout;
mod health;
mod verify;
mod webhook;

/// Paths the earlier Node/Edge deployments exposed; all share one handler.
pub const CHECKOUT_PATHS: [&str; 4] = [
    "/api/creem-checkout",
    "/api/creem-proxy",
    "/api/creem-checkout-edge",
    "/api/creem-proxy-edge",
];

async fn method_not_allowed() -> GatewayError {
    GatewayError::MethodNotAllowed
}

fn post_only<H, T>(handler: H) -> MethodRouter<Arc<AppState>>
where
    H: axum::handler::Handler<T, Arc<AppState>>,
    T: 'static,
{
    post(handler).fallback(method_not_allowed)
}

pub fn routes() -> Router<Arc<AppState>> {
    let mut router = Router::new();
    for path in CHECKOUT_PATHS {
        router = router.route(path, post_only(checkout::create_checkout));
    }

    router
        .route("/api/creem-webhook", post_only(webhook::receive_webhook))
        .route("/api/verify-payment", post_only(verify::verify_payment))
        .route("/healthz", get(health::healthz))
        .route("/api/test", any(health::diagnostic))
}
