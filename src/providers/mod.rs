pub mod creem;

use async_trait::async_trait;

use crate::checkout::CheckoutResult;
use crate::error::Result as AppResult;
use creem::types::{CheckoutPayload, CheckoutStatus};

/// Seam between the HTTP handlers and whatever issues checkout sessions.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn create_checkout(&self, payload: &CheckoutPayload) -> AppResult<CheckoutResult>;

    async fn checkout_status(&self, checkout_id: &str) -> AppResult<CheckoutStatus>;
}

pub use creem::{CreemProvider, MockCreemProvider};
