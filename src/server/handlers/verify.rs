use axum::{Json, body::Bytes, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::GatewayError;
use crate::server::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub success: bool,
    pub session_id: String,
    pub status: String,
}

pub async fn verify_payment(
    State(app_state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<VerifyResponse>, GatewayError> {
    let request: VerifyRequest = if body.iter().all(u8::is_ascii_whitespace) {
        VerifyRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| GatewayError::Validation(format!("invalid request body: {}", e)))?
    };

    let session_id = request
        .session_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| GatewayError::Validation("missing required field: sessionId".into()))?;

    let status = app_state.provider.checkout_status(&session_id).await?;
    tracing::info!(session_id = %session_id, status = %status.status, "checkout status checked");

    Ok(Json(VerifyResponse {
        success: status.is_paid(),
        session_id,
        status: status.status,
    }))
}

#[cfg(test)]
mod tests {
    use crate::server::test_support::{call, live_settings, settings};
    use axum::http::StatusCode;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn mock_mode_reports_completed() {
        let mut s = settings();
        s.creem.mock_mode = true;
        let (status, v) = call(
            s,
            "POST",
            "/api/verify-payment",
            &[],
            r#"{"sessionId":"mock-session-1"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            v,
            json!({"success": true, "sessionId": "mock-session-1", "status": "completed"})
        );
    }

    #[tokio::test]
    async fn pending_checkout_is_not_paid() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/v1/checkouts")
            .match_query(Matcher::UrlEncoded("checkout_id".into(), "ch_9".into()))
            .with_status(200)
            .with_body(r#"{"id":"ch_9","status":"pending"}"#)
            .create_async()
            .await;

        let (status, v) = call(
            live_settings(&server.url()),
            "POST",
            "/api/verify-payment",
            &[],
            r#"{"sessionId":"ch_9"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["success"], false);
        assert_eq!(v["status"], "pending");
        m.assert_async().await;
    }

    #[tokio::test]
    async fn missing_session_id_is_rejected_without_lookup() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let (status, _) = call(
            live_settings(&server.url()),
            "POST",
            "/api/verify-payment",
            &[],
            "{}",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        m.assert_async().await;
    }
}
