use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    Validation(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Config(String),

    #[error("Creem API error {status}")]
    Upstream { status: u16, body: String },

    #[error("Creem API did not return a checkout URL")]
    MissingCheckoutUrl,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GatewayError>;

/// 统一错误响应体：`{ error, detail? }`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GatewayError::Config(_)
            | GatewayError::Upstream { .. }
            | GatewayError::MissingCheckoutUrl
            | GatewayError::Http(_)
            | GatewayError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            GatewayError::Upstream { body, .. } => ErrorEnvelope {
                error: self.to_string(),
                detail: Some(body.clone()),
            },
            GatewayError::Http(e) if e.is_timeout() => ErrorEnvelope {
                error: "Creem API request timed out".into(),
                detail: Some(e.to_string()),
            },
            GatewayError::Http(e) => ErrorEnvelope {
                error: "Creem API request failed".into(),
                detail: Some(e.to_string()),
            },
            _ => ErrorEnvelope {
                error: self.to_string(),
                detail: None,
            },
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = self.envelope();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %body.error, detail = ?body.detail, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %body.error, "request rejected");
        }
        (status, Json(body)).into_response()
    }
}
