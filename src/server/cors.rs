use std::time::Duration;

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::settings::CorsConfig;

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(86_400);

/// 预检请求（任意路径的 OPTIONS）由该层直接返回 200 空响应，不进入路由
pub fn cors_layer(cfg: &CorsConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("x-api-key"),
        ]);

    if cfg.is_wildcard() {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = cfg
        .allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    // 白名单模式：回显请求来源，允许携带凭证
    base.allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .max_age(PREFLIGHT_MAX_AGE)
}

/// 白名单模式下，无 `Origin` 的请求（同源或服务端调用）仍返回 `Access-Control-Allow-Origin: *`
pub async fn fill_missing_origin(req: Request, next: Next) -> Response {
    let has_origin = req.headers().contains_key(header::ORIGIN);
    let mut res = next.run(req).await;
    if !has_origin {
        res.headers_mut()
            .entry(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .or_insert(HeaderValue::from_static("*"));
    }
    res
}
