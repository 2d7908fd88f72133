//! HTTP Middleware
//!
//! 4xx / 5xx 响应日志（含耗时）；业务错误（errno != 0）在 ApiError::into_response() 中记录

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// 慢请求阈值（毫秒），超过时即使成功也记录
const SLOW_REQUEST_MS: u128 = 2000;

pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis();

    if response.status().is_server_error() {
        tracing::error!(%method, %path, status, elapsed_ms, "HTTP server error");
    } else if response.status().is_client_error() {
        // 多为 JSON 请求体无法解析
        tracing::warn!(%method, %path, status, elapsed_ms, "HTTP client error");
    } else if elapsed_ms > SLOW_REQUEST_MS {
        // 冷缓存时特征拉取可能较慢
        tracing::warn!(%method, %path, elapsed_ms, "Slow request");
    }

    response
}
